//! Domain layer for the Sensii coach gateway
//!
//! Contains the validated request payloads, pipeline entities, the parsed
//! match state and domain errors. This layer performs no I/O and defines the
//! ubiquitous language.

pub mod entities;
pub mod errors;
pub mod match_state;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use match_state::MatchState;
pub use value_objects::*;
