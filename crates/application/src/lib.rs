//! Application layer - Use cases and orchestration
//!
//! Contains the coaching pipeline, prompt construction, and port definitions.
//! Orchestrates domain objects and infrastructure adapters.

pub mod error;
pub mod ports;
pub mod request_context;
pub mod services;

pub use error::{ApplicationError, PipelineStage, UpstreamErrorKind, UpstreamFailure};
pub use ports::*;
pub use request_context::RequestContext;
pub use services::*;
