//! Sensii HTTP presentation layer
//!
//! This crate provides the HTTP API for the coach gateway.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod shutdown;
pub mod state;

pub use error::ApiError;
pub use middleware::{REQUEST_ID_HEADER, RequestId, RequestIdLayer};
pub use routes::create_router;
pub use shutdown::{ShutdownOutcome, serve_until_drained};
pub use state::AppState;
