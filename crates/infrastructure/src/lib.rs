//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the OpenAI
//! speech client and the Gemini/Grok vision clients, and owns configuration
//! loading and tracing setup.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use bootstrap::build_dispatcher;
pub use config::{AppConfig, LimitsConfig, ProviderConfig, ServerConfig, TimeoutsConfig};
pub use telemetry::{LogFormat, TelemetryError, init_tracing};
