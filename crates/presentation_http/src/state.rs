//! Application state shared across handlers

use std::sync::Arc;

use application::CoachRequestDispatcher;
use infrastructure::{AppConfig, build_dispatcher};
use tracing::{error, info};

/// Whether the coaching pipeline could be built at startup
#[derive(Debug)]
pub enum Readiness {
    /// Pipeline configured and serving
    Ready(Arc<CoachRequestDispatcher>),
    /// Configuration is incomplete; the reason is reported by `/ready`
    NotReady(String),
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Coaching pipeline, if configured
    pub readiness: Arc<Readiness>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("ready", &self.dispatcher().is_some())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State with a working pipeline
    pub fn ready(dispatcher: CoachRequestDispatcher, config: AppConfig) -> Self {
        Self {
            readiness: Arc::new(Readiness::Ready(Arc::new(dispatcher))),
            config: Arc::new(config),
        }
    }

    /// State that answers every coaching request with 503
    pub fn not_ready(reason: impl Into<String>, config: AppConfig) -> Self {
        Self {
            readiness: Arc::new(Readiness::NotReady(reason.into())),
            config: Arc::new(config),
        }
    }

    /// Build the pipeline from configuration
    ///
    /// A configuration error does not abort startup; the service comes up
    /// not-ready so orchestration can see the reason on `/api/v1/ready`.
    pub fn from_config(config: AppConfig) -> Self {
        match build_dispatcher(&config) {
            Ok((dispatcher, provider)) => {
                info!(provider = ?provider, "Coaching pipeline ready");
                Self::ready(dispatcher, config)
            },
            Err(e) => {
                error!(error = %e, "Coaching pipeline not configured, serving as not ready");
                Self::not_ready(e.to_string(), config)
            },
        }
    }

    /// The dispatcher, when configured
    #[must_use]
    pub fn dispatcher(&self) -> Option<&Arc<CoachRequestDispatcher>> {
        match self.readiness.as_ref() {
            Readiness::Ready(dispatcher) => Some(dispatcher),
            Readiness::NotReady(_) => None,
        }
    }

    /// Reason the pipeline is unavailable, if it is
    #[must_use]
    pub fn not_ready_reason(&self) -> Option<&str> {
        match self.readiness.as_ref() {
            Readiness::Ready(_) => None,
            Readiness::NotReady(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_without_keys_is_not_ready() {
        let state = AppState::from_config(AppConfig::default());
        assert!(state.dispatcher().is_none());
        assert!(state.not_ready_reason().is_some());
    }

    #[test]
    fn not_ready_keeps_reason() {
        let state = AppState::not_ready("GROK_API_KEY is required", AppConfig::default());
        assert_eq!(state.not_ready_reason(), Some("GROK_API_KEY is required"));
        assert!(format!("{state:?}").contains("ready: false"));
    }
}
