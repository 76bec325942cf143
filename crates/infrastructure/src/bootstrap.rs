//! Wiring of the coaching pipeline from configuration

use std::sync::Arc;

use application::ApplicationError;
use application::ports::{CoachProvider, SpeechPort};
use application::services::CoachRequestDispatcher;
use tracing::info;

use crate::adapters::{SpeechAdapter, build_coach_provider};
use crate::config::{AppConfig, ProviderConfig};

/// Build the dispatcher and the provider selection it was built from
///
/// Runs once at startup. Any failure is a configuration error and the
/// service must report itself as not ready.
pub fn build_dispatcher(
    config: &AppConfig,
) -> Result<(CoachRequestDispatcher, ProviderConfig), ApplicationError> {
    config.validate().map_err(ApplicationError::Configuration)?;

    let provider = ProviderConfig::resolve(config)?;
    let coach: Arc<dyn CoachProvider> =
        build_coach_provider(&provider, config.timeouts.http_timeout_ms)?;
    let speech: Arc<dyn SpeechPort> = Arc::new(SpeechAdapter::new(config.speech_config())?);

    info!(
        provider = %provider.kind,
        model = %provider.model,
        stage_timeout_ms = config.timeouts.stage_timeout_ms,
        "Coaching pipeline configured"
    );

    let dispatcher =
        CoachRequestDispatcher::with_config(speech, coach, config.dispatcher_config());
    Ok((dispatcher, provider))
}
