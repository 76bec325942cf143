//! Coach provider registry
//!
//! A lookup table keyed by [`CoachProviderKind`]. Each entry knows where its
//! credential and base URL live in [`AppConfig`] and how to build its
//! [`CoachProvider`]. Supporting another backend means one more entry here.

use std::sync::Arc;

use ai_core::{
    GEMINI_BASE_URL, GROK_BASE_URL, GeminiVisionEngine, GrokVisionEngine, InferenceError,
    VisionConfig,
};
use application::ApplicationError;
use application::ports::CoachProvider;
use domain::CoachProviderKind;
use secrecy::SecretString;
use tracing::info;

use super::coach_adapter::VisionCoachAdapter;
use crate::config::{AppConfig, ProviderConfig};

type BuildFn = fn(VisionConfig) -> Result<Arc<dyn CoachProvider>, InferenceError>;

/// Registry entry for one coach backend
#[derive(Debug)]
pub struct ProviderEntry {
    /// Backend this entry builds
    pub kind: CoachProviderKind,
    /// API base URL used when no override is configured
    pub default_base_url: &'static str,
    /// Where the credential lives in the configuration
    pub credential: fn(&AppConfig) -> Option<&SecretString>,
    /// Where the base URL override lives in the configuration
    pub base_url: fn(&AppConfig) -> Option<&str>,
    build: BuildFn,
}

static REGISTRY: [ProviderEntry; 2] = [
    ProviderEntry {
        kind: CoachProviderKind::Gemini,
        default_base_url: GEMINI_BASE_URL,
        credential: gemini_credential,
        base_url: gemini_base_url,
        build: build_gemini,
    },
    ProviderEntry {
        kind: CoachProviderKind::Grok,
        default_base_url: GROK_BASE_URL,
        credential: grok_credential,
        base_url: grok_base_url,
        build: build_grok,
    },
];

fn gemini_credential(config: &AppConfig) -> Option<&SecretString> {
    config.google_api_key.as_ref()
}

fn grok_credential(config: &AppConfig) -> Option<&SecretString> {
    config.grok_api_key.as_ref()
}

fn gemini_base_url(config: &AppConfig) -> Option<&str> {
    config.gemini_base_url.as_deref()
}

fn grok_base_url(config: &AppConfig) -> Option<&str> {
    config.grok_base_url.as_deref()
}

fn build_gemini(config: VisionConfig) -> Result<Arc<dyn CoachProvider>, InferenceError> {
    let engine = GeminiVisionEngine::new(config)?;
    Ok(Arc::new(VisionCoachAdapter::new(engine, CoachProviderKind::Gemini)))
}

fn build_grok(config: VisionConfig) -> Result<Arc<dyn CoachProvider>, InferenceError> {
    let engine = GrokVisionEngine::new(config)?;
    Ok(Arc::new(VisionCoachAdapter::new(engine, CoachProviderKind::Grok)))
}

/// Find the registry entry for a provider kind
#[must_use]
pub fn lookup(kind: CoachProviderKind) -> Option<&'static ProviderEntry> {
    REGISTRY.iter().find(|entry| entry.kind == kind)
}

/// Build the coach provider for a resolved selection
///
/// # Errors
///
/// Returns a configuration error if no entry exists or the engine rejects
/// its settings.
pub fn build_coach_provider(
    provider: &ProviderConfig,
    http_timeout_ms: u64,
) -> Result<Arc<dyn CoachProvider>, ApplicationError> {
    let entry = lookup(provider.kind).ok_or_else(|| {
        ApplicationError::Configuration(format!(
            "No coach provider registered for '{}'",
            provider.kind
        ))
    })?;

    let config = VisionConfig::new(
        provider
            .base_url
            .as_deref()
            .unwrap_or(entry.default_base_url),
        provider.model.clone(),
        Some(provider.credential_str().to_string()),
    )
    .with_timeout_ms(http_timeout_ms);

    let coach = (entry.build)(config).map_err(|e| {
        ApplicationError::Configuration(format!("{} provider: {e}", provider.kind))
    })?;

    info!(provider = %provider.kind, model = %provider.model, "Coach provider ready");

    Ok(coach)
}
