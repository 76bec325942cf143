//! Application configuration
//!
//! Loaded once at startup from an optional `config.toml` and the process
//! environment. Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `limits`: upload ceilings and upstream deadlines
//! - `provider`: the resolved coach provider selection

mod limits;
mod provider;
mod server;

use ai_speech::SpeechConfig;
use application::services::DispatcherConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

pub use limits::{LimitsConfig, TimeoutsConfig, dispatcher_config};
pub use provider::ProviderConfig;
pub use server::ServerConfig;

/// Main application configuration
///
/// Top-level keys map one-to-one to environment variables
/// (`OPENAI_API_KEY`, `COACH_PROVIDER`, ...). Nested sections use a double
/// underscore (`SERVER__PORT`, `LIMITS__MAX_FILE_SIZE_BYTES`).
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upload ceilings
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Upstream deadlines
    #[serde(default)]
    pub timeouts: TimeoutsConfig,

    /// Coach backend name (`gemini` or `grok`)
    #[serde(default)]
    pub coach_provider: Option<String>,

    /// Model for the coach backend (defaults per provider)
    #[serde(default)]
    pub coach_model: Option<String>,

    /// OpenAI key for transcription and synthesis
    #[serde(default, skip_serializing)]
    pub openai_api_key: Option<SecretString>,

    /// Google key, required when the provider is Gemini
    #[serde(default, skip_serializing)]
    pub google_api_key: Option<SecretString>,

    /// xAI key, required when the provider is Grok
    #[serde(default, skip_serializing)]
    pub grok_api_key: Option<SecretString>,

    /// Override for the OpenAI API base URL
    #[serde(default)]
    pub openai_base_url: Option<String>,

    /// Override for the Gemini API base URL
    #[serde(default)]
    pub gemini_base_url: Option<String>,

    /// Override for the xAI API base URL
    #[serde(default)]
    pub grok_base_url: Option<String>,

    /// Transcription model override
    #[serde(default)]
    pub openai_stt_model: Option<String>,

    /// Synthesis model override
    #[serde(default)]
    pub openai_tts_model: Option<String>,

    /// Synthesis voice override
    #[serde(default)]
    pub openai_tts_voice: Option<String>,

    /// Synthesis speed override
    #[serde(default)]
    pub openai_tts_speed: Option<f32>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &Option<SecretString>| s.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("limits", &self.limits)
            .field("timeouts", &self.timeouts)
            .field("coach_provider", &self.coach_provider)
            .field("coach_model", &self.coach_model)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("google_api_key", &redact(&self.google_api_key))
            .field("grok_api_key", &redact(&self.grok_api_key))
            .field("openai_base_url", &self.openai_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("grok_base_url", &self.grok_base_url)
            .field("openai_stt_model", &self.openai_stt_model)
            .field("openai_tts_model", &self.openai_tts_model)
            .field("openai_tts_voice", &self.openai_tts_voice)
            .field("openai_tts_speed", &self.openai_tts_speed)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from an optional `config.toml` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Check ceilings and deadlines
    pub fn validate(&self) -> Result<(), String> {
        self.limits
            .validate()
            .map_err(|e| format!("limits: {e}"))?;
        self.timeouts
            .validate()
            .map_err(|e| format!("timeouts: {e}"))?;
        Ok(())
    }

    /// Get the OpenAI key as a string reference (for API calls)
    #[must_use]
    pub fn openai_api_key_str(&self) -> Option<&str> {
        self.openai_api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Speech settings for the OpenAI provider
    #[must_use]
    pub fn speech_config(&self) -> SpeechConfig {
        let defaults = SpeechConfig::default();
        SpeechConfig {
            openai_api_key: self.openai_api_key_str().map(str::to_string),
            openai_base_url: self
                .openai_base_url
                .clone()
                .unwrap_or(defaults.openai_base_url),
            stt_model: self.openai_stt_model.clone().unwrap_or(defaults.stt_model),
            tts_model: self.openai_tts_model.clone().unwrap_or(defaults.tts_model),
            default_voice: self
                .openai_tts_voice
                .clone()
                .unwrap_or(defaults.default_voice),
            speed: self.openai_tts_speed.unwrap_or(defaults.speed),
            timeout_ms: self.timeouts.http_timeout_ms,
            ..defaults
        }
    }

    /// Pipeline settings for the dispatcher
    #[must_use]
    pub fn dispatcher_config(&self) -> DispatcherConfig {
        dispatcher_config(&self.limits, &self.timeouts)
    }
}
