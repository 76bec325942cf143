//! Configuration for vision engines

use serde::{Deserialize, Serialize};

/// Default Gemini REST endpoint
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default xAI endpoint
pub const GROK_BASE_URL: &str = "https://api.x.ai/v1";

/// Configuration for a hosted vision model
#[derive(Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// Base URL of the model API
    pub base_url: String,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    pub model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

const fn default_timeout_ms() -> u64 {
    30000
}

const fn default_max_tokens() -> u32 {
    300
}

const fn default_temperature() -> f32 {
    0.7
}

impl VisionConfig {
    /// Configuration with default sampling settings
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }

    /// Gemini configuration for the given model
    pub fn gemini(model: impl Into<String>, api_key: Option<String>) -> Self {
        Self::new(GEMINI_BASE_URL, model, api_key)
    }

    /// Grok configuration for the given model
    pub fn grok(model: impl Into<String>, api_key: Option<String>) -> Self {
        Self::new(GROK_BASE_URL, model, api_key)
    }

    /// Override the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Base URL without a trailing slash
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {},
            _ => return Err(format!("API key for model '{}' is not set", self.model)),
        }
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }
        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl std::fmt::Debug for VisionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_preset_points_at_google() {
        let config = VisionConfig::gemini("gemini-flash-lite-latest", Some("k".into()));
        assert_eq!(config.base_url, GEMINI_BASE_URL);
        assert_eq!(config.model, "gemini-flash-lite-latest");
        assert_eq!(config.timeout_ms, 30000);
        assert_eq!(config.max_tokens, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn grok_preset_points_at_xai() {
        let config = VisionConfig::grok("grok-3", Some("k".into()));
        assert_eq!(config.base_url, GROK_BASE_URL);
        assert_eq!(config.model, "grok-3");
    }

    #[test]
    fn missing_key_fails_validation() {
        let err = VisionConfig::grok("grok-3", None).validate().unwrap_err();
        assert!(err.contains("grok-3"));
        assert!(VisionConfig::grok("grok-3", Some("  ".into())).validate().is_err());
    }

    #[test]
    fn out_of_range_temperature_fails_validation() {
        let config = VisionConfig {
            temperature: 3.5,
            ..VisionConfig::gemini("m", Some("k".into()))
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let config = VisionConfig::gemini("m", Some("k".into())).with_timeout_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn trimmed_base_url_drops_trailing_slash() {
        let config = VisionConfig::gemini("m", None).with_base_url("http://localhost:9/");
        assert_eq!(config.trimmed_base_url(), "http://localhost:9");
    }

    #[test]
    fn debug_redacts_key() {
        let config = VisionConfig::gemini("m", Some("super-secret".into()));
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("super-secret"));
    }
}
