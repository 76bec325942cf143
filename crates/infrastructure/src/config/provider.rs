//! Coach provider selection.

use std::fmt;
use std::str::FromStr;

use application::ApplicationError;
use domain::CoachProviderKind;
use secrecy::{ExposeSecret, SecretString};

use super::AppConfig;
use crate::adapters::coach_registry;

/// The coach backend selected for this process
///
/// Resolved once at startup from `COACH_PROVIDER`, `COACH_MODEL` and the
/// matching credential, then shared read-only.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Backend kind
    pub kind: CoachProviderKind,
    /// Model identifier
    pub model: String,
    /// API base URL override
    pub base_url: Option<String>,
    credential: SecretString,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("credential", &"[REDACTED]")
            .finish()
    }
}

impl ProviderConfig {
    /// Create a provider selection directly
    pub fn new(
        kind: CoachProviderKind,
        model: impl Into<String>,
        credential: SecretString,
    ) -> Self {
        Self {
            kind,
            model: model.into(),
            base_url: None,
            credential,
        }
    }

    /// Resolve the selection from application configuration
    ///
    /// An unknown provider name, a provider without a registry entry, or a
    /// missing credential is a configuration error.
    pub fn resolve(config: &AppConfig) -> Result<Self, ApplicationError> {
        let kind = match config.coach_provider.as_deref().map(str::trim) {
            None | Some("") => CoachProviderKind::default(),
            Some(name) => CoachProviderKind::from_str(name)
                .map_err(|e| ApplicationError::Configuration(e.to_string()))?,
        };

        let entry = coach_registry::lookup(kind).ok_or_else(|| {
            ApplicationError::Configuration(format!("No coach provider registered for '{kind}'"))
        })?;

        let credential = (entry.credential)(config)
            .filter(|key| !key.expose_secret().trim().is_empty())
            .cloned()
            .ok_or_else(|| {
                ApplicationError::Configuration(format!(
                    "{} is required when COACH_PROVIDER={kind}",
                    kind.credential_env()
                ))
            })?;

        let model = config
            .coach_model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| kind.default_model())
            .to_string();

        Ok(Self {
            kind,
            model,
            base_url: (entry.base_url)(config).map(str::to_string),
            credential,
        })
    }

    /// Override the API base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Get the credential as a string reference (for API calls)
    #[must_use]
    pub fn credential_str(&self) -> &str {
        self.credential.expose_secret()
    }
}
