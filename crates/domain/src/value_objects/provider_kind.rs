//! Coach provider kind

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Vision-capable model backend used for coaching analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachProviderKind {
    /// Google Gemini
    #[default]
    Gemini,
    /// xAI Grok
    Grok,
}

impl CoachProviderKind {
    /// Every known provider
    pub const ALL: [Self; 2] = [Self::Gemini, Self::Grok];

    /// Model used when none is configured
    #[must_use]
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-flash-lite-latest",
            Self::Grok => "grok-3",
        }
    }

    /// Environment variable holding this provider's credential
    #[must_use]
    pub const fn credential_env(&self) -> &'static str {
        match self {
            Self::Gemini => "GOOGLE_API_KEY",
            Self::Grok => "GROK_API_KEY",
        }
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Grok => "grok",
        }
    }
}

impl fmt::Display for CoachProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoachProviderKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "grok" => Ok(Self::Grok),
            _ => Err(DomainError::UnknownProvider(s.trim().to_string())),
        }
    }
}
