//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A required payload was not supplied or is empty
    #[error("{0} payload is empty")]
    EmptyPayload(&'static str),

    /// A payload exceeds its configured size ceiling
    #[error("{what} payload too large: {size_bytes} bytes exceeds maximum of {max_bytes} bytes")]
    PayloadTooLarge {
        /// Which payload was too large
        what: &'static str,
        /// Actual size
        size_bytes: usize,
        /// Configured ceiling
        max_bytes: usize,
    },

    /// Image bytes do not match a supported format
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Audio bytes do not match a supported format
    #[error("Invalid audio: {0}")]
    InvalidAudio(String),

    /// Game statistics failed schema validation
    #[error("Invalid game stats: {0}")]
    InvalidGameStats(String),

    /// Language is not supported
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Coach provider name is not recognized
    #[error("Unknown coach provider: {0}")]
    UnknownProvider(String),
}

impl DomainError {
    /// Whether the error was caused by a payload exceeding its size ceiling
    #[must_use]
    pub const fn is_too_large(&self) -> bool {
        matches!(self, Self::PayloadTooLarge { .. })
    }
}
