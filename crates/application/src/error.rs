//! Application-level errors

use std::fmt;

use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Pipeline stage that talks to an upstream provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Speech-to-text
    Transcription,
    /// Coach model analysis
    Analysis,
    /// Text-to-speech
    Synthesis,
}

impl PipelineStage {
    /// Lowercase identifier used in logs and error bodies
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transcription => "transcription",
            Self::Analysis => "analysis",
            Self::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of an upstream provider failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpstreamErrorKind {
    /// The call did not finish in time
    Timeout,
    /// The provider rejected the call due to quota or rate limits
    RateLimited,
    /// The provider answered with something we could not use
    MalformedResponse,
    /// The provider could not be reached or failed internally
    Unavailable,
}

impl UpstreamErrorKind {
    /// Lowercase identifier used in logs and error bodies
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::RateLimited => "rate_limited",
            Self::MalformedResponse => "malformed_response",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for UpstreamErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a port implementation
///
/// Ports do not know which pipeline stage they serve; the dispatcher
/// attaches the stage when converting into [`ApplicationError::Upstream`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct UpstreamFailure {
    /// Failure classification
    pub kind: UpstreamErrorKind,
    /// Human-readable detail for logs, never sent to clients
    pub detail: String,
}

impl UpstreamFailure {
    /// Create a failure of the given kind
    pub fn new(kind: UpstreamErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Shorthand for a timeout
    pub fn timeout(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Timeout, detail)
    }

    /// Shorthand for a rate-limit rejection
    pub fn rate_limited(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::RateLimited, detail)
    }

    /// Shorthand for an unusable response
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::MalformedResponse, detail)
    }

    /// Shorthand for an unreachable or failing provider
    pub fn unavailable(detail: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Unavailable, detail)
    }
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level validation error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request is missing something or is malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The service is not configured to handle requests
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An upstream provider failed during a pipeline stage
    #[error("Upstream {kind} during {stage}: {detail}")]
    Upstream {
        /// Stage that failed
        stage: PipelineStage,
        /// Failure classification
        kind: UpstreamErrorKind,
        /// Detail for logs
        detail: String,
    },
}

impl ApplicationError {
    /// Attach a pipeline stage to a port failure
    #[must_use]
    pub fn upstream(stage: PipelineStage, failure: UpstreamFailure) -> Self {
        Self::Upstream {
            stage,
            kind: failure.kind,
            detail: failure.detail,
        }
    }

    /// Whether the caller sent a request we refuse to process
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::InvalidRequest(_))
    }

    /// Whether a payload exceeded its size ceiling
    #[must_use]
    pub const fn is_too_large(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_too_large())
    }

    /// Stage and kind for upstream failures
    #[must_use]
    pub const fn upstream_parts(&self) -> Option<(PipelineStage, UpstreamErrorKind)> {
        match self {
            Self::Upstream { stage, kind, .. } => Some((*stage, *kind)),
            _ => None,
        }
    }
}
