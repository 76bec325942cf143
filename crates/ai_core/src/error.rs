//! Inference errors

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to inference server
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to inference server failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Model not found or not enabled for this key
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Response parsing failed or carried no usable text
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),

    /// Missing credentials or unusable settings
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl InferenceError {
    /// Classify a non-success HTTP status from a model API
    pub fn from_status(status: StatusCode, body: &str, model: &str, timeout_ms: u64) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::Timeout(timeout_ms),
            StatusCode::NOT_FOUND => Self::ModelNotAvailable(model.to_string()),
            s if s.is_server_error() => Self::ServerError(format!("Status {s}: {body}")),
            s => Self::RequestFailed(format!("Status {s}: {body}")),
        }
    }

    /// Classify a failure while reading the body of a successful response
    pub fn from_body_error(err: &reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout_ms)
        } else {
            Self::InvalidResponse(err.to_string())
        }
    }
}

impl From<reqwest::Error> for InferenceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
