//! API error handling
//!
//! Maps the application error taxonomy onto HTTP responses. Upstream
//! failures expose only the pipeline stage and failure kind, never provider
//! bodies or credentials.

use application::{ApplicationError, PipelineStage, UpstreamErrorKind};
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Upstream {kind} during {stage}")]
    Upstream {
        stage: PipelineStage,
        kind: UpstreamErrorKind,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Pipeline stage that failed (upstream errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<PipelineStage>,
    /// Failure kind (upstream errors only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<UpstreamErrorKind>,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream {
                kind: UpstreamErrorKind::Timeout,
                ..
            } => StatusCode::GATEWAY_TIMEOUT,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: "Invalid request".to_string(),
                code: "invalid_request".to_string(),
                details: Some(msg),
                stage: None,
                kind: None,
            },
            Self::PayloadTooLarge(msg) => ErrorResponse {
                error: "Payload too large".to_string(),
                code: "payload_too_large".to_string(),
                details: Some(msg),
                stage: None,
                kind: None,
            },
            Self::ServiceUnavailable(msg) => ErrorResponse {
                error: "Service not configured".to_string(),
                code: "configuration_error".to_string(),
                details: Some(msg),
                stage: None,
                kind: None,
            },
            Self::Upstream { stage, kind } => ErrorResponse {
                error: format!("Upstream provider failed during {stage}"),
                code: "upstream_error".to_string(),
                details: None,
                stage: Some(stage),
                kind: Some(kind),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Reshape bare 413 responses from the body limit layer into [`ErrorResponse`]
pub async fn json_payload_too_large(response: Response) -> Response {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));

    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return ApiError::PayloadTooLarge("request body exceeds the configured limit".to_string())
            .into_response();
    }
    response
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_too_large() {
            return Self::PayloadTooLarge(err.to_string());
        }
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidRequest(msg) => Self::BadRequest(msg),
            ApplicationError::Configuration(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Upstream { stage, kind, .. } => Self::Upstream { stage, kind },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::DomainError;

    #[test]
    fn invalid_request_is_400() {
        let err = ApiError::from(ApplicationError::InvalidRequest("missing 'audio'".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn domain_errors_are_400() {
        let err = ApiError::from(ApplicationError::Domain(DomainError::InvalidImage(
            "unknown magic bytes".into(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_payload_is_413() {
        let err = ApiError::from(ApplicationError::Domain(DomainError::PayloadTooLarge {
            what: "image",
            size_bytes: 20,
            max_bytes: 10,
        }));
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn configuration_is_503() {
        let err = ApiError::from(ApplicationError::Configuration("no key".into()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_timeout_is_504_and_others_502() {
        let timeout = ApiError::from(ApplicationError::Upstream {
            stage: PipelineStage::Analysis,
            kind: UpstreamErrorKind::Timeout,
            detail: "deadline".into(),
        });
        assert_eq!(timeout.status(), StatusCode::GATEWAY_TIMEOUT);

        for kind in [
            UpstreamErrorKind::RateLimited,
            UpstreamErrorKind::MalformedResponse,
            UpstreamErrorKind::Unavailable,
        ] {
            let err = ApiError::from(ApplicationError::Upstream {
                stage: PipelineStage::Synthesis,
                kind,
                detail: String::new(),
            });
            assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        }
    }

    #[tokio::test]
    async fn plain_413_is_rewritten_as_json() {
        let plain = (StatusCode::PAYLOAD_TOO_LARGE, "length limit exceeded").into_response();

        let response = json_payload_too_large(plain).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "payload_too_large");
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let ok = (StatusCode::OK, "fine").into_response();
        assert_eq!(json_payload_too_large(ok).await.status(), StatusCode::OK);

        let json_413 = ApiError::PayloadTooLarge("image".into()).into_response();
        let response = json_payload_too_large(json_413).await;
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["details"], "image");
    }

    #[test]
    fn upstream_body_carries_stage_and_kind_only() {
        let err = ApiError::from(ApplicationError::Upstream {
            stage: PipelineStage::Transcription,
            kind: UpstreamErrorKind::RateLimited,
            detail: "sk-secret quota body".into(),
        });
        let ApiError::Upstream { stage, kind } = err else {
            panic!("expected upstream error");
        };
        let body = ErrorResponse {
            error: String::new(),
            code: "upstream_error".into(),
            details: None,
            stage: Some(stage),
            kind: Some(kind),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stage"], "transcription");
        assert_eq!(json["kind"], "rate_limited");
        assert!(json.get("details").is_none());
    }
}
