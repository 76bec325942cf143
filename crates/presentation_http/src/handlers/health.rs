//! Health check handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Service name reported by the liveness check
pub const SERVICE_NAME: &str = "sensei-lol-coach";

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Liveness check - is the server running?
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stt_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_model: Option<String>,
    /// Format of the synthesized reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<String>,
    /// Why the pipeline is not configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Readiness check - is the coaching pipeline configured?
///
/// Reports configuration only; upstream providers are not contacted.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.dispatcher() {
        Some(dispatcher) => {
            let speech = state.config.speech_config();
            (
                StatusCode::OK,
                Json(ReadinessResponse {
                    ready: true,
                    provider: Some(dispatcher.provider().as_str().to_string()),
                    model: Some(dispatcher.model()),
                    stt_model: Some(speech.stt_model),
                    tts_model: Some(speech.tts_model),
                    audio_format: Some(dispatcher.audio_format().extension().to_string()),
                    reason: None,
                }),
            )
        },
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadinessResponse {
                ready: false,
                provider: None,
                model: None,
                stt_model: None,
                tts_model: None,
                audio_format: None,
                reason: state.not_ready_reason().map(str::to_string),
            }),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrastructure::AppConfig;

    #[tokio::test]
    async fn health_reports_service_name() {
        let Json(body) = health_check().await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.service, SERVICE_NAME);
    }

    #[tokio::test]
    async fn not_ready_is_503_with_reason() {
        let state = AppState::not_ready("GOOGLE_API_KEY is required", AppConfig::default());
        let response = readiness_check(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["ready"], false);
        assert_eq!(body["reason"], "GOOGLE_API_KEY is required");
        assert!(body.get("provider").is_none());
    }
}
