//! Coaching handler

use application::CoachInput;
use axum::{
    Extension, Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{error::ApiError, middleware::RequestId, state::AppState};

/// Coaching response body
#[derive(Debug, Serialize)]
pub struct CoachResponseBody {
    /// Advice text as spoken
    pub advice: String,
    /// Recognized question
    pub transcript: String,
    /// Language of the reply
    pub language: String,
    /// Synthesized advice, base64 encoded
    pub audio_base64: String,
    /// Format of the synthesized audio
    pub audio_format: String,
    /// Backend that produced the advice
    pub provider: String,
    /// Model that produced the advice
    pub model: String,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(err.body_text())
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Collect the known form fields, ignoring anything else
async fn read_form(mut multipart: Multipart) -> Result<CoachInput, ApiError> {
    let mut input = CoachInput::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "audio" => input.audio = Some(field.bytes().await.map_err(multipart_error)?.to_vec()),
            "image" => input.image = Some(field.bytes().await.map_err(multipart_error)?.to_vec()),
            "game_stats" => input.game_stats = Some(field.text().await.map_err(multipart_error)?),
            "language" => input.language = Some(field.text().await.map_err(multipart_error)?),
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(input)
}

/// Answer a spoken question about the current game
///
/// Accepts a multipart form with `audio`, `image`, `game_stats` and an
/// optional `language`.
#[instrument(skip_all, fields(request_id = %request_id))]
pub async fn coach(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CoachResponseBody>, ApiError> {
    let Some(dispatcher) = state.dispatcher().cloned() else {
        let reason = state
            .not_ready_reason()
            .unwrap_or("coaching pipeline is not configured")
            .to_string();
        return Err(ApiError::ServiceUnavailable(reason));
    };

    let multipart = multipart.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let input = read_form(multipart).await?;
    let outcome = dispatcher.dispatch(&request_id.context(), input).await?;

    info!(
        provider = %outcome.provider,
        model = %outcome.model,
        audio_bytes = outcome.response.audio.len(),
        "Coaching request completed"
    );

    Ok(Json(CoachResponseBody {
        advice: outcome.response.advice,
        transcript: outcome.transcript.text,
        language: outcome.language.code().to_string(),
        audio_base64: STANDARD.encode(&outcome.response.audio),
        audio_format: outcome.response.audio_format.extension().to_string(),
        provider: outcome.provider.as_str().to_string(),
        model: outcome.model,
    }))
}
