//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::VisionConfig;
use crate::error::InferenceError;
use crate::ports::{TokenUsage, VisionEngine, VisionRequest, VisionResponse};

/// Vision engine backed by Google Gemini
pub struct GeminiVisionEngine {
    client: Client,
    config: VisionConfig,
}

impl std::fmt::Debug for GeminiVisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiVisionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiVisionEngine {
    /// Create a new Gemini engine
    ///
    /// Fails when the configuration does not validate.
    pub fn new(config: VisionConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini vision engine"
        );

        Ok(Self { client, config })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.trimmed_base_url(),
            self.config.model
        )
    }

    fn build_request(&self, request: VisionRequest) -> GenerateContentRequest {
        let mut parts = vec![Part::Text(request.user_text)];
        if let Some(image) = request.image {
            parts.push(Part::InlineData(InlineData {
                data: image.to_base64(),
                mime_type: image.mime_type,
            }));
        }

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text(request.system)],
            }),
            generation_config: Some(GenerationConfig {
                temperature: Some(request.temperature.unwrap_or(self.config.temperature)),
                max_output_tokens: Some(request.max_tokens.unwrap_or(self.config.max_tokens)),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

/// Response part; inline data and thought signatures are ignored
#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[async_trait]
impl VisionEngine for GeminiVisionEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: VisionRequest) -> Result<VisionResponse, InferenceError> {
        let body = self.build_request(request);

        debug!("Sending request to Gemini");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", self.config.api_key.as_deref().unwrap_or_default())
            .json(&body)
            .send()
            .await
            .map_err(|e| match InferenceError::from(e) {
                InferenceError::Timeout(_) => InferenceError::Timeout(self.config.timeout_ms),
                other => other,
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Gemini request failed");
            return Err(InferenceError::from_status(
                status,
                &body,
                &self.config.model,
                self.config.timeout_ms,
            ));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::from_body_error(&e, self.config.timeout_ms))?;

        let content = parsed.text().ok_or_else(|| {
            InferenceError::InvalidResponse("Gemini returned no text candidates".to_string())
        })?;

        let usage = parsed.usage_metadata.as_ref().map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });
        let finish_reason = parsed
            .candidates
            .first()
            .and_then(|c| c.finish_reason.clone());

        debug!(tokens = ?usage, finish_reason = ?finish_reason, "Gemini completed");

        Ok(VisionResponse {
            content,
            model: parsed
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
            usage,
            finish_reason,
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }
}
