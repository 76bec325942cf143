//! Grok chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::config::VisionConfig;
use crate::error::InferenceError;
use crate::ports::{TokenUsage, VisionEngine, VisionRequest, VisionResponse};

/// Vision engine backed by xAI Grok
pub struct GrokVisionEngine {
    client: Client,
    config: VisionConfig,
}

impl std::fmt::Debug for GrokVisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrokVisionEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GrokVisionEngine {
    /// Create a new Grok engine
    pub fn new(config: VisionConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Grok vision engine"
        );

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.trimmed_base_url())
    }

    fn build_request(&self, request: VisionRequest) -> ChatRequest {
        let mut user_parts = vec![ContentPart::Text {
            text: request.user_text,
        }];
        if let Some(image) = request.image {
            user_parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: image.to_data_uri(),
                    detail: "high",
                },
            });
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(request.system),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Parts(user_parts),
                },
            ],
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            stream: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
    detail: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

#[async_trait]
impl VisionEngine for GrokVisionEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(&self, request: VisionRequest) -> Result<VisionResponse, InferenceError> {
        let body = self.build_request(request);

        debug!("Sending request to Grok");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
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
            warn!(status = %status, body = %body, "Grok request failed");
            return Err(InferenceError::from_status(
                status,
                &body,
                &self.config.model,
                self.config.timeout_ms,
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::from_body_error(&e, self.config.timeout_ms))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("Grok returned no choices".into()))?;

        let content = choice
            .message
            .content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| InferenceError::InvalidResponse("Grok returned empty content".into()))?;

        let usage = parsed.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        debug!(tokens = ?usage, "Grok completed");

        Ok(VisionResponse {
            content,
            model: parsed.model.unwrap_or_else(|| self.config.model.clone()),
            usage,
            finish_reason: choice.finish_reason,
        })
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    fn provider_name(&self) -> &'static str {
        "grok"
    }
}
