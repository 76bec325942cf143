//! Port definitions for vision engines
//!
//! Defines the trait (port) that multimodal model adapters must implement.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Image attached to a vision request
#[derive(Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// MIME type, e.g. `image/png`
    pub mime_type: String,
    /// Raw image bytes
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Create a new inline image
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Image bytes as standard base64
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Image as a `data:` URI
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }
}

impl std::fmt::Debug for InlineImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineImage")
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// A single-turn request to a vision model
#[derive(Debug, Clone)]
pub struct VisionRequest {
    /// System instruction
    pub system: String,
    /// User text sent alongside the image
    pub user_text: String,
    /// Screenshot, if any
    pub image: Option<InlineImage>,
    /// Maximum tokens to generate (overrides config)
    pub max_tokens: Option<u32>,
    /// Temperature (overrides config)
    pub temperature: Option<f32>,
}

impl VisionRequest {
    /// Create a request with system and user text
    pub fn new(system: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user_text: user_text.into(),
            image: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Attach an image
    #[must_use]
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Set temperature
    #[must_use]
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set max tokens
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Response from a vision model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionResponse {
    /// Generated text
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason as reported by the API
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for vision engine implementations
#[async_trait]
pub trait VisionEngine: Send + Sync {
    /// Generate a complete response
    async fn generate(&self, request: VisionRequest) -> Result<VisionResponse, InferenceError>;

    /// Model this engine sends requests to
    fn model(&self) -> &str;

    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;
}
