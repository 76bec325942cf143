//! AI Core - Vision model clients for game coaching
//!
//! Provides a single [`VisionEngine`] abstraction over the hosted multimodal
//! models that read a game screenshot and answer a player's question.
//! Two backends are implemented: Google Gemini (`generateContent`) and
//! xAI Grok (OpenAI-compatible chat completions).

pub mod config;
pub mod error;
pub mod gemini;
pub mod grok;
pub mod ports;

pub use config::{GEMINI_BASE_URL, GROK_BASE_URL, VisionConfig};
pub use error::InferenceError;
pub use gemini::GeminiVisionEngine;
pub use grok::GrokVisionEngine;
pub use ports::{InlineImage, TokenUsage, VisionEngine, VisionRequest, VisionResponse};
