//! Speech processing traits
//!
//! Providers implement these; the infrastructure layer adapts them to the
//! application's `SpeechPort`.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Speech-to-text capability
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Arguments
    ///
    /// * `audio` - The recorded audio
    /// * `language` - Optional ISO-639-1 hint (e.g. "en", "fa")
    async fn transcribe(
        &self,
        audio: AudioData,
        language: Option<&str>,
    ) -> Result<Transcription, SpeechError>;

    /// Name of the transcription model
    fn model_name(&self) -> &str;
}

/// Text-to-speech capability
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize speech from text
    ///
    /// Uses the configured voice when `voice` is `None`.
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError>;

    /// Name of the synthesis model
    fn model_name(&self) -> &str;

    /// Voice used when none is requested
    fn default_voice(&self) -> &str;
}
