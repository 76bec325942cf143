//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
use domain::{AudioFormat, Language, Transcript};
#[cfg(test)]
use mockall::automock;

use crate::error::UpstreamFailure;

/// Result of a speech synthesis operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe the player's question (Speech-to-Text)
    ///
    /// Silent or unintelligible audio yields an empty [`Transcript`], not an
    /// error.
    ///
    /// # Arguments
    /// * `audio_data` - Raw audio bytes
    /// * `format` - Format of the audio
    /// * `language_hint` - Language the player is expected to speak
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        language_hint: Option<Language>,
    ) -> Result<Transcript, UpstreamFailure>;

    /// Synthesize the coach's advice (Text-to-Speech)
    async fn synthesize(
        &self,
        text: String,
        language: Language,
    ) -> Result<SynthesisResult, UpstreamFailure>;

    /// Format produced by [`SpeechPort::synthesize`]
    fn output_format(&self) -> AudioFormat;
}
