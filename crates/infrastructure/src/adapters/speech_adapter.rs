//! Speech adapter - Implements SpeechPort using the ai_speech crate

use std::sync::Arc;

use ai_speech::{
    AudioData, OpenAISpeechProvider, SpeechConfig, SpeechError, SpeechToText, TextToSpeech,
};
use application::error::{ApplicationError, UpstreamFailure};
use application::ports::{SpeechPort, SynthesisResult};
use async_trait::async_trait;
use domain::{AudioFormat, Language, Transcript};
use tracing::{debug, instrument};

/// Adapter for speech services using the OpenAI provider
pub struct SpeechAdapter {
    provider: Arc<OpenAISpeechProvider>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("provider", &"OpenAISpeechProvider")
            .field("stt_model", &self.provider.config().stt_model)
            .field("tts_model", &self.provider.config().tts_model)
            .finish()
    }
}

impl SpeechAdapter {
    /// Create a new speech adapter
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the OpenAI key is missing or the
    /// settings are out of range.
    pub fn new(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let provider = OpenAISpeechProvider::new(config).map_err(|e: SpeechError| {
            ApplicationError::Configuration(format!("OPENAI_API_KEY / speech settings: {e}"))
        })?;

        Ok(Self {
            provider: Arc::new(provider),
        })
    }

    /// Classify a speech error for the pipeline
    pub fn map_error(err: SpeechError) -> UpstreamFailure {
        let detail = err.to_string();
        match err {
            SpeechError::Timeout(_) => UpstreamFailure::timeout(detail),
            SpeechError::RateLimited => UpstreamFailure::rate_limited(detail),
            SpeechError::InvalidResponse(_) => UpstreamFailure::malformed(detail),
            SpeechError::ConnectionFailed(_)
            | SpeechError::RequestFailed(_)
            | SpeechError::InvalidAudio(_)
            | SpeechError::TranscriptionFailed(_)
            | SpeechError::SynthesisFailed(_)
            | SpeechError::Configuration(_)
            | SpeechError::ModelNotAvailable(_)
            | SpeechError::ServiceUnavailable(_) => UpstreamFailure::unavailable(detail),
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, audio_data), fields(format = %format, data_size = audio_data.len()))]
    async fn transcribe(
        &self,
        audio_data: Vec<u8>,
        format: AudioFormat,
        language_hint: Option<Language>,
    ) -> Result<Transcript, UpstreamFailure> {
        let audio = AudioData::new(audio_data, format);
        let hint = language_hint.map(|l| l.iso_code());

        let transcription = self
            .provider
            .transcribe(audio, hint)
            .await
            .map_err(Self::map_error)?;

        let language = transcription
            .language
            .as_deref()
            .and_then(|l| l.parse::<Language>().ok())
            .or(language_hint);

        debug!(
            text_len = transcription.text.len(),
            language = ?language,
            "Transcription adapted"
        );

        if transcription.is_empty() {
            return Ok(Transcript::empty(language));
        }
        Ok(Transcript::new(transcription.text, language))
    }

    #[instrument(skip(self, text), fields(text_len = text.len(), language = %language))]
    async fn synthesize(
        &self,
        text: String,
        language: Language,
    ) -> Result<SynthesisResult, UpstreamFailure> {
        // OpenAI voices pick up the language from the text itself
        let audio = self
            .provider
            .synthesize(&text, None)
            .await
            .map_err(Self::map_error)?;

        let format = audio.format();
        Ok(SynthesisResult {
            audio_data: audio.into_data(),
            format,
        })
    }

    fn output_format(&self) -> AudioFormat {
        self.provider.config().output_format
    }
}
