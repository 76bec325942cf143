//! OpenAI Speech Provider
//!
//! Implements `SpeechToText` using the OpenAI transcription API and
//! `TextToSpeech` using the OpenAI speech API.
//!
//! # Supported Audio Formats
//!
//! ## STT
//! - wav, mp3, m4a, aac, ogg, flac
//!
//! ## TTS
//! - wav (default), mp3, aac, flac, opus

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::{SpeechToText, TextToSpeech};
use crate::types::{AudioData, AudioFormat, Transcription};

/// OpenAI TTS rejects inputs longer than this
const MAX_TTS_INPUT_CHARS: usize = 4096;

/// Failure while reading the body of a successful response
fn body_read_error(err: &reqwest::Error, timeout_ms: u64, what: &str) -> SpeechError {
    if err.is_timeout() {
        SpeechError::Timeout(timeout_ms)
    } else {
        SpeechError::InvalidResponse(format!("{what}: {err}"))
    }
}

/// OpenAI speech provider implementing both STT and TTS
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAISpeechProvider {
    /// Create a new OpenAI speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &SpeechConfig {
        &self.config
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        self.config.openai_api_key.as_deref().unwrap_or_default()
    }

    /// Build the STT endpoint URL
    fn stt_url(&self) -> String {
        format!("{}/audio/transcriptions", self.config.openai_base_url)
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.openai_base_url)
    }

    /// Convert AudioFormat to OpenAI TTS response format string
    const fn audio_format_to_response_format(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "opus",
            AudioFormat::M4a | AudioFormat::Aac => "aac",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
        }
    }

    /// Convert a failed response into a `SpeechError`
    ///
    /// `on_other` builds the error for failures that are neither rate
    /// limits, timeouts nor server-side outages.
    async fn error_from_response(
        &self,
        response: Response,
        model: &str,
        on_other: fn(String) -> SpeechError,
    ) -> SpeechError {
        let status = response.status();
        let error_body = response.text().await.unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return SpeechError::RateLimited;
        }
        if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
            return SpeechError::Timeout(self.config.timeout_ms);
        }
        if status.is_server_error() {
            return SpeechError::ServiceUnavailable(format!("HTTP {status}"));
        }

        if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
            return match api_error.error.code.as_deref() {
                Some("rate_limit_exceeded" | "insufficient_quota") => SpeechError::RateLimited,
                Some("model_not_found") => SpeechError::ModelNotAvailable(model.to_string()),
                _ => on_other(api_error.error.message),
            };
        }

        on_other(format!("HTTP {status}"))
    }
}

/// OpenAI transcription response (`response_format=json`)
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    duration: Option<f64>,
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    speed: f32,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl SpeechToText for OpenAISpeechProvider {
    #[instrument(skip(self, audio), fields(
        audio_size = audio.size_bytes(),
        format = %audio.format(),
        model = %self.config.stt_model,
    ))]
    async fn transcribe(
        &self,
        audio: AudioData,
        language: Option<&str>,
    ) -> Result<Transcription, SpeechError> {
        debug!(language = ?language, "Transcribing audio with OpenAI");

        if audio.is_empty() {
            return Err(SpeechError::InvalidAudio("Audio data is empty".to_string()));
        }

        let filename = audio.filename("audio");
        let mime_type = audio.mime_type();
        let data = audio.into_data();

        let file_part = Part::bytes(data)
            .file_name(filename)
            .mime_str(mime_type)
            .map_err(|e| SpeechError::InvalidAudio(format!("Invalid MIME type: {e}")))?;

        let mut form = Form::new()
            .part("file", file_part)
            .text("model", self.config.stt_model.clone())
            .text("response_format", "json")
            .text("temperature", self.config.stt_temperature.to_string())
            .text("prompt", self.config.stt_prompt.clone());

        if let Some(lang) = language {
            form = form.text("language", lang.to_string());
        }

        let response = self
            .client
            .post(self.stt_url())
            .bearer_auth(self.api_key())
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = self
                .error_from_response(
                    response,
                    &self.config.stt_model,
                    SpeechError::TranscriptionFailed,
                )
                .await;
            warn!(error = %err, "OpenAI transcription request failed");
            return Err(err);
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| {
                body_read_error(&e, self.config.timeout_ms, "Failed to parse response")
            })?;

        debug!(text_len = body.text.len(), "Transcription complete");

        let mut transcription = Transcription::new(body.text.trim());

        if let Some(lang) = body.language.as_deref().or(language) {
            transcription = transcription.with_language(lang);
        }

        if let Some(duration) = body.duration {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let duration_ms = (duration * 1000.0) as u64;
            transcription = transcription.with_duration(duration_ms);
        }

        Ok(transcription)
    }

    fn model_name(&self) -> &str {
        &self.config.stt_model
    }
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    #[instrument(skip(self, text), fields(
        text_len = text.len(),
        model = %self.config.tts_model,
        format = %self.config.output_format,
    ))]
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError> {
        debug!("Synthesizing speech with OpenAI TTS");

        if text.trim().is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        if text.chars().count() > MAX_TTS_INPUT_CHARS {
            return Err(SpeechError::SynthesisFailed(format!(
                "Text too long: exceeds {MAX_TTS_INPUT_CHARS} character limit"
            )));
        }

        let voice = voice.unwrap_or(&self.config.default_voice);
        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: Self::audio_format_to_response_format(self.config.output_format),
            speed: self.config.speed,
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = self
                .error_from_response(response, &self.config.tts_model, SpeechError::SynthesisFailed)
                .await;
            warn!(error = %err, "OpenAI speech request failed");
            return Err(err);
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| body_read_error(&e, self.config.timeout_ms, "Failed to read audio"))?;

        if audio_bytes.is_empty() {
            return Err(SpeechError::InvalidResponse(
                "Speech API returned no audio".to_string(),
            ));
        }

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(audio_bytes.to_vec(), self.config.output_format))
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }

    fn default_voice(&self) -> &str {
        &self.config.default_voice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(mock_server: &MockServer) -> OpenAISpeechProvider {
        let config = SpeechConfig {
            openai_api_key: Some("test-api-key".to_string()),
            openai_base_url: mock_server.uri(),
            ..Default::default()
        };
        OpenAISpeechProvider::new(config).unwrap()
    }

    #[test]
    fn new_rejects_missing_key() {
        let result = OpenAISpeechProvider::new(SpeechConfig::default());
        assert!(matches!(result, Err(SpeechError::Configuration(_))));
    }

    #[tokio::test]
    async fn body_timeout_maps_to_timeout() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;
        let client = Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();

        let err = client.get(mock_server.uri()).send().await.unwrap_err();

        assert!(matches!(
            body_read_error(&err, 50, "Failed to read audio"),
            SpeechError::Timeout(50)
        ));
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_response() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let err = Client::new()
            .get(mock_server.uri())
            .send()
            .await
            .unwrap()
            .json::<TranscriptionResponse>()
            .await
            .unwrap_err();

        assert!(matches!(
            body_read_error(&err, 50, "Failed to parse response"),
            SpeechError::InvalidResponse(msg) if msg.starts_with("Failed to parse response")
        ));
    }

    #[test]
    fn response_format_mapping() {
        assert_eq!(
            OpenAISpeechProvider::audio_format_to_response_format(AudioFormat::Wav),
            "wav"
        );
        assert_eq!(
            OpenAISpeechProvider::audio_format_to_response_format(AudioFormat::Ogg),
            "opus"
        );
        assert_eq!(
            OpenAISpeechProvider::audio_format_to_response_format(AudioFormat::M4a),
            "aac"
        );
    }

    mod stt_tests {
        use super::*;

        #[tokio::test]
        async fn transcribe_success() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .and(header("authorization", "Bearer test-api-key"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "text": " Should I take dragon? "
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let audio = AudioData::new(vec![0, 1, 2, 3], AudioFormat::Wav);

            let transcription = provider.transcribe(audio, Some("en")).await.unwrap();

            assert_eq!(transcription.text, "Should I take dragon?");
            assert_eq!(transcription.language, Some("en".to_string()));
        }

        #[tokio::test]
        async fn transcribe_silence_yields_empty_text() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(serde_json::json!({ "text": "" })),
                )
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let transcription = provider
                .transcribe(AudioData::new(vec![1], AudioFormat::Wav), None)
                .await
                .unwrap();

            assert!(transcription.is_empty());
            assert!(transcription.language.is_none());
        }

        #[tokio::test]
        async fn transcribe_empty_audio_fails() {
            let mock_server = MockServer::start().await;
            let provider = create_test_provider(&mock_server);

            let result = provider
                .transcribe(AudioData::new(vec![], AudioFormat::Wav), None)
                .await;

            assert!(matches!(result, Err(SpeechError::InvalidAudio(_))));
        }

        #[tokio::test]
        async fn transcribe_rate_limited() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                    "error": {
                        "message": "Rate limit exceeded",
                        "type": "rate_limit_error",
                        "code": "rate_limit_exceeded"
                    }
                })))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider
                .transcribe(AudioData::new(vec![1, 2, 3], AudioFormat::Mp3), None)
                .await;

            assert!(matches!(result, Err(SpeechError::RateLimited)));
        }

        #[tokio::test]
        async fn transcribe_quota_error_code_is_rate_limited() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                    "error": { "message": "quota", "code": "rate_limit_exceeded" }
                })))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider
                .transcribe(AudioData::new(vec![1], AudioFormat::Wav), None)
                .await;

            assert!(matches!(result, Err(SpeechError::RateLimited)));
        }

        #[tokio::test]
        async fn transcribe_server_error_is_unavailable() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider
                .transcribe(AudioData::new(vec![1], AudioFormat::Wav), None)
                .await;

            assert!(matches!(result, Err(SpeechError::ServiceUnavailable(_))));
        }

        #[tokio::test]
        async fn transcribe_garbage_body_is_invalid_response() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/transcriptions"))
                .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider
                .transcribe(AudioData::new(vec![1], AudioFormat::Wav), None)
                .await;

            assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
        }
    }

    mod tts_tests {
        use super::*;

        #[tokio::test]
        async fn synthesize_sends_configured_voice_and_format() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .and(header("authorization", "Bearer test-api-key"))
                .and(body_partial_json(serde_json::json!({
                    "model": "gpt-4o-mini-tts",
                    "voice": "onyx",
                    "response_format": "wav",
                    "input": "Take the wave then back"
                })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 1024]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let audio = provider
                .synthesize("Take the wave then back", None)
                .await
                .unwrap();

            assert_eq!(audio.size_bytes(), 1024);
            assert_eq!(audio.format(), AudioFormat::Wav);
        }

        #[tokio::test]
        async fn synthesize_with_voice_override() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .and(body_partial_json(serde_json::json!({ "voice": "alloy" })))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 16]))
                .expect(1)
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            assert!(provider.synthesize("Test", Some("alloy")).await.is_ok());
        }

        #[tokio::test]
        async fn synthesize_empty_text_fails() {
            let mock_server = MockServer::start().await;
            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize("  ", None).await;

            assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
        }

        #[tokio::test]
        async fn synthesize_too_long_fails() {
            let mock_server = MockServer::start().await;
            let provider = create_test_provider(&mock_server);

            let result = provider.synthesize(&"a".repeat(5000), None).await;

            assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
        }

        #[tokio::test]
        async fn synthesize_rate_limited() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .respond_with(ResponseTemplate::new(429))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider.synthesize("Hello", None).await;

            assert!(matches!(result, Err(SpeechError::RateLimited)));
        }

        #[tokio::test]
        async fn synthesize_empty_body_is_invalid_response() {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/audio/speech"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&mock_server)
                .await;

            let provider = create_test_provider(&mock_server);
            let result = provider.synthesize("Hello", None).await;

            assert!(matches!(result, Err(SpeechError::InvalidResponse(_))));
        }

        #[test]
        fn model_and_voice_accessors() {
            let provider = OpenAISpeechProvider::new(SpeechConfig {
                openai_api_key: Some("k".to_string()),
                ..Default::default()
            })
            .unwrap();
            assert_eq!(TextToSpeech::model_name(&provider), "gpt-4o-mini-tts");
            assert_eq!(SpeechToText::model_name(&provider), "gpt-4o-transcribe");
            assert_eq!(provider.default_voice(), "onyx");
        }
    }
}
