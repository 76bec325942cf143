//! Configuration for speech processing

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Transcription prompt biasing the model toward League of Legends vocabulary
pub const GAMING_TRANSCRIPTION_PROMPT: &str = "This is a user's verbal request for an AI League \
of Legends coaching application. The speech will be a question or request, potentially \
containing background noise, accents, and gaming slang (e.g., 'gank', 'CS', 'peel', 'flash', \
champion names, item names, lane names like 'mid', 'top'). Transcribe the audio verbatim and \
ONLY in the language spoken. Preserve all proper nouns, game terms, and slang as they are \
spoken, including mixed languages/code-switching. Do not translate. Maintain proper \
punctuation and capitalization.";

/// Configuration for the OpenAI speech services
#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI API key
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Speech-to-text model
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Sampling temperature for transcription
    #[serde(default = "default_stt_temperature")]
    pub stt_temperature: f32,

    /// Context prompt sent with every transcription
    #[serde(default = "default_stt_prompt")]
    pub stt_prompt: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// Default voice for TTS
    #[serde(default = "default_voice")]
    pub default_voice: String,

    /// Output audio format for TTS
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// TTS speaking speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_stt_model() -> String {
    "gpt-4o-transcribe".to_string()
}

const fn default_stt_temperature() -> f32 {
    0.2
}

fn default_stt_prompt() -> String {
    GAMING_TRANSCRIPTION_PROMPT.to_string()
}

fn default_tts_model() -> String {
    "gpt-4o-mini-tts".to_string()
}

fn default_voice() -> String {
    "onyx".to_string()
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Wav
}

const fn default_speed() -> f32 {
    1.2
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            stt_model: default_stt_model(),
            stt_temperature: default_stt_temperature(),
            stt_prompt: default_stt_prompt(),
            tts_model: default_tts_model(),
            default_voice: default_voice(),
            output_format: default_output_format(),
            speed: default_speed(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("openai_base_url", &self.openai_base_url)
            .field("stt_model", &self.stt_model)
            .field("tts_model", &self.tts_model)
            .field("default_voice", &self.default_voice)
            .field("output_format", &self.output_format)
            .field("speed", &self.speed)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .openai_api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err("OpenAI API key is required".to_string());
        }

        if !(0.25..=4.0).contains(&self.speed) {
            return Err(format!(
                "Speed must be between 0.25 and 4.0, got {}",
                self.speed
            ));
        }

        if !(0.0..=1.0).contains(&self.stt_temperature) {
            return Err(format!(
                "Transcription temperature must be between 0.0 and 1.0, got {}",
                self.stt_temperature
            ));
        }

        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}
