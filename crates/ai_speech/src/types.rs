//! Common types for speech processing

pub use domain::AudioFormat;

/// Audio payload together with its format
#[derive(Clone, PartialEq, Eq)]
pub struct AudioData {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioData {
    /// Create new audio data
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Get the raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the audio format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Get the size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Check if the audio data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get the MIME type
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Generate a filename with the correct extension
    #[must_use]
    pub fn filename(&self, base: &str) -> String {
        format!("{base}.{}", self.format.extension())
    }
}

impl std::fmt::Debug for AudioData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioData")
            .field("format", &self.format)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

/// Result of a transcription
#[derive(Debug, Clone, PartialEq)]
pub struct Transcription {
    /// Transcribed text
    pub text: String,
    /// Language code (ISO-639-1) if known
    pub language: Option<String>,
    /// Audio duration in milliseconds if reported
    pub duration_ms: Option<u64>,
}

impl Transcription {
    /// Create a new transcription
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration_ms: None,
        }
    }

    /// Set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the duration
    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Check if the transcription is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod audio_data_tests {
        use super::*;

        #[test]
        fn new_creates_audio_data() {
            let audio = AudioData::new(vec![1, 2, 3], AudioFormat::Wav);
            assert_eq!(audio.data(), &[1, 2, 3]);
            assert_eq!(audio.format(), AudioFormat::Wav);
            assert_eq!(audio.size_bytes(), 3);
            assert!(!audio.is_empty());
        }

        #[test]
        fn into_data_consumes_and_returns_bytes() {
            let audio = AudioData::new(vec![9, 8], AudioFormat::Ogg);
            assert_eq!(audio.into_data(), vec![9, 8]);
        }

        #[test]
        fn filename_includes_extension() {
            let audio = AudioData::new(vec![], AudioFormat::M4a);
            assert_eq!(audio.filename("audio"), "audio.m4a");
            assert!(audio.is_empty());
        }

        #[test]
        fn mime_type_delegates_to_format() {
            let audio = AudioData::new(vec![1], AudioFormat::Mp3);
            assert_eq!(audio.mime_type(), "audio/mpeg");
        }

        #[test]
        fn debug_hides_bytes() {
            let audio = AudioData::new(vec![42; 64], AudioFormat::Flac);
            let debug = format!("{audio:?}");
            assert!(debug.contains("size_bytes: 64"));
            assert!(!debug.contains("42, 42"));
        }
    }

    mod transcription_tests {
        use super::*;

        #[test]
        fn new_creates_simple_transcription() {
            let t = Transcription::new("gank bot");
            assert_eq!(t.text, "gank bot");
            assert!(t.language.is_none());
            assert!(t.duration_ms.is_none());
        }

        #[test]
        fn builders_set_fields() {
            let t = Transcription::new("x").with_language("ko").with_duration(1500);
            assert_eq!(t.language.as_deref(), Some("ko"));
            assert_eq!(t.duration_ms, Some(1500));
        }

        #[test]
        fn is_empty_returns_true_for_whitespace_only() {
            assert!(Transcription::new("   \n").is_empty());
            assert!(!Transcription::new("dragon").is_empty());
        }
    }
}
