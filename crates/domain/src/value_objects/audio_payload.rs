//! Spoken question payload value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Audio container formats accepted for the spoken question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// RIFF/WAVE
    Wav,
    /// MPEG layer III, with or without an ID3 tag
    Mp3,
    /// MPEG-4 audio (ftyp box)
    M4a,
    /// Raw ADTS AAC
    Aac,
    /// Ogg container (Opus or Vorbis)
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
}

impl AudioFormat {
    /// Detect the format from the leading bytes of an audio file
    #[must_use]
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WAVE" {
            return Some(Self::Wav);
        }
        if data.starts_with(b"ID3") {
            return Some(Self::Mp3);
        }
        if data.len() >= 8 && &data[4..8] == b"ftyp" {
            return Some(Self::M4a);
        }
        if data.starts_with(b"OggS") {
            return Some(Self::Ogg);
        }
        if data.starts_with(b"fLaC") {
            return Some(Self::Flac);
        }

        match data {
            [0xFF, 0xFB | 0xF3 | 0xF2, ..] => Some(Self::Mp3),
            [0xFF, 0xF1 | 0xF9, ..] => Some(Self::Aac),
            _ => None,
        }
    }

    /// Get the MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
            Self::Aac => "audio/aac",
            Self::Ogg => "audio/ogg",
            Self::Flac => "audio/flac",
        }
    }

    /// Get the file extension (used when uploading to transcription APIs)
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::M4a => "m4a",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A validated audio recording of the player's question
#[derive(Clone, PartialEq, Eq)]
pub struct AudioPayload {
    data: Vec<u8>,
    format: AudioFormat,
}

impl AudioPayload {
    /// Validate raw bytes as a recorded question
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are empty, larger than `max_bytes`, or
    /// not one of the supported audio formats.
    pub fn new(data: Vec<u8>, max_bytes: usize) -> Result<Self, DomainError> {
        if data.is_empty() {
            return Err(DomainError::EmptyPayload("audio"));
        }

        if data.len() > max_bytes {
            return Err(DomainError::PayloadTooLarge {
                what: "audio",
                size_bytes: data.len(),
                max_bytes,
            });
        }

        let format = AudioFormat::detect(&data).ok_or_else(|| {
            DomainError::InvalidAudio(
                "file does not match a supported format (wav, mp3, m4a, aac, ogg, flac)"
                    .to_string(),
            )
        })?;

        Ok(Self { data, format })
    }

    /// Raw audio bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw bytes
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Detected format
    #[must_use]
    pub const fn format(&self) -> AudioFormat {
        self.format
    }

    /// Size in bytes
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPayload")
            .field("format", &self.format)
            .field("size_bytes", &self.data.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wav_bytes() -> Vec<u8> {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&[0x24, 0, 0, 0]);
        data.extend_from_slice(b"WAVEfmt ");
        data
    }

    #[test]
    fn detects_wav() {
        assert_eq!(AudioFormat::detect(&wav_bytes()), Some(AudioFormat::Wav));
    }

    #[test]
    fn riff_without_wave_is_rejected() {
        let mut data = b"RIFF".to_vec();
        data.extend_from_slice(&[0; 4]);
        data.extend_from_slice(b"AVI ");
        assert_eq!(AudioFormat::detect(&data), None);
    }

    #[test]
    fn detects_mp3_variants() {
        assert_eq!(AudioFormat::detect(b"ID3\x04\0"), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::detect(&[0xFF, 0xFB, 0x90]), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::detect(&[0xFF, 0xF3, 0x90]), Some(AudioFormat::Mp3));
        assert_eq!(AudioFormat::detect(&[0xFF, 0xF2, 0x90]), Some(AudioFormat::Mp3));
    }

    #[test]
    fn detects_m4a() {
        let data = b"\0\0\0\x20ftypM4A ";
        assert_eq!(AudioFormat::detect(data), Some(AudioFormat::M4a));
    }

    #[test]
    fn detects_aac() {
        assert_eq!(AudioFormat::detect(&[0xFF, 0xF1, 0x50]), Some(AudioFormat::Aac));
        assert_eq!(AudioFormat::detect(&[0xFF, 0xF9, 0x50]), Some(AudioFormat::Aac));
    }

    #[test]
    fn detects_ogg_and_flac() {
        assert_eq!(AudioFormat::detect(b"OggS\0\x02"), Some(AudioFormat::Ogg));
        assert_eq!(AudioFormat::detect(b"fLaC\0\0"), Some(AudioFormat::Flac));
    }

    #[test]
    fn png_is_not_audio() {
        assert_eq!(AudioFormat::detect(b"\x89PNG\r\n\x1a\n"), None);
    }

    #[test]
    fn new_validates_payload() {
        let audio = AudioPayload::new(wav_bytes(), 1024).unwrap();
        assert_eq!(audio.format(), AudioFormat::Wav);
        assert_eq!(audio.format().mime_type(), "audio/wav");
        assert_eq!(audio.size_bytes(), 16);
    }

    #[test]
    fn new_rejects_empty() {
        assert!(matches!(
            AudioPayload::new(Vec::new(), 1024),
            Err(DomainError::EmptyPayload("audio"))
        ));
    }

    #[test]
    fn new_rejects_oversized() {
        let err = AudioPayload::new(wav_bytes(), 8).unwrap_err();
        assert!(err.is_too_large());
    }

    #[test]
    fn new_rejects_unknown_format() {
        assert!(matches!(
            AudioPayload::new(b"hello world".to_vec(), 1024),
            Err(DomainError::InvalidAudio(_))
        ));
    }

    #[test]
    fn display_uses_extension() {
        assert_eq!(AudioFormat::M4a.to_string(), "m4a");
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
    }
}
