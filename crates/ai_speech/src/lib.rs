//! AI Speech - Speech-to-Text and Text-to-Speech clients
//!
//! Provides traits and implementations for speech processing:
//! - `SpeechToText` - Transcribe the player's question (STT)
//! - `TextToSpeech` - Speak the coach's advice (TTS)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `providers` module contains concrete implementations (adapters)
//!
//! # Supported Providers
//!
//! - OpenAI transcription (`gpt-4o-transcribe`) and speech (`gpt-4o-mini-tts`)
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{AudioData, AudioFormat, OpenAISpeechProvider, SpeechToText, TextToSpeech};
//!
//! let provider = OpenAISpeechProvider::new(config)?;
//!
//! let audio = AudioData::new(bytes, AudioFormat::Wav);
//! let transcription = provider.transcribe(audio, Some("en")).await?;
//!
//! let reply = provider.synthesize("Group mid after dragon.", None).await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{GAMING_TRANSCRIPTION_PROMPT, SpeechConfig};
pub use error::SpeechError;
pub use ports::{SpeechToText, TextToSpeech};
pub use providers::openai::OpenAISpeechProvider;
pub use types::{AudioData, AudioFormat, Transcription};
