//! Coaching pipeline entities
//!
//! A [`CoachRequest`] travels through transcription, analysis and synthesis,
//! producing a [`Transcript`], a [`CoachAdvice`] and finally a
//! [`CoachResponse`]. None of them outlive the HTTP call that created them.

use serde::{Deserialize, Serialize};

use crate::value_objects::{AudioFormat, AudioPayload, GameStats, ImagePayload, Language};

/// One incoming coaching query
#[derive(Debug, Clone)]
pub struct CoachRequest {
    /// In-game screenshot
    pub image: ImagePayload,
    /// Recorded spoken question
    pub audio: AudioPayload,
    /// Live game statistics
    pub game_stats: GameStats,
    /// Language for transcription and reply
    pub language: Language,
}

impl CoachRequest {
    /// Create a new request
    #[must_use]
    pub const fn new(
        image: ImagePayload,
        audio: AudioPayload,
        game_stats: GameStats,
        language: Language,
    ) -> Self {
        Self {
            image,
            audio,
            game_stats,
            language,
        }
    }
}

/// Text recognized from the player's question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Recognized text, empty when nothing was said
    pub text: String,
    /// Declared or detected language
    pub language: Option<Language>,
}

impl Transcript {
    /// Create a transcript
    #[must_use]
    pub fn new(text: impl Into<String>, language: Option<Language>) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    /// Transcript for silent or unintelligible audio
    #[must_use]
    pub const fn empty(language: Option<Language>) -> Self {
        Self {
            text: String::new(),
            language,
        }
    }

    /// Whether no speech was recognized
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Optional metadata reported by the coach model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceAnnotations {
    /// Model that produced the advice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Total tokens consumed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,
    /// Why generation stopped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Advice text produced by the coach model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachAdvice {
    /// Advice to be spoken back to the player
    pub text: String,
    /// Provider metadata
    #[serde(default)]
    pub annotations: AdviceAnnotations,
}

impl CoachAdvice {
    /// Advice without annotations
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            annotations: AdviceAnnotations::default(),
        }
    }

    /// Attach provider metadata
    #[must_use]
    pub fn with_annotations(mut self, annotations: AdviceAnnotations) -> Self {
        self.annotations = annotations;
        self
    }
}

/// Final reply returned to the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachResponse {
    /// Synthesized speech
    pub audio: Vec<u8>,
    /// Format of `audio`
    pub audio_format: AudioFormat,
    /// Advice text that was spoken
    pub advice: String,
}
