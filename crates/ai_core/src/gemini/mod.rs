//! Google Gemini vision engine
//!
//! Talks to the `generateContent` REST endpoint with the screenshot sent as
//! inline base64 data.

mod client;

pub use client::GeminiVisionEngine;
