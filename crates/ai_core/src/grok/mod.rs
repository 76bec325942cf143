//! xAI Grok vision engine
//!
//! Uses the OpenAI-compatible chat completions API, sending the screenshot
//! as an `image_url` content part with a base64 data URI.

mod client;

pub use client::GrokVisionEngine;
