//! Infrastructure adapters
//!
//! Adapters connect application ports to the ai_speech and ai_core clients.

mod coach_adapter;
pub mod coach_registry;
mod speech_adapter;

pub use coach_adapter::VisionCoachAdapter;
pub use coach_registry::{ProviderEntry, build_coach_provider};
pub use speech_adapter::SpeechAdapter;
