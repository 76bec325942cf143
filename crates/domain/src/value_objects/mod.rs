//! Value Objects - Immutable, validated request primitives

mod audio_payload;
mod game_stats;
mod image_payload;
mod language;
mod provider_kind;

pub use audio_payload::{AudioFormat, AudioPayload};
pub(crate) use game_stats::format_clock;
pub use game_stats::{DEFAULT_MAX_GAME_STATS_BYTES, GameStats};
pub use image_payload::{ImageFormat, ImagePayload};
pub use language::Language;
pub use provider_kind::CoachProviderKind;
