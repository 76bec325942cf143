//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{
    AudioFormat, AudioPayload, GameStats, ImageFormat, ImagePayload, Language,
};
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// GameStats Property Tests
// ============================================================================

mod game_stats_tests {
    use super::*;

    proptest! {
        #[test]
        fn formatted_time_matches_whole_seconds(seconds in 0u32..20_000u32, fraction in 0.0f64..0.99f64) {
            let stats = GameStats::from_value(
                json!({ "gameData": { "gameTime": f64::from(seconds) + fraction } }),
                50 * 1024,
            ).unwrap();

            let formatted = stats.formatted_time();
            let (minutes, secs) = formatted.split_once(':').unwrap();
            prop_assert_eq!(minutes.parse::<u32>().unwrap(), seconds / 60);
            prop_assert_eq!(secs.parse::<u32>().unwrap(), seconds % 60);
            prop_assert_eq!(secs.len(), 2);
        }

        #[test]
        fn arbitrary_text_never_panics(raw in ".{0,200}") {
            let _ = GameStats::parse(&raw, 50 * 1024);
        }

        #[test]
        fn non_object_json_rejected(n in any::<i64>()) {
            prop_assert!(GameStats::parse(&n.to_string(), 50 * 1024).is_err());
        }
    }
}

// ============================================================================
// Payload Property Tests
// ============================================================================

mod payload_tests {
    use super::*;

    proptest! {
        #[test]
        fn image_size_ceiling_is_enforced(extra in 0usize..256, max in 8usize..128) {
            let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
            data.resize(8 + extra, 0);

            let result = ImagePayload::new(data.clone(), max);
            if data.len() > max {
                prop_assert!(result.unwrap_err().is_too_large());
            } else {
                prop_assert_eq!(result.unwrap().format(), ImageFormat::Png);
            }
        }

        #[test]
        fn audio_detection_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
            let _ = AudioFormat::detect(&bytes);
            let _ = ImageFormat::detect(&bytes);
        }

        #[test]
        fn accepted_audio_keeps_bytes(tail in prop::collection::vec(any::<u8>(), 0..64)) {
            let mut data = b"OggS".to_vec();
            data.extend_from_slice(&tail);

            let audio = AudioPayload::new(data.clone(), 1024).unwrap();
            prop_assert_eq!(audio.format(), AudioFormat::Ogg);
            prop_assert_eq!(audio.data(), data.as_slice());
        }
    }
}

// ============================================================================
// Language Property Tests
// ============================================================================

mod language_tests {
    use super::*;

    proptest! {
        #[test]
        fn every_language_parses_from_name_and_iso(idx in 0usize..28, upper in any::<bool>()) {
            let lang = Language::all()[idx];
            let (name, iso) = if upper {
                (lang.code().to_uppercase(), lang.iso_code().to_uppercase())
            } else {
                (lang.code().to_string(), lang.iso_code().to_string())
            };

            prop_assert_eq!(name.parse::<Language>().unwrap(), lang);
            prop_assert_eq!(iso.parse::<Language>().unwrap(), lang);
        }

        #[test]
        fn digits_are_never_languages(s in "[0-9]{1,6}") {
            prop_assert!(s.parse::<Language>().is_err());
        }
    }
}
