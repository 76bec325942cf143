//! Request size ceilings and upstream deadlines.

use std::time::Duration;

use application::services::{DEFAULT_MAX_FILE_SIZE_BYTES, DispatcherConfig};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Upload size ceilings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LimitsConfig {
    /// Ceiling for the screenshot and the audio file, each
    #[serde(default = "default_max_file_size")]
    #[validate(range(min = 1024, message = "must be at least 1 KiB"))]
    pub max_file_size_bytes: usize,

    /// Ceiling for the serialized game stats
    #[serde(default = "default_max_game_stats")]
    #[validate(range(min = 64, message = "must be at least 64 bytes"))]
    pub max_game_stats_bytes: usize,
}

const fn default_max_file_size() -> usize {
    DEFAULT_MAX_FILE_SIZE_BYTES
}

const fn default_max_game_stats() -> usize {
    domain::DEFAULT_MAX_GAME_STATS_BYTES
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            max_game_stats_bytes: default_max_game_stats(),
        }
    }
}

impl LimitsConfig {
    /// Largest multipart body the HTTP layer should accept
    ///
    /// Two files plus the stats and some multipart framing, saturating at
    /// `usize::MAX` for oversized settings.
    #[must_use]
    pub const fn max_body_bytes(&self) -> usize {
        self.max_file_size_bytes
            .saturating_mul(2)
            .saturating_add(self.max_game_stats_bytes)
            .saturating_add(64 * 1024)
    }
}

/// Upstream call deadlines
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TimeoutsConfig {
    /// Deadline for each pipeline stage
    #[serde(default = "default_stage_timeout_ms")]
    #[validate(range(min = 1, max = 600_000))]
    pub stage_timeout_ms: u64,

    /// reqwest client timeout for provider calls
    #[serde(default = "default_http_timeout_ms")]
    #[validate(range(min = 1, max = 600_000))]
    pub http_timeout_ms: u64,
}

const fn default_stage_timeout_ms() -> u64 {
    30_000
}

const fn default_http_timeout_ms() -> u64 {
    30_000
}

impl Default for TimeoutsConfig {
    fn default() -> Self {
        Self {
            stage_timeout_ms: default_stage_timeout_ms(),
            http_timeout_ms: default_http_timeout_ms(),
        }
    }
}

impl TimeoutsConfig {
    /// Stage deadline as a [`Duration`]
    #[must_use]
    pub const fn stage_timeout(&self) -> Duration {
        Duration::from_millis(self.stage_timeout_ms)
    }
}

/// Build the dispatcher settings from limits and timeouts
#[must_use]
pub fn dispatcher_config(limits: &LimitsConfig, timeouts: &TimeoutsConfig) -> DispatcherConfig {
    DispatcherConfig {
        max_file_size_bytes: limits.max_file_size_bytes,
        max_game_stats_bytes: limits.max_game_stats_bytes,
        stage_timeout: timeouts.stage_timeout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_body_limit_covers_both_files_and_stats() {
        let limits = LimitsConfig::default();
        assert_eq!(
            limits.max_body_bytes(),
            2 * DEFAULT_MAX_FILE_SIZE_BYTES + domain::DEFAULT_MAX_GAME_STATS_BYTES + 64 * 1024
        );
    }

    #[test]
    fn huge_file_limit_saturates_instead_of_overflowing() {
        let limits = LimitsConfig {
            max_file_size_bytes: usize::MAX / 2 + 1,
            max_game_stats_bytes: usize::MAX,
        };
        assert_eq!(limits.max_body_bytes(), usize::MAX);
    }

    #[test]
    fn dispatcher_config_copies_limits() {
        let limits = LimitsConfig {
            max_file_size_bytes: 4096,
            max_game_stats_bytes: 128,
        };
        let timeouts = TimeoutsConfig {
            stage_timeout_ms: 250,
            http_timeout_ms: 100,
        };

        let config = dispatcher_config(&limits, &timeouts);

        assert_eq!(config.max_file_size_bytes, 4096);
        assert_eq!(config.max_game_stats_bytes, 128);
        assert_eq!(config.stage_timeout, Duration::from_millis(250));
    }
}
