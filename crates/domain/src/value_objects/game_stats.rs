//! Live game statistics value object
//!
//! The client sends whatever the League of Legends live client API reports.
//! Only the shape of a few well-known fields is checked here; the coach
//! model sees the snapshot through [`crate::MatchState`].

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// Default ceiling for the serialized game stats (50 KiB)
pub const DEFAULT_MAX_GAME_STATS_BYTES: usize = 50 * 1024;

/// Validated game statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GameStats(Map<String, Value>);

impl GameStats {
    /// Parse and validate game stats from raw JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON object, is larger than
    /// `max_bytes`, or if a well-known field has the wrong type.
    pub fn parse(raw: &str, max_bytes: usize) -> Result<Self, DomainError> {
        if raw.len() > max_bytes {
            return Err(DomainError::PayloadTooLarge {
                what: "game_stats",
                size_bytes: raw.len(),
                max_bytes,
            });
        }

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| DomainError::InvalidGameStats(format!("not valid JSON: {e}")))?;

        Self::from_value(value, max_bytes)
    }

    /// Validate an already-decoded JSON value
    ///
    /// # Errors
    ///
    /// Same conditions as [`GameStats::parse`].
    pub fn from_value(value: Value, max_bytes: usize) -> Result<Self, DomainError> {
        let Value::Object(map) = value else {
            return Err(DomainError::InvalidGameStats(
                "expected a JSON object".to_string(),
            ));
        };

        let size_bytes = serde_json::to_vec(&map).map_or(0, |bytes| bytes.len());
        if size_bytes > max_bytes {
            return Err(DomainError::PayloadTooLarge {
                what: "game_stats",
                size_bytes,
                max_bytes,
            });
        }

        validate_shape(&map)?;
        Ok(Self(map))
    }

    /// Game clock in seconds
    #[must_use]
    pub fn game_time_seconds(&self) -> f64 {
        self.0
            .get("gameData")
            .and_then(|data| data.get("gameTime"))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Game clock formatted as `M:SS`
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_clock(self.game_time_seconds())
    }

    /// Borrow the underlying JSON object
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Render a number of game seconds as `M:SS`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn format_clock(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn validate_shape(map: &Map<String, Value>) -> Result<(), DomainError> {
    let game_data = map
        .get("gameData")
        .ok_or_else(|| DomainError::InvalidGameStats("missing required field 'gameData'".into()))?
        .as_object()
        .ok_or_else(|| DomainError::InvalidGameStats("'gameData' must be an object".into()))?;

    match game_data.get("gameTime") {
        Some(Value::Number(_)) => {},
        Some(_) => {
            return Err(DomainError::InvalidGameStats(
                "'gameData.gameTime' must be a number".into(),
            ));
        },
        None => {
            return Err(DomainError::InvalidGameStats(
                "missing required field 'gameData.gameTime'".into(),
            ));
        },
    }

    expect_kind(map, "activePlayer", Value::is_object, "an object")?;
    expect_kind(map, "allPlayers", Value::is_array, "an array")?;
    expect_kind(map, "events", Value::is_object, "an object")?;
    Ok(())
}

fn expect_kind(
    map: &Map<String, Value>,
    field: &str,
    check: fn(&Value) -> bool,
    expected: &str,
) -> Result<(), DomainError> {
    match map.get(field) {
        Some(value) if !check(value) => Err(DomainError::InvalidGameStats(format!(
            "'{field}' must be {expected}"
        ))),
        _ => Ok(()),
    }
}
