//! Structured view of a live game snapshot
//!
//! [`MatchState::from_stats`] reads the live client payload into two teams,
//! replays the event feed to credit objectives and lost structures, and keeps
//! a short battle log. [`MatchState::report`] renders the result as the plain
//! text block the coach model reads.

mod events;
mod parse;
mod report;

use std::fmt;

use crate::value_objects::{GameStats, format_clock};

/// Events younger than this many seconds always make the battle log
pub const BATTLE_LOG_WINDOW_SECS: i64 = 60;

/// Minimum battle log length when the recent window is quiet
pub const BATTLE_LOG_MIN_ENTRIES: usize = 10;

/// Side of the map a team plays on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TeamSide {
    /// Blue side
    #[default]
    Order,
    /// Red side
    Chaos,
}

impl TeamSide {
    /// Live client name of the side
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "ORDER",
            Self::Chaos => "CHAOS",
        }
    }

    /// The other side
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Order => Self::Chaos,
            Self::Chaos => Self::Order,
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lane with structures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Top lane
    Top,
    /// Middle lane
    Middle,
    /// Bottom lane
    Bottom,
}

impl Lane {
    /// Lanes in report order
    pub const ALL: [Self; 3] = [Self::Top, Self::Middle, Self::Bottom];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Top => "Top",
            Self::Middle => "Middle",
            Self::Bottom => "Bottom",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Middle => 1,
            Self::Bottom => 2,
        }
    }
}

/// Skill rank of one ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ability {
    /// Ability key (`Q`, `W`, `E` or `R`)
    pub key: char,
    /// Points spent in the ability
    pub level: i64,
}

/// Live champion stats, only reported for the local player
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CombatStats {
    pub hp_current: i64,
    pub hp_max: i64,
    pub resource_current: i64,
    pub resource_max: i64,
    /// `MANA`, `ENERGY`, `NONE` and so on
    pub resource_type: String,
    pub attack_damage: i64,
    pub ability_power: i64,
    pub armor: i64,
    pub magic_resist: i64,
}

/// KDA, farm and vision
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerScore {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub creep_score: i64,
    pub vision_score: f64,
}

/// One of the ten players
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Summoner name, Riot id, or the champion when neither is reported
    pub name: String,
    pub champion: String,
    pub side: TeamSide,
    /// `TOP`, `JUNGLE`, `MIDDLE`, `BOTTOM`, `UTILITY` or `NONE`
    pub role: String,
    pub level: i64,
    pub is_dead: bool,
    pub respawn_timer: f64,
    pub items: Vec<String>,
    pub spells: [String; 2],
    pub keystone: String,
    pub scores: PlayerScore,
    pub combat_stats: Option<CombatStats>,
    pub abilities: Vec<Ability>,
    pub current_gold: f64,
}

/// Structures a team has lost in one lane
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LaneState {
    pub turrets_lost: Vec<String>,
    pub inhibitor_lost: bool,
}

/// How often a team took one objective, with the clock of each take
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectiveStat {
    pub count: u32,
    /// `M:SS`, followed by the dragon type for dragons
    pub timers: Vec<String>,
}

impl ObjectiveStat {
    fn record(&mut self, timer: String) {
        self.count += 1;
        self.timers.push(timer);
    }
}

/// One side of the match
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Team {
    pub side: TeamSide,
    pub players: Vec<Player>,
    pub total_kills: i64,
    pub dragons: ObjectiveStat,
    pub barons: ObjectiveStat,
    pub heralds: ObjectiveStat,
    pub grubs: ObjectiveStat,
    lanes: [LaneState; 3],
}

impl Team {
    /// Empty team for a side
    #[must_use]
    pub fn new(side: TeamSide) -> Self {
        Self {
            side,
            ..Self::default()
        }
    }

    /// Structures lost in a lane
    #[must_use]
    pub const fn lane(&self, lane: Lane) -> &LaneState {
        &self.lanes[lane.index()]
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut LaneState {
        &mut self.lanes[lane.index()]
    }
}

/// One line of the battle log
#[derive(Debug, Clone, PartialEq)]
pub struct BattleLogEntry {
    /// Whole seconds between the event and the snapshot
    pub seconds_ago: i64,
    /// Game clock of the event
    pub event_time: f64,
    pub message: String,
}

/// Parsed and enriched game snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct MatchState {
    pub game_time: f64,
    /// Team of the local player
    pub allies: Team,
    pub enemies: Team,
    /// Most recent first
    pub battle_log: Vec<BattleLogEntry>,
    active: Option<usize>,
}

impl MatchState {
    /// Build the match state from a validated snapshot
    ///
    /// Missing or oddly typed fields fall back to neutral defaults; the
    /// snapshot has already passed [`GameStats`] validation.
    #[must_use]
    pub fn from_stats(stats: &GameStats) -> Self {
        let mut state = parse::parse(stats.as_map());
        let raw_events = stats
            .as_map()
            .get("events")
            .and_then(|events| events.get("Events"))
            .and_then(serde_json::Value::as_array)
            .map_or(&[][..], Vec::as_slice);
        events::apply(&mut state, raw_events);
        state
    }

    /// The local player, when the snapshot identifies one
    #[must_use]
    pub fn active_player(&self) -> Option<&Player> {
        self.active.and_then(|index| self.allies.players.get(index))
    }

    /// Game clock as `M:SS`
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_clock(self.game_time)
    }

    /// Render the plain text game state report
    #[must_use]
    pub fn report(&self) -> String {
        report::render(self)
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::fixtures::{live_client_sample, stats};
    use super::*;

    #[test]
    fn splits_players_by_the_local_team() {
        let state = MatchState::from_stats(&stats(live_client_sample()));

        assert_eq!(state.allies.side, TeamSide::Chaos);
        assert_eq!(state.enemies.side, TeamSide::Order);
        assert_eq!(state.allies.players.len(), 2);
        assert_eq!(state.enemies.players.len(), 2);
        assert_eq!(state.active_player().map(|p| p.champion.as_str()), Some("Jinx"));
        assert_eq!(state.formatted_time(), "22:05");
    }

    #[test]
    fn sums_team_kills() {
        let state = MatchState::from_stats(&stats(live_client_sample()));
        assert_eq!(state.allies.total_kills, 4);
        assert_eq!(state.enemies.total_kills, 5);
    }

    #[test]
    fn enriches_only_the_local_player() {
        let state = MatchState::from_stats(&stats(live_client_sample()));
        let me = state.active_player().unwrap();

        let combat = me.combat_stats.as_ref().unwrap();
        assert_eq!(combat.hp_current, 702);
        assert_eq!(combat.attack_damage, 148);
        assert_eq!(
            me.abilities,
            vec![
                Ability { key: 'Q', level: 5 },
                Ability { key: 'W', level: 1 },
                Ability { key: 'E', level: 2 },
                Ability { key: 'R', level: 1 },
            ]
        );
        assert!((me.current_gold - 1450.6).abs() < f64::EPSILON);
        assert!(state.enemies.players.iter().all(|p| p.combat_stats.is_none()));
    }

    #[test]
    fn unknown_local_player_defaults_to_order() {
        let state = MatchState::from_stats(&stats(json!({
            "gameData": { "gameTime": 30.0 },
            "allPlayers": [{ "summonerName": "Bot", "championName": "Annie", "team": "CHAOS" }]
        })));

        assert!(state.active_player().is_none());
        assert_eq!(state.allies.side, TeamSide::Order);
        assert_eq!(state.enemies.players[0].champion, "Annie");
    }
}
