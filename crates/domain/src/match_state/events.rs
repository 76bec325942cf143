//! Event feed replay: objectives, structures and the battle log

use std::collections::HashMap;

use serde_json::Value;

use super::parse::{number, text};
use super::{
    BATTLE_LOG_MIN_ENTRIES, BATTLE_LOG_WINDOW_SECS, BattleLogEntry, Lane, MatchState, Team,
    TeamSide,
};
use crate::value_objects::format_clock;

/// Who an event name refers to
#[derive(Debug, Clone)]
struct Known {
    side: TeamSide,
    champion: String,
}

/// Event names resolve against full names, names without the `#tag`, and champions
struct Roster(HashMap<String, Known>);

impl Roster {
    fn new(state: &MatchState) -> Self {
        let mut names = HashMap::new();
        for player in state.allies.players.iter().chain(&state.enemies.players) {
            let known = Known {
                side: player.side,
                champion: player.champion.clone(),
            };
            names.insert(player.name.clone(), known.clone());
            if let Some((game_name, _)) = player.name.split_once('#') {
                names.insert(game_name.to_string(), known.clone());
            }
            names.insert(player.champion.clone(), known);
        }
        Self(names)
    }

    fn side_of(&self, name: Option<&str>) -> Option<TeamSide> {
        name.and_then(|name| self.0.get(name)).map(|known| known.side)
    }

    /// `Champion (SIDE)` for players, the raw name for minions and turrets
    fn label(&self, name: Option<&str>) -> String {
        match name.filter(|name| !name.is_empty()) {
            None => "Minion/Monster".to_string(),
            Some(name) => self.0.get(name).map_or_else(
                || name.to_string(),
                |known| format!("{} ({})", known.champion, known.side),
            ),
        }
    }
}

pub(super) fn apply(state: &mut MatchState, events: &[Value]) {
    state.allies.total_kills = state.allies.players.iter().map(|p| p.scores.kills).sum();
    state.enemies.total_kills = state.enemies.players.iter().map(|p| p.scores.kills).sum();

    let roster = Roster::new(state);
    for event in events {
        record_structure(state, event);
        record_objective(state, &roster, event);
    }
    state.battle_log = battle_log(state.game_time, &roster, events);
}

fn team_mut(state: &mut MatchState, side: TeamSide) -> &mut Team {
    if state.allies.side == side {
        &mut state.allies
    } else {
        &mut state.enemies
    }
}

/// Side named in a structure token such as `TChaos` or `T2`
fn side_from_token(token: &str) -> TeamSide {
    if token.contains("Chaos") || token == "T2" || token == "T200" {
        TeamSide::Chaos
    } else {
        TeamSide::Order
    }
}

fn lane_from_code(code: &str) -> Option<Lane> {
    match code {
        "L0" => Some(Lane::Bottom),
        "L1" => Some(Lane::Middle),
        "L2" => Some(Lane::Top),
        _ => None,
    }
}

fn turret_tier(position: &str) -> &'static str {
    if position.contains("P1") {
        "Inhib Turret"
    } else if position.contains("P2") {
        "Tier 2"
    } else if position.contains("P4") || position.contains("P5") {
        "Nexus Turret"
    } else {
        "Tier 1"
    }
}

/// Structure events are credited against the team that lost the structure
fn record_structure(state: &mut MatchState, event: &Value) {
    match text(event, "EventName") {
        Some("TurretKilled") => {
            let token = text(event, "TurretKilled").unwrap_or_default();
            let parts: Vec<&str> = token.split('_').collect();
            if let [_, team, lane, position, ..] = parts.as_slice()
                && let Some(lane) = lane_from_code(lane)
            {
                team_mut(state, side_from_token(team))
                    .lane_mut(lane)
                    .turrets_lost
                    .push(turret_tier(position).to_string());
            }
        },
        Some("InhibKilled") => {
            let token = text(event, "InhibKilled").unwrap_or_default();
            let parts: Vec<&str> = token.split('_').collect();
            if let [_, team, lane, ..] = parts.as_slice()
                && let Some(lane) = lane_from_code(lane)
            {
                team_mut(state, side_from_token(team))
                    .lane_mut(lane)
                    .inhibitor_lost = true;
            }
        },
        _ => {},
    }
}

/// Objectives count for the team of a known player killer
fn record_objective(state: &mut MatchState, roster: &Roster, event: &Value) {
    let Some(side) = roster.side_of(text(event, "KillerName")) else {
        return;
    };
    let clock = format_clock(number(event, "EventTime").unwrap_or(0.0));
    let team = team_mut(state, side);

    match text(event, "EventName") {
        Some("DragonKill") => {
            let dragon = text(event, "DragonType").unwrap_or("Unknown");
            team.dragons.record(format!("{clock} ({dragon})"));
        },
        Some("BaronKill") => team.barons.record(clock),
        Some("HeraldKill") => team.heralds.record(clock),
        Some("HordeKill") => team.grubs.record(clock),
        _ => {},
    }
}

fn describe(roster: &Roster, event: &Value) -> Option<String> {
    let killer = || roster.label(text(event, "KillerName"));

    let message = match text(event, "EventName")? {
        "ChampionKill" => format!(
            "{} killed {}",
            killer(),
            roster.label(text(event, "VictimName"))
        ),
        "TurretKilled" => format!("{} destroyed a Turret", killer()),
        "InhibKilled" => format!("{} destroyed an Inhibitor", killer()),
        "DragonKill" => format!(
            "{} took {} Dragon",
            killer(),
            text(event, "DragonType").unwrap_or("Elemental")
        ),
        "BaronKill" => format!("{} took Baron Nashor", killer()),
        "HeraldKill" => format!("{} took Rift Herald", killer()),
        "HordeKill" => format!("{} took Void Grubs", killer()),
        _ => return None,
    };
    Some(message)
}

/// Everything from the last minute, topped up to a minimum from older history
#[allow(clippy::cast_possible_truncation)]
fn battle_log(game_time: f64, roster: &Roster, events: &[Value]) -> Vec<BattleLogEntry> {
    let mut log: Vec<BattleLogEntry> = events
        .iter()
        .filter_map(|event| {
            let event_time = number(event, "EventTime")?;
            Some(BattleLogEntry {
                seconds_ago: (game_time - event_time) as i64,
                event_time,
                message: describe(roster, event)?,
            })
        })
        .collect();

    log.sort_by(|a, b| b.event_time.total_cmp(&a.event_time));

    let recent = log
        .iter()
        .filter(|entry| entry.seconds_ago <= BATTLE_LOG_WINDOW_SECS)
        .count();
    if recent >= BATTLE_LOG_MIN_ENTRIES {
        log.retain(|entry| entry.seconds_ago <= BATTLE_LOG_WINDOW_SECS);
    } else {
        log.truncate(BATTLE_LOG_MIN_ENTRIES);
    }
    log
}
