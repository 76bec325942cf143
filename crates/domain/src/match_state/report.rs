//! Plain text game state report

use std::fmt::Write as _;

use super::{Lane, MatchState, Player, Team};

fn lanes(team: &Team) -> String {
    Lane::ALL
        .iter()
        .map(|lane| {
            let state = team.lane(*lane);
            let mut status = Vec::new();
            if !state.turrets_lost.is_empty() {
                let mut turrets = state.turrets_lost.clone();
                turrets.sort();
                status.push(turrets.join(", "));
            }
            if state.inhibitor_lost {
                status.push("**INHIBITOR**".to_string());
            }
            let status = if status.is_empty() {
                "Secure".to_string()
            } else {
                status.join("; ")
            };
            format!("   - {}: {status}", lane.name())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn objectives(team: &Team) -> String {
    let lines: Vec<String> = [
        ("Dragons", &team.dragons, ""),
        ("Baron", &team.barons, ""),
        ("Rift Herald", &team.heralds, ""),
        ("Void Grubs", &team.grubs, "Taken at "),
    ]
    .into_iter()
    .filter(|(_, stat, _)| stat.count > 0)
    .map(|(label, stat, prefix)| {
        format!("   - {label} ({}): {prefix}{}", stat.count, stat.timers.join(", "))
    })
    .collect();

    if lines.is_empty() {
        "   - None".to_string()
    } else {
        lines.join("\n")
    }
}

#[allow(clippy::cast_possible_truncation)]
fn roster_entry(player: &Player) -> String {
    let status = if player.is_dead {
        format!("DEAD ({}s)", player.respawn_timer as i64)
    } else {
        "ALIVE".to_string()
    };
    let scores = &player.scores;

    format!(
        "[{}] (Lvl {} {}) - {status}\n   Kills: {}, Deaths: {}, Assists: {} | CS: {} | Vis: {:.1}\n   Items: {}\n   Spells: {} | Rune: {}\n",
        player.champion,
        player.level,
        player.role,
        scores.kills,
        scores.deaths,
        scores.assists,
        scores.creep_score,
        scores.vision_score,
        player.items.join(", "),
        player.spells.join(" "),
        player.keystone,
    )
}

#[allow(clippy::cast_possible_truncation)]
fn active_block(player: &Player) -> String {
    let status = if player.is_dead {
        format!("DEAD (Respawn {}s)", player.respawn_timer as i64)
    } else {
        "ALIVE".to_string()
    };

    let Some(combat) = &player.combat_stats else {
        return format!(
            "Champion: {} - {status}\n(Waiting for combat stats update...)",
            player.champion
        );
    };

    let abilities = player
        .abilities
        .iter()
        .map(|ability| format!("{}:{}", ability.key, ability.level))
        .collect::<Vec<_>>()
        .join(" ");
    let scores = &player.scores;

    let mut block = String::new();
    let _ = writeln!(
        block,
        "Champion: {} (Lvl {} {}) - {status}",
        player.champion, player.level, player.role
    );
    let _ = writeln!(
        block,
        "Kills: {}, Deaths: {}, Assists: {} | CS: {} | Vision Score: {:.1}",
        scores.kills, scores.deaths, scores.assists, scores.creep_score, scores.vision_score
    );
    let _ = writeln!(
        block,
        "Vitals: {}/{} HP | {}/{} {}",
        combat.hp_current,
        combat.hp_max,
        combat.resource_current,
        combat.resource_max,
        combat.resource_type
    );
    let _ = writeln!(block, "Current Gold: {} Gold", player.current_gold as i64);
    let _ = writeln!(
        block,
        "Combat Stats: AD:{} AP:{} Armor:{} MR:{}",
        combat.attack_damage, combat.ability_power, combat.armor, combat.magic_resist
    );
    let _ = writeln!(block, "Abilities: {abilities}");
    let _ = writeln!(block, "Items: {}", player.items.join(", "));
    let _ = writeln!(block, "Summoner Spells: {}", player.spells.join(" / "));
    let _ = write!(block, "Keystone Rune: {}", player.keystone);
    block
}

pub(super) fn render(state: &MatchState) -> String {
    let active = state.active_player();
    let (active_name, active_text) = active.map_or_else(
        || ("Unknown".to_string(), "N/A".to_string()),
        |player| (player.name.clone(), active_block(player)),
    );

    let log = if state.battle_log.is_empty() {
        "- No events recorded.".to_string()
    } else {
        state
            .battle_log
            .iter()
            .map(|entry| format!("- {}s ago: {}", entry.seconds_ago, entry.message))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let allies: String = state
        .allies
        .players
        .iter()
        .filter(|player| active.is_none_or(|me| !std::ptr::eq(*player, me)))
        .map(roster_entry)
        .collect();
    let enemies: String = state.enemies.players.iter().map(roster_entry).collect();

    let ally_side = state.allies.side;
    let enemy_side = state.enemies.side;

    format!(
        "=== GAME STATE REPORT ===
SCORE: {ally_side} {} - {} {enemy_side}

=== ACTIVE PLAYER STATUS ({active_name}) ===
{active_text}

=== OBJECTIVE CONTROL ===
[{ally_side} Objectives]:
{}

[{enemy_side} Objectives]:
{}

=== MAP STRUCTURE STATUS ===
ENEMY_TURRETS_DESTROYED (We killed these):
{}

YOUR_TURRETS_DESTROYED (We lost these):
{}

=== ALLY TEAM ({ally_side}) ===
{allies}
=== ENEMY TEAM ({enemy_side}) ===
{enemies}
=== RECENT BATTLE LOG (Last 10 Events / 60s) ===
{log}
",
        state.allies.total_kills,
        state.enemies.total_kills,
        objectives(&state.allies),
        objectives(&state.enemies),
        lanes(&state.enemies),
        lanes(&state.allies),
    )
}
