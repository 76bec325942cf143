//! Live client payload to [`MatchState`]

use serde_json::{Map, Value};

use super::{Ability, CombatStats, MatchState, Player, PlayerScore, Team, TeamSide};

const ABILITY_KEYS: [char; 4] = ['Q', 'W', 'E', 'R'];

static NULL: Value = Value::Null;

pub(super) fn parse(raw: &Map<String, Value>) -> MatchState {
    let game_time = raw
        .get("gameData")
        .and_then(|data| number(data, "gameTime"))
        .unwrap_or(0.0);
    let active_raw = raw.get("activePlayer").unwrap_or(&NULL);
    let local_names: Vec<&str> = ["riotId", "summonerName"]
        .iter()
        .filter_map(|key| text(active_raw, key))
        .collect();

    let mut players = Vec::new();
    let mut active = None;
    for entry in raw
        .get("allPlayers")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        let player = parse_player(entry);
        let is_local = ["riotId", "summonerName"]
            .iter()
            .filter_map(|key| text(entry, key))
            .chain([player.name.as_str()])
            .any(|name| local_names.contains(&name));
        if is_local && active.is_none() {
            active = Some(players.len());
        }
        players.push(player);
    }

    let local_side = active.map_or(TeamSide::Order, |index| players[index].side);
    if let Some(index) = active {
        enrich_local_player(&mut players[index], active_raw);
    }

    let mut allies = Team::new(local_side);
    let mut enemies = Team::new(local_side.opponent());
    let mut active_index = None;
    for (index, player) in players.into_iter().enumerate() {
        if player.side == local_side {
            if active == Some(index) {
                active_index = Some(allies.players.len());
            }
            allies.players.push(player);
        } else {
            enemies.players.push(player);
        }
    }

    MatchState {
        game_time,
        allies,
        enemies,
        battle_log: Vec::new(),
        active: active_index,
    }
}

fn parse_player(entry: &Value) -> Player {
    let items: Vec<String> = entry
        .get("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| text(item, "displayName"))
        .map(str::to_string)
        .collect();

    let spell = |slot: &str| {
        entry
            .get("summonerSpells")
            .and_then(|spells| spells.get(slot))
            .and_then(|spell| text(spell, "displayName"))
            .unwrap_or("Unknown")
            .to_string()
    };

    let scores = entry.get("scores").unwrap_or(&NULL);

    Player {
        name: display_name(entry),
        champion: text(entry, "championName").unwrap_or("Unknown").to_string(),
        side: side_from_api(text(entry, "team").unwrap_or_default()),
        role: text(entry, "position")
            .filter(|position| !position.is_empty())
            .unwrap_or("NONE")
            .to_string(),
        level: whole(entry, "level").unwrap_or(1),
        is_dead: entry.get("isDead").and_then(Value::as_bool).unwrap_or(false),
        respawn_timer: number(entry, "respawnTimer").unwrap_or(0.0),
        items: if items.is_empty() {
            vec!["Empty Inventory".to_string()]
        } else {
            items
        },
        spells: [spell("summonerSpellOne"), spell("summonerSpellTwo")],
        keystone: entry
            .get("runes")
            .and_then(|runes| runes.get("keystone"))
            .and_then(|keystone| text(keystone, "displayName"))
            .unwrap_or("Unknown Rune")
            .to_string(),
        scores: PlayerScore {
            kills: whole(scores, "kills").unwrap_or(0),
            deaths: whole(scores, "deaths").unwrap_or(0),
            assists: whole(scores, "assists").unwrap_or(0),
            creep_score: whole(scores, "creepScore").unwrap_or(0),
            vision_score: number(scores, "wardScore").unwrap_or(0.0),
        },
        combat_stats: None,
        abilities: Vec::new(),
        current_gold: 0.0,
    }
}

/// Summoner name, then `GameName#Tag`, then the champion
fn display_name(entry: &Value) -> String {
    if let Some(name) = text(entry, "summonerName").filter(|name| !name.is_empty()) {
        return name.to_string();
    }
    match (
        text(entry, "riotIdGameName").filter(|name| !name.is_empty()),
        text(entry, "riotIdTagLine").filter(|tag| !tag.is_empty()),
    ) {
        (Some(name), Some(tag)) => format!("{name}#{tag}"),
        (Some(name), None) => name.to_string(),
        _ => text(entry, "championName")
            .unwrap_or("Unknown Champion")
            .to_string(),
    }
}

fn enrich_local_player(player: &mut Player, active_raw: &Value) {
    player.current_gold = number(active_raw, "currentGold").unwrap_or(0.0);

    if let Some(stats) = active_raw.get("championStats").filter(|s| s.is_object()) {
        player.combat_stats = Some(CombatStats {
            hp_current: whole(stats, "currentHealth").unwrap_or(0),
            hp_max: whole(stats, "maxHealth").unwrap_or(1),
            resource_current: whole(stats, "resourceValue").unwrap_or(0),
            resource_max: whole(stats, "resourceMax").unwrap_or(1),
            resource_type: text(stats, "resourceType").unwrap_or("MANA").to_string(),
            attack_damage: whole(stats, "attackDamage").unwrap_or(0),
            ability_power: whole(stats, "abilityPower").unwrap_or(0),
            armor: whole(stats, "armor").unwrap_or(0),
            magic_resist: whole(stats, "magicResist").unwrap_or(0),
        });
    }

    if let Some(abilities) = active_raw.get("abilities") {
        player.abilities = ABILITY_KEYS
            .iter()
            .filter_map(|key| {
                let ability = abilities.get(key.to_string())?;
                Some(Ability {
                    key: *key,
                    level: whole(ability, "abilityLevel").unwrap_or(0),
                })
            })
            .collect();
    }
}

fn side_from_api(team: &str) -> TeamSide {
    if team.eq_ignore_ascii_case("CHAOS") {
        TeamSide::Chaos
    } else {
        TeamSide::Order
    }
}

pub(super) fn text<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

pub(super) fn number(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

/// Integer field, truncating fractional values the client sometimes sends
#[allow(clippy::cast_possible_truncation)]
fn whole(value: &Value, key: &str) -> Option<i64> {
    let field = value.get(key)?;
    field.as_i64().or_else(|| field.as_f64().map(|n| n as i64))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn display_name_prefers_summoner_name() {
        assert_eq!(
            display_name(&json!({ "summonerName": "Faker", "riotIdGameName": "Hide" })),
            "Faker"
        );
        assert_eq!(
            display_name(&json!({ "riotIdGameName": "Hide", "riotIdTagLine": "KR1" })),
            "Hide#KR1"
        );
        assert_eq!(display_name(&json!({ "riotIdGameName": "Hide" })), "Hide");
        assert_eq!(display_name(&json!({ "championName": "Zed" })), "Zed");
    }

    #[test]
    fn sparse_player_gets_defaults() {
        let player = parse_player(&json!({ "championName": "Annie" }));

        assert_eq!(player.role, "NONE");
        assert_eq!(player.level, 1);
        assert_eq!(player.items, vec!["Empty Inventory".to_string()]);
        assert_eq!(player.spells, ["Unknown".to_string(), "Unknown".to_string()]);
        assert_eq!(player.keystone, "Unknown Rune");
        assert_eq!(player.side, TeamSide::Order);
    }

    #[test]
    fn missing_champion_stats_leave_combat_block_empty() {
        let mut player = parse_player(&json!({ "championName": "Annie" }));
        enrich_local_player(&mut player, &json!({ "currentGold": 500 }));

        assert!(player.combat_stats.is_none());
        assert!(player.abilities.is_empty());
        assert!((player.current_gold - 500.0).abs() < f64::EPSILON);
    }
}
