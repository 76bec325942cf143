//! Prompt construction for coach models
//!
//! Every provider receives the same system prompt and the same user message;
//! only the wire format differs.

use domain::{GameStats, Language, MatchState, Transcript};

/// Placeholder used when the player's audio contained no recognizable speech
pub const NO_QUESTION_PLACEHOLDER: &str = "(no spoken question detected)";

const IDENTITY: &str = "You are Sensii, a League of Legends voice coach. You deliver game \
knowledge fast and clear during live matches.

Your job: Answer questions about the game. Be quick, be accurate, get to the point.";

const PERSONALITY: &str = "## Personality

You're a knowledgeable teammate on comms. Casual, direct, confident.

- Use gaming slang naturally (tilted, gapped, inting, fed, diff, etc.)
- No filler words, no hedging

If the player's message is aggressive or toxic toward you, match their energy with a \
short roast (still under 20 words), then answer their question in the same breath.";

const KNOWLEDGE: &str = "## Knowledge Hierarchy

1. Game State Report: the absolute truth of the current moment.
2. Screenshot: what the player sees right now (minimap, fights, health bars).
3. Internal knowledge: general strategy, slang and tone. Do not invent specific ability effects.";

const SCOPE: &str = "## Scope

You only answer League of Legends questions. Off-topic? Just say \"I only do League.\"";

const HARD_LIMITS: &str = "## Hard Limits

1. Never encourage cheating, exploits, or actual harassment of real people.
2. Never assign the wrong effect to an ability key. If unsure, give general advice instead.";

const RESPONSE_RULES: &str = "## Response Rules

BE EXTREMELY SHORT. Player is mid-game. Extra words get them killed.

Length guide:
- Ideal: ~20 words if that's enough
- Typical: under 40 words when a reason helps
- Max: 80 words only if truly needed

Only add a reason if it changes the answer's usefulness:
- \"What item?\" -> \"Serylda's.\" (no reason needed)
- \"Should I fight?\" -> \"No, no ult.\" (reason matters)

If no spoken question was detected, give the single most useful call for the current \
situation.

This is voice output:
- No bullet points, no markdown, no lists
- Speak naturally, one flowing sentence";

/// The coaching system prompt
#[must_use]
pub fn system_prompt() -> String {
    [IDENTITY, PERSONALITY, KNOWLEDGE, SCOPE, HARD_LIMITS, RESPONSE_RULES].join("\n\n")
}

/// Build the user message sent alongside the screenshot
///
/// Format: `[M:SS] <question>\n\n<game state report>\n\n[Respond in <Language>]`
#[must_use]
pub fn user_message(transcript: &Transcript, game_stats: &GameStats, language: Language) -> String {
    let question = if transcript.is_empty() {
        NO_QUESTION_PLACEHOLDER
    } else {
        transcript.text.trim()
    };

    let state = MatchState::from_stats(game_stats);
    format!(
        "[{}] {question}\n\n{}\n\n[Respond in {}]",
        state.formatted_time(),
        state.report().trim_end(),
        language.english_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stats() -> GameStats {
        GameStats::from_value(
            json!({
                "activePlayer": { "riotId": "Me#NA1", "currentGold": 300.0 },
                "allPlayers": [
                    { "riotId": "Me#NA1", "summonerName": "Me#NA1", "championName": "Jinx",
                      "position": "BOTTOM", "team": "ORDER", "scores": { "kills": 3 } },
                    { "summonerName": "Them#EUW", "championName": "Draven",
                      "position": "BOTTOM", "team": "CHAOS", "scores": { "kills": 1 } }
                ],
                "events": { "Events": [
                    { "EventName": "ChampionKill", "EventTime": 880.0,
                      "KillerName": "Me", "VictimName": "Them" }
                ] },
                "gameData": { "gameTime": 905.2 }
            }),
            50 * 1024,
        )
        .unwrap()
    }

    #[test]
    fn system_prompt_has_all_sections() {
        let prompt = system_prompt();
        assert!(prompt.starts_with("You are Sensii"));
        for heading in [
            "## Personality",
            "## Knowledge Hierarchy",
            "## Scope",
            "## Hard Limits",
            "## Response Rules",
        ] {
            assert!(prompt.contains(heading), "missing {heading}");
        }
        assert!(prompt.contains("I only do League."));
        assert!(prompt.contains("Game State Report"));
    }

    #[test]
    fn user_message_embeds_game_state_report() {
        let message = user_message(
            &Transcript::new("  should I back? ", None),
            &stats(),
            Language::Spanish,
        );
        assert!(message.starts_with("[15:05] should I back?\n\n=== GAME STATE REPORT ===\n"));
        assert!(message.contains("SCORE: ORDER 3 - 1 CHAOS\n"));
        assert!(message.contains("=== ACTIVE PLAYER STATUS (Me#NA1) ===\nChampion: Jinx"));
        assert!(message.contains("- 25s ago: Jinx (ORDER) killed Draven (CHAOS)\n\n[Respond in Spanish]"));
        assert!(message.ends_with("\n\n[Respond in Spanish]"));
        assert!(!message.contains("\"gameTime\""));
    }

    #[test]
    fn empty_transcript_uses_placeholder() {
        let message = user_message(&Transcript::empty(None), &stats(), Language::English);
        assert!(message.starts_with("[15:05] (no spoken question detected)\n\n"));
    }

    #[test]
    fn bare_stats_still_produce_a_report() {
        let bare = GameStats::from_value(json!({"gameData": {"gameTime": 5}}), 1024).unwrap();
        let message = user_message(&Transcript::new("hi", None), &bare, Language::English);
        assert!(message.starts_with("[0:05] hi\n\n=== GAME STATE REPORT ===\n"));
        assert!(message.contains("=== ACTIVE PLAYER STATUS (Unknown) ===\nN/A"));
        assert!(message.ends_with("- No events recorded.\n\n[Respond in English]"));
    }
}
