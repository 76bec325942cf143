//! Coach provider port - Interface for vision-capable coaching models

use async_trait::async_trait;
use domain::{CoachAdvice, CoachProviderKind, GameStats, ImagePayload, Language, Transcript};
#[cfg(test)]
use mockall::automock;

use crate::error::UpstreamFailure;

/// Capability shared by every coaching backend
///
/// Implementations receive the screenshot, the transcribed question and the
/// game state, and return spoken-style advice in the requested language.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoachProvider: Send + Sync {
    /// Analyze the current game situation and answer the player's question
    async fn analyze(
        &self,
        image: &ImagePayload,
        transcript: &Transcript,
        game_stats: &GameStats,
        language: Language,
    ) -> Result<CoachAdvice, UpstreamFailure>;

    /// Which backend this is
    fn kind(&self) -> CoachProviderKind;

    /// Model identifier sent to the backend
    fn model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn mock_coach_provider_analyze() {
        let mut mock = MockCoachProvider::new();
        mock.expect_analyze()
            .withf(|_, transcript, _, language| {
                transcript.text == "what now" && *language == Language::Spanish
            })
            .returning(|_, _, _, _| Ok(CoachAdvice::new("Empuja la línea")));
        mock.expect_kind().return_const(CoachProviderKind::Grok);

        let image = ImagePayload::new(vec![0xFF, 0xD8, 0xFF, 0xE0], 1024).unwrap();
        let stats = GameStats::from_value(json!({"gameData": {"gameTime": 60}}), 1024).unwrap();

        let advice = mock
            .analyze(&image, &Transcript::new("what now", None), &stats, Language::Spanish)
            .await
            .unwrap();
        assert_eq!(advice.text, "Empuja la línea");
        assert_eq!(mock.kind(), CoachProviderKind::Grok);
    }
}
