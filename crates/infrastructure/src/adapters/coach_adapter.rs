//! Coach adapter - Implements CoachProvider on top of an ai_core vision engine

use ai_core::{InferenceError, InlineImage, VisionEngine, VisionRequest};
use application::error::UpstreamFailure;
use application::ports::CoachProvider;
use application::services::coach_prompt;
use async_trait::async_trait;
use domain::{
    AdviceAnnotations, CoachAdvice, CoachProviderKind, GameStats, ImagePayload, Language,
    Transcript,
};
use tracing::{debug, instrument, warn};

/// Coaching backend driven by a multimodal model
///
/// Builds the coaching prompt, attaches the screenshot inline and turns the
/// model's reply into [`CoachAdvice`].
pub struct VisionCoachAdapter<E> {
    engine: E,
    kind: CoachProviderKind,
}

impl<E: VisionEngine> std::fmt::Debug for VisionCoachAdapter<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionCoachAdapter")
            .field("kind", &self.kind)
            .field("model", &self.engine.model())
            .finish()
    }
}

impl<E: VisionEngine> VisionCoachAdapter<E> {
    /// Wrap an engine as a coach provider of the given kind
    pub const fn new(engine: E, kind: CoachProviderKind) -> Self {
        Self { engine, kind }
    }

    /// Classify an inference error for the pipeline
    pub fn map_error(err: InferenceError) -> UpstreamFailure {
        let detail = err.to_string();
        match err {
            InferenceError::Timeout(_) => UpstreamFailure::timeout(detail),
            InferenceError::RateLimited => UpstreamFailure::rate_limited(detail),
            InferenceError::InvalidResponse(_) => UpstreamFailure::malformed(detail),
            InferenceError::ConnectionFailed(_)
            | InferenceError::RequestFailed(_)
            | InferenceError::ModelNotAvailable(_)
            | InferenceError::ServerError(_)
            | InferenceError::Configuration(_) => UpstreamFailure::unavailable(detail),
        }
    }
}

#[async_trait]
impl<E: VisionEngine> CoachProvider for VisionCoachAdapter<E> {
    #[instrument(
        skip(self, image, transcript, game_stats),
        fields(provider = %self.kind, model = %self.engine.model(), image_size = image.size_bytes())
    )]
    async fn analyze(
        &self,
        image: &ImagePayload,
        transcript: &Transcript,
        game_stats: &GameStats,
        language: Language,
    ) -> Result<CoachAdvice, UpstreamFailure> {
        let request = VisionRequest::new(
            coach_prompt::system_prompt(),
            coach_prompt::user_message(transcript, game_stats, language),
        )
        .with_image(InlineImage::new(image.mime_type(), image.data().to_vec()));

        let response = self.engine.generate(request).await.map_err(|e| {
            warn!(provider = %self.kind, error = %e, "Coach model call failed");
            Self::map_error(e)
        })?;

        debug!(
            tokens = ?response.usage.map(|u| u.total_tokens),
            finish_reason = ?response.finish_reason,
            "Coach advice received"
        );

        Ok(
            CoachAdvice::new(response.content).with_annotations(AdviceAnnotations {
                model: Some(response.model),
                tokens_used: response.usage.map(|u| u.total_tokens),
                finish_reason: response.finish_reason,
            }),
        )
    }

    fn kind(&self) -> CoachProviderKind {
        self.kind
    }

    fn model(&self) -> String {
        self.engine.model().to_string()
    }
}
