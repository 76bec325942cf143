//! Coach request dispatcher - Runs the coaching pipeline for one request
//!
//! This service orchestrates the complete coaching flow:
//! 1. Validate the uploaded screenshot, audio, game stats and language
//! 2. Transcribe the spoken question (STT)
//! 3. Ask the configured coach model for advice
//! 4. Synthesize the advice as audio (TTS)
//!
//! Stages run strictly in order. A failure in any stage ends the request;
//! nothing is retried and nothing is persisted.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use domain::{
    AudioFormat, AudioPayload, CoachAdvice, CoachProviderKind, CoachRequest, CoachResponse,
    GameStats, ImagePayload, Language, Transcript,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ApplicationError, PipelineStage, UpstreamFailure},
    ports::{CoachProvider, SpeechPort},
    request_context::RequestContext,
};

/// Default ceiling for each uploaded file (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Default per-stage upstream timeout
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the coaching pipeline
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Ceiling for the screenshot and the audio file, each
    pub max_file_size_bytes: usize,
    /// Ceiling for the serialized game stats
    pub max_game_stats_bytes: usize,
    /// Deadline for each upstream call
    pub stage_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_BYTES,
            max_game_stats_bytes: domain::DEFAULT_MAX_GAME_STATS_BYTES,
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }
}

/// Unvalidated request fields as received from the transport layer
#[derive(Debug, Clone, Default)]
pub struct CoachInput {
    /// Screenshot bytes
    pub image: Option<Vec<u8>>,
    /// Recorded question bytes
    pub audio: Option<Vec<u8>>,
    /// Game stats as JSON text
    pub game_stats: Option<String>,
    /// Language name or ISO code
    pub language: Option<String>,
}

/// Everything produced by one pipeline run
#[derive(Debug, Clone)]
pub struct CoachOutcome {
    /// Synthesized reply
    pub response: CoachResponse,
    /// Recognized question
    pub transcript: Transcript,
    /// Language used for the reply
    pub language: Language,
    /// Backend that produced the advice
    pub provider: CoachProviderKind,
    /// Model that produced the advice
    pub model: String,
}

/// Runs validate, transcribe, analyze and synthesize for each request
pub struct CoachRequestDispatcher {
    speech: Arc<dyn SpeechPort>,
    coach: Arc<dyn CoachProvider>,
    config: DispatcherConfig,
}

impl fmt::Debug for CoachRequestDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoachRequestDispatcher")
            .field("provider", &self.coach.kind())
            .field("model", &self.coach.model())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CoachRequestDispatcher {
    /// Create a dispatcher with default limits
    pub fn new(speech: Arc<dyn SpeechPort>, coach: Arc<dyn CoachProvider>) -> Self {
        Self::with_config(speech, coach, DispatcherConfig::default())
    }

    /// Create a dispatcher with custom limits
    pub fn with_config(
        speech: Arc<dyn SpeechPort>,
        coach: Arc<dyn CoachProvider>,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            speech,
            coach,
            config,
        }
    }

    /// Get the current configuration
    #[must_use]
    pub const fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Backend handling analysis
    #[must_use]
    pub fn provider(&self) -> CoachProviderKind {
        self.coach.kind()
    }

    /// Model handling analysis
    #[must_use]
    pub fn model(&self) -> String {
        self.coach.model()
    }

    /// Format of the synthesized reply
    #[must_use]
    pub fn audio_format(&self) -> AudioFormat {
        self.speech.output_format()
    }

    /// Validate raw input into a [`CoachRequest`]
    ///
    /// No upstream provider is contacted by this step.
    pub fn validate(&self, input: CoachInput) -> Result<CoachRequest, ApplicationError> {
        let image = input
            .image
            .ok_or_else(|| ApplicationError::InvalidRequest("missing 'image' file".into()))?;
        let audio = input
            .audio
            .ok_or_else(|| ApplicationError::InvalidRequest("missing 'audio' file".into()))?;
        let game_stats = input.game_stats.ok_or_else(|| {
            ApplicationError::InvalidRequest("missing 'game_stats' field".into())
        })?;

        let image = ImagePayload::new(image, self.config.max_file_size_bytes)?;
        let audio = AudioPayload::new(audio, self.config.max_file_size_bytes)?;
        let game_stats = GameStats::parse(&game_stats, self.config.max_game_stats_bytes)?;
        let language = match input.language.as_deref().map(str::trim) {
            None | Some("") => Language::default(),
            Some(name) => name.parse()?,
        };

        Ok(CoachRequest::new(image, audio, game_stats, language))
    }

    /// Validate and run the full pipeline
    #[instrument(skip(self, ctx, input), fields(
        request_id = %ctx.request_id(),
        provider = %self.coach.kind(),
    ))]
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        input: CoachInput,
    ) -> Result<CoachOutcome, ApplicationError> {
        let request = self.validate(input).inspect_err(|e| {
            debug!(error = %e, "Rejected coaching request");
        })?;
        self.process(ctx, request).await
    }

    /// Run transcription, analysis and synthesis for a validated request
    #[instrument(skip(self, ctx, request), fields(
        request_id = %ctx.request_id(),
        image_format = %request.image.format(),
        audio_format = %request.audio.format(),
        language = %request.language,
    ))]
    pub async fn process(
        &self,
        ctx: &RequestContext,
        request: CoachRequest,
    ) -> Result<CoachOutcome, ApplicationError> {
        let CoachRequest {
            image,
            audio,
            game_stats,
            language,
        } = request;

        // Step 1: Transcribe the question
        info!("Starting transcription");
        let audio_format = audio.format();
        let transcript = self
            .run_stage(
                ctx,
                PipelineStage::Transcription,
                self.speech
                    .transcribe(audio.into_data(), audio_format, Some(language)),
            )
            .await?;

        debug!(
            transcript = %transcript.text,
            empty = transcript.is_empty(),
            "Transcription complete"
        );

        // Step 2: Ask the coach model
        info!(game_time = %game_stats.formatted_time(), "Requesting coach analysis");
        let advice: CoachAdvice = self
            .run_stage(
                ctx,
                PipelineStage::Analysis,
                self.coach.analyze(&image, &transcript, &game_stats, language),
            )
            .await?;

        if advice.text.trim().is_empty() {
            return Err(self.stage_error(
                ctx,
                PipelineStage::Analysis,
                UpstreamFailure::malformed("coach model returned empty advice"),
            ));
        }

        debug!(
            advice_len = advice.text.len(),
            tokens_used = ?advice.annotations.tokens_used,
            finish_reason = ?advice.annotations.finish_reason,
            "Coach advice generated"
        );

        // Step 3: Speak the advice
        info!("Synthesizing advice");
        let synthesis = self
            .run_stage(
                ctx,
                PipelineStage::Synthesis,
                self.speech.synthesize(advice.text.clone(), language),
            )
            .await?;

        #[allow(clippy::cast_possible_truncation)]
        let processing_time_ms = ctx.elapsed().as_millis() as u64;

        info!(
            processing_time_ms,
            audio_bytes = synthesis.audio_data.len(),
            "Coaching request complete"
        );

        Ok(CoachOutcome {
            response: CoachResponse {
                audio: synthesis.audio_data,
                audio_format: synthesis.format,
                advice: advice.text,
            },
            transcript,
            language,
            provider: self.coach.kind(),
            model: advice.annotations.model.unwrap_or_else(|| self.coach.model()),
        })
    }

    /// Await one upstream call under the stage deadline
    async fn run_stage<T>(
        &self,
        ctx: &RequestContext,
        stage: PipelineStage,
        call: impl Future<Output = Result<T, UpstreamFailure>>,
    ) -> Result<T, ApplicationError> {
        let result = tokio::time::timeout(self.config.stage_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(UpstreamFailure::timeout(format!(
                    "no response within {}ms",
                    self.config.stage_timeout.as_millis()
                )))
            });

        result.map_err(|failure| self.stage_error(ctx, stage, failure))
    }

    fn stage_error(
        &self,
        ctx: &RequestContext,
        stage: PipelineStage,
        failure: UpstreamFailure,
    ) -> ApplicationError {
        warn!(
            request_id = %ctx.request_id(),
            stage = %stage,
            kind = %failure.kind,
            provider = %self.coach.kind(),
            detail = %failure.detail,
            "Upstream call failed"
        );
        ApplicationError::upstream(stage, failure)
    }
}
