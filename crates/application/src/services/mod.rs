//! Application services - Use case implementations

mod coach_dispatcher;
pub mod coach_prompt;

pub use coach_dispatcher::{
    CoachInput, CoachOutcome, CoachRequestDispatcher, DEFAULT_MAX_FILE_SIZE_BYTES,
    DEFAULT_STAGE_TIMEOUT, DispatcherConfig,
};
