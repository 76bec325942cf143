//! Domain entities - Objects produced and consumed by the coaching pipeline

mod coach;

pub use coach::{AdviceAnnotations, CoachAdvice, CoachRequest, CoachResponse, Transcript};
