//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod coach_port;
mod speech_port;

pub use coach_port::CoachProvider;
#[cfg(test)]
pub use coach_port::MockCoachProvider;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, SynthesisResult};
