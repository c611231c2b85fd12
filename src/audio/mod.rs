//! Microphone capture and utterance endpointing.

mod buffer;
mod capture;

pub use buffer::UtteranceBuffer;
pub use capture::{capture_utterance, TARGET_SAMPLE_RATE};
