//! Transcription backend trait.

use std::fmt;
use std::path::Path;

use crate::error::TranscribeError;

/// A speech-to-text backend. Implementations are black boxes: they take a
/// 16 kHz mono WAV and a language tag and return recognized text.
pub trait TranscriptionBackend {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    /// Whether the backend can currently serve requests (model present,
    /// endpoint configured). Checked before any audio is captured.
    fn is_available(&self) -> bool;

    fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, TranscribeError>;
}

impl fmt::Debug for dyn TranscriptionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionBackend")
            .field("id", &self.id())
            .finish()
    }
}
