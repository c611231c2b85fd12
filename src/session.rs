//! Explicit session state for the interactive front-end.

use crate::error::{ScribeError, TranscribeError};

/// Where the session currently is in the capture lifecycle.
#[derive(Debug)]
pub enum Phase {
    Idle,
    /// Held only while the blocking capture closure runs. Callers of
    /// `capture_with` never observe it: by the time the call returns the
    /// phase is `Done` or `Failed`.
    Capturing,
    Done(String),
    Failed(TranscribeError),
}

/// One interactive session: the current phase plus the pause flag.
///
/// At most one transcription is live; each completed capture overwrites the
/// previous result. The pause flag gates new captures only, it cannot
/// interrupt a capture already in progress.
pub struct Session {
    phase: Phase,
    paused: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            paused: false,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Flip the pause flag, returning the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Run a capture unless paused. Returns false (leaving the phase and any
    /// stored transcription untouched) when the session is paused.
    pub fn capture_with<F>(&mut self, capture: F) -> bool
    where
        F: FnOnce() -> Result<String, ScribeError>,
    {
        if self.paused {
            return false;
        }
        self.phase = Phase::Capturing;
        self.phase = match capture() {
            Ok(text) => Phase::Done(text),
            Err(ScribeError::Transcribe(e)) => Phase::Failed(e),
            Err(other) => Phase::Failed(TranscribeError::Unexpected(other.to_string())),
        };
        true
    }

    /// The stored transcription, present only after a successful capture.
    /// Save and download actions are offered only when this is `Some`.
    pub fn transcription(&self) -> Option<&str> {
        match &self.phase {
            Phase::Done(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
