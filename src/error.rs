//! Error types for mic-scribe.

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum ScribeError {
    #[error("audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("{0}")]
    Transcribe(#[from] TranscribeError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of a single capture-and-transcribe invocation.
///
/// The `Display` strings are the user-facing messages; the UI prints them
/// verbatim. No retry is attempted on any variant.
#[derive(Error, Debug)]
pub enum TranscribeError {
    /// The listen window elapsed without any speech energy.
    #[error("no speech detected within the timeout period")]
    NoSpeech,

    /// Audio was captured but the backend produced no text.
    #[error("could not understand the audio")]
    Unintelligible,

    /// The backend request failed (network, service, or missing engine).
    #[error("could not request results from the service: {0}")]
    Request(String),

    /// The provider name did not match any known backend.
    #[error("Unsupported provider")]
    UnsupportedProvider,

    /// Anything else, with the original failure message.
    #[error("an unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Audio capture errors.
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("no audio input device available")]
    NoInputDevice,

    #[error("failed to get device configuration: {0}")]
    DeviceConfig(String),

    #[error("failed to build audio stream: {0}")]
    StreamBuild(String),

    #[error("stream playback error: {0}")]
    StreamPlay(String),

    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("settings file not found: {0}")]
    FileNotFound(String),

    #[error("failed to parse settings: {0}")]
    Parse(String),

    #[error("invalid setting: {field} = {value}")]
    InvalidValue { field: String, value: String },
}

pub type Result<T> = std::result::Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_literals() {
        assert_eq!(
            TranscribeError::NoSpeech.to_string(),
            "no speech detected within the timeout period"
        );
        assert_eq!(
            TranscribeError::Unintelligible.to_string(),
            "could not understand the audio"
        );
        assert_eq!(
            TranscribeError::UnsupportedProvider.to_string(),
            "Unsupported provider"
        );
    }

    #[test]
    fn request_error_embeds_reason() {
        let err = TranscribeError::Request("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
    }
}
