//! Pluggable transcription backends and the capture-and-transcribe flow.

mod backend;
mod remote_api;
mod wav;
mod whisper_cli;

pub use backend::TranscriptionBackend;
pub use remote_api::RemoteApiBackend;
pub use wav::write_wav_from_samples;
pub use whisper_cli::WhisperCliBackend;

use std::time::{SystemTime, UNIX_EPOCH};

use log::{info, warn};

use crate::audio::capture_utterance;
use crate::config::{Provider, Settings};
use crate::error::{Result, TranscribeError};
use crate::paths;

/// Resolve the configured provider to a backend.
///
/// Called before any audio is captured, so an unsupported or unconfigured
/// backend never costs the user a microphone session.
pub fn select_backend(settings: &Settings) -> Result<Box<dyn TranscriptionBackend>> {
    let backend: Box<dyn TranscriptionBackend> = match settings.recognition.provider {
        Provider::Remote => Box::new(RemoteApiBackend::new(settings.remote.clone())),
        Provider::Offline => Box::new(WhisperCliBackend::new(settings.offline.clone())),
    };
    if !backend.is_available() {
        return Err(TranscribeError::Request(format!(
            "backend {} is not configured",
            backend.name()
        ))
        .into());
    }
    Ok(backend)
}

/// Capture one utterance from the microphone and transcribe it.
///
/// Sequential and blocking: validate the backend, listen (bounded by the
/// configured timeout), write the utterance to a temporary WAV, hand it to
/// the backend, delete the WAV. No retries; every failure is terminal for
/// this invocation.
pub fn capture_and_transcribe(settings: &Settings) -> Result<String> {
    let backend = select_backend(settings)?;
    info!(
        "transcribing via {} (language {})",
        backend.name(),
        settings.recognition.language
    );

    let samples = capture_utterance(&settings.listen)?;

    let temp_dir = paths::temp_audio_dir();
    std::fs::create_dir_all(&temp_dir)?;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let wav_path = temp_dir.join(format!("utterance_{}.wav", millis));

    let result = write_wav_from_samples(&wav_path, &samples).and_then(|_| {
        backend
            .transcribe(&wav_path, &settings.recognition.language)
            .map_err(Into::into)
    });
    if std::fs::remove_file(&wav_path).is_err() && wav_path.exists() {
        warn!("failed to remove temp WAV {:?}", wav_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RemoteConfig;

    #[test]
    fn remote_backend_selected_when_configured() {
        let settings = Settings::default();
        let backend = select_backend(&settings).unwrap();
        assert_eq!(backend.id(), "remote-api");
    }

    #[test]
    fn unconfigured_backend_rejected_before_capture() {
        let mut settings = Settings::default();
        settings.remote = RemoteConfig {
            base_url: String::new(),
            ..Default::default()
        };
        assert!(select_backend(&settings).is_err());
    }

    #[test]
    fn offline_without_model_rejected_before_capture() {
        let mut settings = Settings::default();
        settings.recognition.provider = Provider::Offline;
        assert!(select_backend(&settings).is_err());
    }
}
