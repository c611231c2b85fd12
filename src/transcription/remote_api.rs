//! Remote transcription over an OpenAI-compatible HTTP API.

use std::path::Path;
use std::time::Duration;

use log::debug;

use crate::config::RemoteConfig;
use crate::error::TranscribeError;

use super::backend::TranscriptionBackend;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Remote backend. POSTs the utterance WAV as multipart to the configured
/// endpoint (user provides the full URL, e.g.
/// http://localhost:8000/v1/audio/transcriptions).
pub struct RemoteApiBackend {
    config: RemoteConfig,
}

impl RemoteApiBackend {
    pub fn new(config: RemoteConfig) -> Self {
        Self {
            config: RemoteConfig {
                base_url: config.base_url.trim().to_string(),
                ..config
            },
        }
    }
}

impl TranscriptionBackend for RemoteApiBackend {
    fn id(&self) -> &'static str {
        "remote-api"
    }

    fn name(&self) -> &'static str {
        "Remote API"
    }

    fn is_available(&self) -> bool {
        !self.config.base_url.is_empty()
    }

    fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, TranscribeError> {
        let bytes = std::fs::read(audio_path)
            .map_err(|e| TranscribeError::Unexpected(e.to_string()))?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let part = reqwest::blocking::multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("audio/wav")
            .map_err(|e| TranscribeError::Unexpected(e.to_string()))?;
        let form = reqwest::blocking::multipart::Form::new()
            .part("file", part)
            .text("model", self.config.model.clone())
            .text("language", language.to_string());

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranscribeError::Unexpected(e.to_string()))?;
        let mut req = client.post(&self.config.base_url).multipart(form);
        if let Some(ref key) = self.config.api_key {
            req = req.bearer_auth(key);
        }

        debug!("POST {} (language={})", self.config.base_url, language);
        let response = req
            .send()
            .map_err(|e| TranscribeError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            return Err(TranscribeError::Request(format!(
                "API error {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| TranscribeError::Request(e.to_string()))?;
        let text = json
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .trim()
            .to_string();

        if text.is_empty() {
            return Err(TranscribeError::Unintelligible);
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_base_url() {
        let backend = RemoteApiBackend::new(RemoteConfig {
            base_url: "  http://localhost:8000/v1/audio/transcriptions  ".to_string(),
            ..Default::default()
        });
        assert!(backend.is_available());
        assert_eq!(
            backend.config.base_url,
            "http://localhost:8000/v1/audio/transcriptions"
        );
    }

    #[test]
    fn unavailable_without_endpoint() {
        let backend = RemoteApiBackend::new(RemoteConfig {
            base_url: String::new(),
            ..Default::default()
        });
        assert!(!backend.is_available());
    }

    #[test]
    fn missing_audio_file_is_unexpected_error() {
        let backend = RemoteApiBackend::new(RemoteConfig::default());
        let err = backend
            .transcribe(Path::new("/nonexistent/utterance.wav"), "en-US")
            .unwrap_err();
        assert!(matches!(err, TranscribeError::Unexpected(_)));
    }
}
