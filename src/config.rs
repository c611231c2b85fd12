//! Settings for capture and transcription.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, TranscribeError};

/// Language tags the UI offers. Backends receive the tag as-is.
pub const SUPPORTED_LANGUAGES: [&str; 5] = ["en-US", "fr-FR", "es-ES", "de-DE", "it-IT"];

/// Transcription provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// Remote HTTP transcription API.
    Remote,
    /// Local whisper.cpp CLI, no network.
    Offline,
}

impl FromStr for Provider {
    type Err = TranscribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "cloud" => Ok(Provider::Remote),
            "offline" | "local" | "whisper" => Ok(Provider::Offline),
            _ => Err(TranscribeError::UnsupportedProvider),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Remote => write!(f, "remote"),
            Provider::Offline => write!(f, "offline"),
        }
    }
}

/// Root settings structure. Stored as JSON in the app config dir.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub recognition: RecognitionConfig,
    pub listen: ListenConfig,
    pub remote: RemoteConfig,
    pub offline: OfflineConfig,
    pub output: OutputConfig,
}

/// Which backend to use and in which language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    pub provider: Provider,
    pub language: String,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            provider: Provider::Remote,
            language: "en-US".to_string(),
        }
    }
}

/// Utterance capture parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenConfig {
    /// Seconds to wait for speech to start before giving up.
    pub timeout_secs: u64,
    /// Trailing silence (ms) that ends an utterance.
    pub silence_hangover_ms: u64,
    /// Hard cap on utterance length, seconds.
    pub max_utterance_secs: u64,
    /// RMS energy above which a frame counts as speech (0.0 - 1.0).
    pub energy_threshold: f32,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            silence_hangover_ms: 900,
            max_utterance_secs: 30,
            energy_threshold: 0.02,
        }
    }
}

/// Remote transcription API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Full endpoint URL, e.g. http://localhost:8000/v1/audio/transcriptions
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/v1/audio/transcriptions".to_string(),
            model: "whisper-1".to_string(),
            api_key: None,
        }
    }
}

/// Local whisper.cpp CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OfflineConfig {
    /// Path to a ggml model file.
    pub model_path: Option<String>,
    /// Path to the whisper-cli binary. Defaults to "whisper-cli" on PATH.
    pub binary_path: Option<String>,
}

/// Transcript output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub default_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_filename: "transcription.txt".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound(path.display().to_string()))?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from the default settings path, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_LANGUAGES.contains(&self.recognition.language.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "recognition.language".to_string(),
                value: self.recognition.language.clone(),
            });
        }
        if self.listen.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listen.timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.recognition.provider, Provider::Remote);
        assert_eq!(settings.recognition.language, "en-US");
        assert_eq!(settings.listen.timeout_secs, 15);
        assert_eq!(settings.output.default_filename, "transcription.txt");
        settings.validate().unwrap();
    }

    #[test]
    fn parse_settings_json() {
        let json = r#"{
            "recognition": { "provider": "offline", "language": "de-DE" },
            "listen": { "timeout_secs": 10 }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.recognition.provider, Provider::Offline);
        assert_eq!(settings.recognition.language, "de-DE");
        assert_eq!(settings.listen.timeout_secs, 10);
        // Unspecified sections keep defaults
        assert_eq!(settings.listen.silence_hangover_ms, 900);
    }

    #[test]
    fn provider_from_str() {
        assert_eq!("remote".parse::<Provider>().unwrap(), Provider::Remote);
        assert_eq!("Cloud".parse::<Provider>().unwrap(), Provider::Remote);
        assert_eq!("offline".parse::<Provider>().unwrap(), Provider::Offline);
        assert_eq!("whisper".parse::<Provider>().unwrap(), Provider::Offline);
    }

    #[test]
    fn unknown_provider_is_unsupported() {
        let err = "sphinx2".parse::<Provider>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported provider");
    }

    #[test]
    fn unsupported_language_rejected() {
        let mut settings = Settings::default();
        settings.recognition.language = "xx-XX".to_string();
        assert!(settings.validate().is_err());
    }
}
