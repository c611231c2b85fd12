//! Local offline backend driving a whisper.cpp CLI binary.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::config::OfflineConfig;
use crate::error::TranscribeError;

use super::backend::TranscriptionBackend;

/// Offline backend. Spawns the whisper-cli binary against the utterance WAV;
/// no network access.
pub struct WhisperCliBackend {
    model_path: Option<String>,
    binary_path: Option<String>,
}

impl WhisperCliBackend {
    pub fn new(config: OfflineConfig) -> Self {
        Self {
            model_path: config.model_path,
            binary_path: config.binary_path,
        }
    }

    fn binary(&self) -> &str {
        self.binary_path.as_deref().unwrap_or("whisper-cli")
    }
}

impl TranscriptionBackend for WhisperCliBackend {
    fn id(&self) -> &'static str {
        "whisper-cli"
    }

    fn name(&self) -> &'static str {
        "Whisper (CLI)"
    }

    fn is_available(&self) -> bool {
        self.model_path
            .as_ref()
            .map_or(false, |p| Path::new(p).exists())
    }

    fn transcribe(&self, audio_path: &Path, language: &str) -> Result<String, TranscribeError> {
        let model = self
            .model_path
            .as_ref()
            .ok_or_else(|| TranscribeError::Request("no model path configured".to_string()))?;
        if !Path::new(model).exists() {
            return Err(TranscribeError::Request(format!(
                "model not found: {}",
                model
            )));
        }

        // Whisper takes the two-letter primary subtag ("en-US" -> "en")
        let lang = language.split('-').next().unwrap_or(language);
        debug!("running {} on {:?} (lang={})", self.binary(), audio_path, lang);
        let audio = audio_path.to_string_lossy();
        let output = Command::new(self.binary())
            .args(["-m", model.as_str(), "-f", audio.as_ref(), "-l", lang, "-np", "-nt"])
            .output()
            .map_err(|e| TranscribeError::Request(format!("failed to run whisper: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TranscribeError::Request(format!(
                "whisper failed: {}",
                stderr.trim()
            )));
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        let text = parse_whisper_output(&raw);
        if text.is_empty() {
            return Err(TranscribeError::Unintelligible);
        }
        Ok(text)
    }
}

/// Strip whisper's `[.. --> ..]` timestamp prefixes and join the text lines.
fn parse_whisper_output(raw: &str) -> String {
    raw.lines()
        .filter_map(|line| {
            let t = line.trim();
            if t.is_empty() {
                None
            } else if t.starts_with('[') && t.contains("-->") {
                t.find(']')
                    .map(|i| t[i + 1..].trim().to_string())
                    .filter(|s| !s.is_empty())
            } else {
                Some(t.to_string())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
