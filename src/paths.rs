//! Path utilities for app data, settings, and log directories.

use std::path::PathBuf;

const APP_DIR_NAME: &str = "mic-scribe";

/// App data directory (e.g. ~/.local/share/mic-scribe).
pub fn app_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
}

/// Directory for temporary utterance WAV files.
pub fn temp_audio_dir() -> PathBuf {
    app_data_dir().join("utterances")
}

/// Log directory.
pub fn logs_dir() -> PathBuf {
    app_data_dir().join("logs")
}

/// Path to the settings file (e.g. ~/.config/mic-scribe/settings.json).
pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
        .join("settings.json")
}

/// Ensure all app directories exist.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(app_data_dir())?;
    std::fs::create_dir_all(temp_audio_dir())?;
    std::fs::create_dir_all(logs_dir())?;
    Ok(())
}
