//! mic-scribe: microphone transcription utility.
//!
//! Captures one utterance from the default microphone, transcribes it via a
//! remote HTTP API or a local whisper.cpp CLI, and saves the result to a
//! plain-text file.
//!
//! - `audio`: microphone capture and utterance endpointing
//! - `transcription`: backends and the capture-and-transcribe flow
//! - `session`: explicit state machine for the interactive front-end
//! - `export`: transcript persistence
//! - `config`: settings
//! - `error`: typed errors

pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod paths;
pub mod session;
pub mod transcription;

pub use config::{Provider, Settings, SUPPORTED_LANGUAGES};
pub use error::{AudioError, ConfigError, Result, ScribeError, TranscribeError};
pub use export::save_transcription;
pub use session::{Phase, Session};
pub use transcription::{capture_and_transcribe, select_backend, TranscriptionBackend};

/// Initialize logging to stdout and a file under the logs directory.
pub fn init_logger() -> std::result::Result<std::path::PathBuf, fern::InitError> {
    let log_dir = paths::logs_dir();
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = log_dir.join("mic-scribe.log");

    let format = |out: fern::FormatCallback<'_>,
                  message: &std::fmt::Arguments<'_>,
                  record: &log::Record| {
        out.finish(format_args!(
            "[{}][{}][{}][{:?}] {}",
            chrono::Local::now().format("%Y-%m-%d"),
            chrono::Local::now().format("%H:%M:%S"),
            record.target(),
            record.level(),
            message
        ))
    };

    fern::Dispatch::new()
        .format(format)
        .level(log::LevelFilter::Debug)
        .chain(
            fern::Dispatch::new()
                .level(log::LevelFilter::Info)
                .chain(std::io::stdout()),
        )
        .chain(fern::log_file(&log_file)?)
        .apply()?;

    Ok(log_file)
}
