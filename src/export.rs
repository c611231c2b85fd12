//! Save transcripts to plain-text files.

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Write a transcription to `name`, appending ".txt" when the name lacks it.
/// Overwrites any existing file at that path and returns the final path.
pub fn save_transcription(transcription: &str, name: &str) -> Result<PathBuf> {
    let path = if Path::new(name)
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("txt"))
    {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}.txt", name))
    };
    std::fs::write(&path, transcription)?;
    Ok(path)
}
