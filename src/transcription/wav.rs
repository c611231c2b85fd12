//! WAV serialization for captured utterances.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

use crate::audio::TARGET_SAMPLE_RATE;
use crate::error::{Result, ScribeError};

/// Write raw samples to a WAV file. 16 kHz mono 16-bit.
pub fn write_wav_from_samples(path: &Path, samples: &[i16]) -> Result<()> {
    let mut writer = WavWriter::create(
        path,
        WavSpec {
            channels: 1,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        },
    )
    .map_err(wav_err)?;
    for &s in samples {
        writer.write_sample(s).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)?;
    Ok(())
}

fn wav_err(e: hound::Error) -> ScribeError {
    match e {
        hound::Error::IoError(io) => ScribeError::Io(io),
        other => ScribeError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}
