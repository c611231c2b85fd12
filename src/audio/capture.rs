//! Microphone capture and utterance endpointing using cpal.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use log::{debug, info, warn};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use crate::audio::buffer::UtteranceBuffer;
use crate::config::ListenConfig;
use crate::error::{AudioError, Result, TranscribeError};

/// Sample rate the backends expect (whisper.cpp requirement).
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Audio kept from before speech onset, so the first word is not clipped.
const PRE_ROLL_MS: u64 = 300;

/// Energy gate with trailing-silence hangover.
///
/// Frames above the RMS threshold count as speech. Once speech has started,
/// the utterance is complete after `hangover_ms` of continuous silence.
pub(crate) struct EnergyGate {
    threshold: f32,
    hangover_ms: u64,
    started: bool,
    silence_run_ms: u64,
}

impl EnergyGate {
    pub(crate) fn new(threshold: f32, hangover_ms: u64) -> Self {
        Self {
            threshold,
            hangover_ms,
            started: false,
            silence_run_ms: 0,
        }
    }

    /// Feed one frame. Returns true when the utterance is complete.
    pub(crate) fn feed(&mut self, frame: &[f32], frame_ms: u64) -> bool {
        if rms_energy(frame) > self.threshold {
            self.started = true;
            self.silence_run_ms = 0;
        } else if self.started {
            self.silence_run_ms += frame_ms;
        }
        self.started && self.silence_run_ms >= self.hangover_ms
    }

    pub(crate) fn speech_started(&self) -> bool {
        self.started
    }
}

fn rms_energy(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Capture one utterance from the default input device.
///
/// Blocks until speech is detected and ends, the listen timeout elapses with
/// no speech, or the utterance reaches its maximum length. The input stream
/// is scoped to this call and released on every exit path.
pub fn capture_utterance(listen: &ListenConfig) -> Result<Vec<i16>> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or(AudioError::NoInputDevice)?;
    let device_name = device.name().unwrap_or_else(|_| "unknown".to_string());

    let supported = device
        .default_input_config()
        .map_err(|e| AudioError::DeviceConfig(e.to_string()))?;
    let sample_rate = supported.sample_rate().0;
    let channels = supported.channels() as usize;
    info!(
        "listening on {}: {} ch @ {} Hz, timeout {}s",
        device_name, channels, sample_rate, listen.timeout_secs
    );

    let (tx, rx) = channel::<Vec<f32>>();
    let stream_config: cpal::StreamConfig = supported.config();
    let stream = match supported.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, tx)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, tx)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, tx)?,
        other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other)).into()),
    };
    stream
        .play()
        .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

    // No `?` between here and the drop: the stream must be released whether
    // the listen loop succeeds or fails.
    let result = listen_loop(&rx, listen, sample_rate, channels);
    drop(stream);
    result
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    tx: Sender<Vec<f32>>,
) -> Result<cpal::Stream>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let stream = device
        .build_input_stream(
            config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                // Receiver gone means the listen loop already returned.
                let _ = tx.send(frame_to_f32(data));
            },
            |e| warn!("input stream error: {}", e),
            None,
        )
        .map_err(|e| AudioError::StreamBuild(e.to_string()))?;
    Ok(stream)
}

/// Convert a device frame to f32 samples.
fn frame_to_f32<T>(data: &[T]) -> Vec<f32>
where
    T: Sample,
    f32: FromSample<T>,
{
    data.iter().map(|s| f32::from_sample(*s)).collect()
}

fn listen_loop(
    rx: &Receiver<Vec<f32>>,
    listen: &ListenConfig,
    sample_rate: u32,
    channels: usize,
) -> Result<Vec<i16>> {
    let mut gate = EnergyGate::new(listen.energy_threshold, listen.silence_hangover_ms);
    let mut pending: Vec<f32> = Vec::new();
    let pre_roll_samples = (sample_rate as u64 * PRE_ROLL_MS / 1000) as usize;
    let max_samples = sample_rate as usize * listen.max_utterance_secs as usize;
    let started_at = Instant::now();
    let timeout = Duration::from_secs(listen.timeout_secs);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(chunk) => {
                let mono = downmix(&chunk, channels);
                let frame_ms = mono.len() as u64 * 1000 / sample_rate as u64;
                let complete = gate.feed(&mono, frame_ms);
                pending.extend_from_slice(&mono);
                if !gate.speech_started() && pending.len() > pre_roll_samples {
                    // Keep only the pre-roll tail while waiting for speech.
                    let excess = pending.len() - pre_roll_samples;
                    pending.drain(..excess);
                }
                if complete {
                    debug!("utterance complete after trailing silence");
                    break;
                }
                if gate.speech_started() && pending.len() >= max_samples {
                    debug!("utterance reached max length, stopping capture");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                if gate.speech_started() && !pending.is_empty() {
                    warn!("input stream closed mid-utterance, keeping partial capture");
                    break;
                }
                return Err(AudioError::StreamPlay("input stream closed".to_string()).into());
            }
        }

        if !gate.speech_started() && started_at.elapsed() >= timeout {
            return Err(TranscribeError::NoSpeech.into());
        }
    }

    let resampled = resample_linear(&pending, sample_rate, TARGET_SAMPLE_RATE);
    let mut buffer = UtteranceBuffer::new();
    buffer.extend(&to_i16(&resampled));
    debug!("captured utterance: {} ms", buffer.duration_ms());
    Ok(buffer.into_samples())
}

/// Average interleaved frames down to mono.
fn downmix(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    samples
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Linear-interpolation resampler. Adequate for speech going into a
/// recognition backend; not a general-purpose resampler.
fn resample_linear(input: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || input.is_empty() {
        return input.to_vec();
    }
    let ratio = from_rate as f64 / to_rate as f64;
    let out_len = (input.len() as f64 / ratio) as usize;
    let mut out = Vec::with_capacity(out_len);
    for i in 0..out_len {
        let pos = i as f64 * ratio;
        let idx = pos as usize;
        let frac = (pos - idx as f64) as f32;
        let a = input[idx];
        let b = input.get(idx + 1).copied().unwrap_or(a);
        out.push(a + (b - a) * frac);
    }
    out
}

fn to_i16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
        .collect()
}
