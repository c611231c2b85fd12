//! Bounded buffer for one captured utterance.

use std::collections::VecDeque;

/// At 16 kHz: 1 ms = 16 samples.
const SAMPLES_PER_MS: usize = 16;

/// Max buffer duration: 60 seconds at 16 kHz.
/// Prevents unbounded memory growth if endpointing never fires.
const MAX_SAMPLES: usize = 16 * 1000 * 60;

/// Accumulates the samples of a single utterance.
/// Samples are appended in capture order; oldest are dropped at capacity.
pub struct UtteranceBuffer {
    samples: VecDeque<i16>,
}

impl UtteranceBuffer {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(64 * 1024),
        }
    }

    /// Append a chunk of samples. Drops oldest when at capacity.
    pub fn extend(&mut self, chunk: &[i16]) {
        for &sample in chunk {
            if self.samples.len() >= MAX_SAMPLES {
                self.samples.pop_front();
            }
            self.samples.push_back(sample);
        }
    }

    /// Current length in samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() / SAMPLES_PER_MS) as u64
    }

    /// Consume the buffer, returning the utterance as a contiguous vector.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples.into_iter().collect()
    }
}

impl Default for UtteranceBuffer {
    fn default() -> Self {
        Self::new()
    }
}
