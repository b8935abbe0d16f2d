//! Quadrature signal power computation.
//!
//! For every two input samples consumed (one I/Q pair) the computer emits
//! one power value, computed over a ring of the last 8 samples:
//!
//! ```text
//! power = (I[0] - I[2] + I[4] - I[6])^2 + (Q[0] - Q[2] + Q[4] - Q[6])^2
//! ```
//!
//! The alternating signs shift the pass band to a quarter of the sample
//! rate, where the receiver places the 1090 MHz carrier.

use std::io::Read;

use super::samples::SamplesDecoder;

const HISTORY: usize = 8;

/// Streaming power computer over a decoded sample stream.
pub struct PowerComputer<R> {
    decoder: SamplesDecoder<R>,
    samples: Vec<i16>,
    // Circular history of the last 8 samples; even slots hold I, odd Q.
    history: [i32; HISTORY],
    head: usize,
}

impl<R: Read> PowerComputer<R> {
    pub fn new(decoder: SamplesDecoder<R>) -> Self {
        Self {
            decoder,
            samples: Vec::new(),
            history: [0; HISTORY],
            head: 0,
        }
    }

    /// Fills `batch` with power values, returning the count produced. A
    /// short upstream read propagates as a reduced count (half the samples
    /// consumed, rounded down).
    pub fn read_batch(&mut self, batch: &mut [u32]) -> std::io::Result<usize> {
        self.samples.resize(batch.len() * 2, 0);
        let read = self.decoder.read_batch(&mut self.samples)?;

        let produced = read / 2;
        for (k, power) in batch.iter_mut().enumerate().take(produced) {
            self.history[self.head] = i32::from(self.samples[2 * k]);
            self.history[self.head + 1] = i32::from(self.samples[2 * k + 1]);
            self.head = (self.head + 2) % HISTORY;

            // Sign alternation is fixed to the ring slots: rotating the head
            // by two flips every term, which squaring cancels.
            let i = self.history[0] - self.history[2] + self.history[4] - self.history[6];
            let q = self.history[1] - self.history[3] + self.history[5] - self.history[7];
            *power = (i * i + q * q) as u32;
        }
        Ok(produced)
    }
}
