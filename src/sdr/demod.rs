//! Mode S extended-squitter demodulation.
//!
//! The demodulator scans the power window one sample at a time. A candidate
//! preamble is accepted when the sum of the four expected pulse centers is a
//! strict local maximum over its neighbors and clears the valley floor.
//! Frame bits then come from pulse-position comparison: at 10 power samples
//! per bit, bit `n` is 1 when the first half-bit carries more power than the
//! second.
//!
//! Power samples arrive at 100 ns intervals, so a frame's timestamp is the
//! window position at its preamble start times 100.

use std::io::Read;
use tracing::trace;

use crate::adsb::frame::{RawFrame, DF_EXTENDED_SQUITTER, FRAME_BYTES};
use crate::bytes::ByteString;

use super::power::PowerComputer;
use super::samples::SamplesDecoder;
use super::window::PowerWindow;

/// Power samples spanned by one frame: 8 us preamble + 112 bits at 1 us.
const MESSAGE_SAMPLES: usize = 1200;

/// Power samples per message bit.
const SAMPLES_PER_BIT: usize = 10;

/// First power sample of the data block, past the preamble.
const DATA_START: usize = 80;

/// Expected preamble pulse centers.
const PULSE_OFFSETS: [usize; 4] = [0, 10, 35, 45];

/// Expected preamble valley positions.
const VALLEY_OFFSETS: [usize; 5] = [5, 15, 20, 30, 40];

/// Nanoseconds per power sample.
const NS_PER_SAMPLE: u64 = 100;

/// Counters in the style of a receiver front end.
#[derive(Debug, Default, Clone)]
pub struct DemodulatorStats {
    pub frames_decoded: u64,
    pub preambles_matched: u64,
    pub crc_rejects: u64,
}

/// Streaming Mode S demodulator over a raw sample source.
pub struct AdsbDemodulator<R> {
    window: PowerWindow<R>,
    previous_peak: u64,
    stats: DemodulatorStats,
}

impl<R: Read> AdsbDemodulator<R> {
    /// Builds the full pipeline (sample decoder, power computer, window)
    /// over `reader`.
    pub fn new(reader: R) -> std::io::Result<Self> {
        let computer = PowerComputer::new(SamplesDecoder::new(reader));
        Ok(Self {
            window: PowerWindow::new(computer, MESSAGE_SAMPLES)?,
            previous_peak: 0,
            stats: DemodulatorStats::default(),
        })
    }

    /// Scans forward to the next valid frame.
    ///
    /// Returns `Ok(None)` once the sample stream is exhausted; no partial
    /// frame is ever surfaced.
    pub fn next_frame(&mut self) -> std::io::Result<Option<RawFrame>> {
        while self.window.is_full() {
            let peak = self.pulse_sum(0);
            let next_peak = self.pulse_sum(1);

            if peak > self.previous_peak && peak > next_peak && peak >= self.valley_floor() {
                self.stats.preambles_matched += 1;
                if let Some(frame) = self.decode_candidate() {
                    self.stats.frames_decoded += 1;
                    trace!(
                        timestamp_ns = frame.timestamp_ns(),
                        frame = %frame.bytes(),
                        "frame demodulated"
                    );
                    // Skip the whole message before resuming the scan.
                    self.window.advance_by(MESSAGE_SAMPLES)?;
                    self.previous_peak = 0;
                    return Ok(Some(frame));
                }
            }

            self.previous_peak = peak;
            self.window.advance()?;
        }
        Ok(None)
    }

    pub fn stats(&self) -> &DemodulatorStats {
        &self.stats
    }

    /// Sum of the four preamble pulse centers, shifted by `offset`.
    fn pulse_sum(&self, offset: usize) -> u64 {
        PULSE_OFFSETS
            .iter()
            .map(|&p| u64::from(self.window.get(p + offset)))
            .sum()
    }

    /// Contrast gate: twice the sum of the expected valley positions.
    fn valley_floor(&self) -> u64 {
        2 * VALLEY_OFFSETS
            .iter()
            .map(|&v| u64::from(self.window.get(v)))
            .sum::<u64>()
    }

    /// Pulse-position decode of bit `n` of the data block.
    fn bit(&self, n: usize) -> bool {
        let first = self.window.get(DATA_START + SAMPLES_PER_BIT * n);
        let second = self.window.get(DATA_START + SAMPLES_PER_BIT * n + 5);
        first >= second
    }

    fn byte(&self, index: usize) -> u8 {
        (0..8).fold(0, |byte, bit| (byte << 1) | u8::from(self.bit(8 * index + bit)))
    }

    /// Decodes and validates the frame candidate at the current position.
    fn decode_candidate(&mut self) -> Option<RawFrame> {
        let mut bytes = [0u8; FRAME_BYTES];
        bytes[0] = self.byte(0);
        if bytes[0] >> 3 != DF_EXTENDED_SQUITTER {
            return None;
        }
        for i in 1..FRAME_BYTES {
            bytes[i] = self.byte(i);
        }

        let timestamp_ns = self.window.position() * NS_PER_SAMPLE;
        let frame = RawFrame::new(timestamp_ns, ByteString::new(&bytes));
        if frame.is_none() {
            self.stats.crc_rejects += 1;
        }
        frame
    }
}

/// Iterator adapter: yields frames until the stream is exhausted.
impl<R: Read> Iterator for AdsbDemodulator<R> {
    type Item = std::io::Result<RawFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}
