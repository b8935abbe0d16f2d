//! Raw sample decoding.
//!
//! The receiver delivers unsigned 16-bit little-endian words biased by
//! +2048, alternating in-phase and quadrature. The ADC is 12 bits wide, so
//! only the low 12 bits carry signal; decoding masks the rest and recenters
//! each word around zero, keeping samples within +/-2048 whatever the upper
//! bits contain.

use std::io::Read;

/// Bias applied by the receiver's ADC.
const SAMPLE_BIAS: i32 = 2048;

/// Width of the ADC word within the 16-bit transport word.
const SAMPLE_MASK: u16 = 0xFFF;

/// Decodes a byte stream into centered signed samples.
pub struct SamplesDecoder<R> {
    reader: R,
    bytes: Vec<u8>,
}

impl<R: Read> SamplesDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, bytes: Vec::new() }
    }

    /// Fills `batch` with decoded samples, returning the count actually
    /// decoded. A short count signals end of stream; a trailing odd byte is
    /// dropped.
    pub fn read_batch(&mut self, batch: &mut [i16]) -> std::io::Result<usize> {
        self.bytes.resize(batch.len() * 2, 0);
        let mut filled = 0;
        while filled < self.bytes.len() {
            let n = self.reader.read(&mut self.bytes[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }

        let words = filled / 2;
        for (sample, pair) in batch.iter_mut().zip(self.bytes.chunks_exact(2)).take(words) {
            let word = u16::from_le_bytes([pair[0], pair[1]]) & SAMPLE_MASK;
            *sample = (i32::from(word) - SAMPLE_BIAS) as i16;
        }
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn le_words(words: &[u16]) -> Vec<u8> {
        words.iter().flat_map(|w| w.to_le_bytes()).collect()
    }

    #[test]
    fn test_recenters_biased_words() {
        let data = le_words(&[2048, 0, 4095, 2049]);
        let mut decoder = SamplesDecoder::new(Cursor::new(data));
        let mut batch = [0i16; 4];
        assert_eq!(decoder.read_batch(&mut batch).unwrap(), 4);
        assert_eq!(batch, [0, -2048, 2047, 1]);
    }

    #[test]
    fn test_short_read_reports_reduced_count() {
        let data = le_words(&[2048, 2048]);
        let mut decoder = SamplesDecoder::new(Cursor::new(data));
        let mut batch = [0i16; 8];
        assert_eq!(decoder.read_batch(&mut batch).unwrap(), 2);
        assert_eq!(decoder.read_batch(&mut batch).unwrap(), 0);
    }

    #[test]
    fn test_high_bits_above_the_adc_width_are_ignored() {
        // Words outside the 12-bit ADC range must not escape +/-2048.
        let data = le_words(&[0xFFFF, 34815, 34816, 0x1800]);
        let mut decoder = SamplesDecoder::new(Cursor::new(data));
        let mut batch = [0i16; 4];
        assert_eq!(decoder.read_batch(&mut batch).unwrap(), 4);
        assert_eq!(batch, [2047, -1, 0, 0]);
    }

    #[test]
    fn test_trailing_odd_byte_is_dropped() {
        let mut data = le_words(&[2050]);
        data.push(0xAB);
        let mut decoder = SamplesDecoder::new(Cursor::new(data));
        let mut batch = [0i16; 4];
        assert_eq!(decoder.read_batch(&mut batch).unwrap(), 1);
        assert_eq!(batch[0], 2);
    }
}
