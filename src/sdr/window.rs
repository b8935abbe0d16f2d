//! Sliding window over the power sample stream.

use std::io::Read;

use super::power::PowerComputer;

/// How many power samples to pull from upstream at a time.
const BATCH: usize = 1 << 10;

/// A fixed-capacity window of the most recent power samples, with random
/// access and an absolute position counter.
///
/// Construction fills the window, so `get(0)` addresses the stream's first
/// power sample and `position()` starts at 0. Each `advance()` slides the
/// window one sample forward; once the upstream stream is exhausted the
/// window shrinks and `is_full()` turns false.
pub struct PowerWindow<R> {
    computer: PowerComputer<R>,
    capacity: usize,
    ring: Vec<u32>,
    head: usize,
    len: usize,
    position: u64,
    batch: Vec<u32>,
    batch_len: usize,
    batch_pos: usize,
    exhausted: bool,
}

impl<R: Read> PowerWindow<R> {
    /// Builds a window of `capacity` samples and fills it from `computer`.
    ///
    /// # Panics
    /// Panics if `capacity` is 0.
    pub fn new(mut computer: PowerComputer<R>, capacity: usize) -> std::io::Result<Self> {
        assert!(capacity > 0, "window capacity must be positive");
        let mut ring = vec![0u32; capacity];
        let mut len = 0;
        while len < capacity {
            let n = computer.read_batch(&mut ring[len..])?;
            if n == 0 {
                break;
            }
            len += n;
        }
        Ok(Self {
            computer,
            capacity,
            ring,
            head: 0,
            len,
            position: 0,
            batch: vec![0; BATCH],
            batch_len: 0,
            batch_pos: 0,
            exhausted: false,
        })
    }

    /// Absolute index of the window's oldest retained sample.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the window currently holds `capacity` samples.
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The sample at `index`, counted from the oldest retained sample.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn get(&self, index: usize) -> u32 {
        assert!(index < self.len, "window index out of range: {index}");
        self.ring[(self.head + index) % self.capacity]
    }

    /// Slides the window forward by one sample.
    pub fn advance(&mut self) -> std::io::Result<()> {
        match self.next_power()? {
            Some(power) => {
                // Drop the oldest, append the newest.
                self.ring[(self.head + self.len) % self.capacity] = power;
                self.head = (self.head + 1) % self.capacity;
            }
            None => {
                if self.len > 0 {
                    self.head = (self.head + 1) % self.capacity;
                    self.len -= 1;
                }
            }
        }
        self.position += 1;
        Ok(())
    }

    /// Slides the window forward by `n` samples.
    pub fn advance_by(&mut self, n: usize) -> std::io::Result<()> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    fn next_power(&mut self) -> std::io::Result<Option<u32>> {
        if self.batch_pos == self.batch_len {
            if self.exhausted {
                return Ok(None);
            }
            self.batch_len = self.computer.read_batch(&mut self.batch)?;
            self.batch_pos = 0;
            if self.batch_len == 0 {
                self.exhausted = true;
                return Ok(None);
            }
        }
        let power = self.batch[self.batch_pos];
        self.batch_pos += 1;
        Ok(Some(power))
    }
}
