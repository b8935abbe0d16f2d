//! Frame archive replay.
//!
//! An archive is a flat sequence of fixed-size records, each an 8-byte
//! big-endian reception timestamp in nanoseconds followed by the 14 frame
//! bytes. Replay lets the downstream decode and fusion stages run without a
//! receiver attached.

use std::io::{ErrorKind, Read};
use thiserror::Error;

use crate::adsb::frame::{RawFrame, FRAME_BYTES};
use crate::bytes::ByteString;

const TIMESTAMP_BYTES: usize = 8;
const RECORD_BYTES: usize = TIMESTAMP_BYTES + FRAME_BYTES;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("archive read failed")]
    Io(#[from] std::io::Error),
    #[error("archive ends mid-record")]
    TruncatedRecord,
    #[error("archived frame fails validation: {0}")]
    InvalidFrame(String),
}

/// Reader over an archived frame stream.
pub struct FrameArchive<R> {
    reader: R,
}

impl<R: Read> FrameArchive<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the next record, `Ok(None)` at a clean end of archive.
    pub fn next_frame(&mut self) -> Result<Option<RawFrame>, ReplayError> {
        let mut record = [0u8; RECORD_BYTES];
        match read_record(&mut self.reader, &mut record)? {
            Record::End => return Ok(None),
            Record::Full => {}
        }

        let mut timestamp = [0u8; TIMESTAMP_BYTES];
        timestamp.copy_from_slice(&record[..TIMESTAMP_BYTES]);
        let timestamp_ns = u64::from_be_bytes(timestamp);
        let bytes = ByteString::new(&record[TIMESTAMP_BYTES..]);

        RawFrame::new(timestamp_ns, bytes)
            .map(Some)
            .ok_or_else(|| {
                ReplayError::InvalidFrame(hex::encode_upper(&record[TIMESTAMP_BYTES..]))
            })
    }
}

enum Record {
    Full,
    End,
}

fn read_record<R: Read>(reader: &mut R, record: &mut [u8]) -> Result<Record, ReplayError> {
    let mut filled = 0;
    while filled < record.len() {
        match reader.read(&mut record[filled..]) {
            Ok(0) if filled == 0 => return Ok(Record::End),
            Ok(0) => return Err(ReplayError::TruncatedRecord),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Record::Full)
}

impl<R: Read> Iterator for FrameArchive<R> {
    type Item = Result<RawFrame, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const KNOWN_FRAME: &str = "8D4840D6202CC371C32CE0576098";

    fn record(timestamp_ns: u64, frame_hex: &str) -> Vec<u8> {
        let mut bytes = timestamp_ns.to_be_bytes().to_vec();
        bytes.extend(hex::decode(frame_hex).unwrap());
        bytes
    }

    #[test]
    fn test_replays_records_in_order() {
        let mut archive = record(1_000, KNOWN_FRAME);
        archive.extend(record(2_500, KNOWN_FRAME));

        let mut reader = FrameArchive::new(Cursor::new(archive));
        let first = reader.next_frame().unwrap().unwrap();
        assert_eq!(first.timestamp_ns(), 1_000);
        assert_eq!(first.bytes().to_string(), KNOWN_FRAME);
        let second = reader.next_frame().unwrap().unwrap();
        assert_eq!(second.timestamp_ns(), 2_500);
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_empty_archive_is_clean_end() {
        let mut reader = FrameArchive::new(Cursor::new(Vec::new()));
        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_truncated_record_is_an_error() {
        let mut archive = record(1_000, KNOWN_FRAME);
        archive.truncate(archive.len() - 3);
        let mut reader = FrameArchive::new(Cursor::new(archive));
        assert!(matches!(
            reader.next_frame(),
            Err(ReplayError::TruncatedRecord)
        ));
    }

    #[test]
    fn test_corrupted_frame_is_an_error() {
        let mut archive = record(1_000, KNOWN_FRAME);
        let last = archive.len() - 1;
        archive[last] ^= 0xFF;
        let mut reader = FrameArchive::new(Cursor::new(archive));
        assert!(matches!(
            reader.next_frame(),
            Err(ReplayError::InvalidFrame(_))
        ));
    }

    #[test]
    fn test_iterator_collects_all_records() {
        let mut archive = Vec::new();
        for k in 0..5u64 {
            archive.extend(record(k * 1_000_000, KNOWN_FRAME));
        }
        let frames: Vec<_> = FrameArchive::new(Cursor::new(archive))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[4].timestamp_ns(), 4_000_000);
    }
}
