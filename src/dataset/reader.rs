//! Streaming dataset record reader

use std::io::{ErrorKind, Read};

use super::header::FrameHeader;
use crate::error::{EngineError, Result};

/// One complete frame as stored in the dataset
///
/// Transient: exists only while the ingestion pipeline transcodes it.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub header: FrameHeader,
    pub pixels: Vec<u8>,
}

/// Streaming reader over `{header, pixels}` records
#[derive(Debug)]
pub struct DatasetReader<R> {
    inner: R,
}

impl<R: Read> DatasetReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next complete frame.
    ///
    /// `Ok(None)` is the end-of-dataset signal: the stream ended cleanly or
    /// the header read came up short. A pixel payload that ends before the
    /// header's promised length is a [`EngineError::PartialFrame`] carrying
    /// the byte shortfall; the partial frame is discarded.
    pub fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        let mut raw_header = [0u8; FrameHeader::LEN];
        let got = read_full(&mut self.inner, &mut raw_header)?;
        if got < FrameHeader::LEN {
            return Ok(None);
        }

        let header = FrameHeader::from_be_bytes(raw_header);
        let expected = header.pixel_len();
        let mut pixels = vec![0u8; expected];
        let got = read_full(&mut self.inner, &mut pixels)?;
        if got < expected {
            return Err(EngineError::PartialFrame { expected, got });
        }

        Ok(Some(RawFrame { header, pixels }))
    }
}

/// Fill `buf` as far as the stream allows, returning the byte count read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(width: u16, height: u16, pixels: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&width.to_be_bytes());
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(pixels);
        out
    }

    #[test]
    fn test_reads_complete_records() {
        let mut data = record(2, 2, &[1, 2, 3, 4]);
        data.extend(record(1, 3, &[9, 8, 7]));
        let mut reader = DatasetReader::new(data.as_slice());

        let first = reader.next_frame().unwrap().unwrap();
        assert_eq!(first.header.width, 2);
        assert_eq!(first.header.height, 2);
        assert_eq!(first.pixels, vec![1, 2, 3, 4]);

        let second = reader.next_frame().unwrap().unwrap();
        assert_eq!(second.header.width, 1);
        assert_eq!(second.pixels, vec![9, 8, 7]);

        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_empty_stream_is_end_of_dataset() {
        let mut reader = DatasetReader::new(&[][..]);

        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_short_header_is_end_of_dataset() {
        // Only 2 of the 4 header bytes present
        let mut reader = DatasetReader::new(&[0x00, 0x02][..]);

        assert!(reader.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_partial_pixels_reports_shortfall() {
        let mut data = record(2, 2, &[1, 2, 3, 4]);
        data.extend(record(2, 2, &[5, 6])); // 2 of 4 pixel bytes
        let mut reader = DatasetReader::new(data.as_slice());

        assert!(reader.next_frame().unwrap().is_some());
        match reader.next_frame() {
            Err(EngineError::PartialFrame { expected, got }) => {
                assert_eq!(expected, 4);
                assert_eq!(got, 2);
            }
            other => panic!("expected PartialFrame, got {:?}", other.map(|f| f.is_some())),
        }
    }

    #[test]
    fn test_header_without_pixels_is_partial() {
        let data = record(2, 2, &[]);
        let mut reader = DatasetReader::new(data.as_slice());

        match reader.next_frame() {
            Err(EngineError::PartialFrame { expected, got }) => {
                assert_eq!(expected, 4);
                assert_eq!(got, 0);
            }
            other => panic!("expected PartialFrame, got {:?}", other.map(|f| f.is_some())),
        }
    }

    #[test]
    fn test_zero_dimension_frame() {
        let data = record(0, 10, &[]);
        let mut reader = DatasetReader::new(data.as_slice());

        let frame = reader.next_frame().unwrap().unwrap();
        assert_eq!(frame.header.height, 10);
        assert!(frame.pixels.is_empty());
        assert!(reader.next_frame().unwrap().is_none());
    }
}
