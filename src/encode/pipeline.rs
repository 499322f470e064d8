//! Dataset ingestion pipeline
//!
//! Runs once at startup: reads `{header, pixels}` records from the dataset
//! stream, transcodes each into its wire form, and builds the write-once
//! [`FrameStore`]. The steady-state broadcast loop never re-encodes.
//!
//! Ingestion never fails as a whole. A short header read is the clean
//! end-of-dataset signal; a short pixel read stops ingestion keeping every
//! frame read so far; a per-frame compression error drops only that frame.

use std::io::Read;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::{BufMut, Bytes, BytesMut};

use super::frame::{EncodedFrame, PayloadMode};
use super::jpeg;
use crate::dataset::{DatasetReader, FrameHeader, RawFrame};
use crate::error::EngineError;
use crate::stats::IngestStats;
use crate::store::FrameStore;

/// Ingest an entire dataset stream into a frame store.
pub fn ingest_dataset<R: Read>(reader: R, mode: PayloadMode, quality: u8) -> FrameStore {
    let mut reader = DatasetReader::new(reader);
    let mut frames = Vec::new();
    let mut stats = IngestStats::default();

    loop {
        let raw = match reader.next_frame() {
            Ok(Some(raw)) => raw,
            Ok(None) => break,
            Err(EngineError::PartialFrame { expected, got }) => {
                tracing::warn!(expected, got, "partial frame read, stopping ingestion");
                break;
            }
            Err(e) => {
                tracing::error!(error = %e, "dataset read failed, stopping ingestion");
                break;
            }
        };

        match encode_frame(&raw, mode, quality) {
            Ok(encoded) => {
                stats.record(raw.pixels.len(), encoded.compressed_len, encoded.frame.len());
                frames.push(encoded.frame);
            }
            Err(e) => {
                tracing::warn!(frame = frames.len(), error = %e, "compression failed, frame dropped");
            }
        }
    }

    tracing::info!(frames = frames.len(), "dataset ingested");
    if mode.is_compressed() {
        if let Some(avg) = stats.averages() {
            tracing::info!(
                avg_raw = avg.raw,
                avg_compressed = avg.compressed,
                avg_encoded = avg.encoded,
                ratio_pct = avg.ratio_pct,
                "compression summary"
            );
        }
    }

    FrameStore::new(frames)
}

struct Encoded {
    frame: EncodedFrame,
    /// Post-compression size; equals the payload size when not compressing.
    compressed_len: usize,
}

fn encode_frame(raw: &RawFrame, mode: PayloadMode, quality: u8) -> crate::error::Result<Encoded> {
    match mode {
        PayloadMode::Raw => {
            let mut buf = BytesMut::with_capacity(FrameHeader::LEN + raw.pixels.len());
            buf.put_slice(&raw.header.to_be_bytes());
            buf.put_slice(&raw.pixels);
            let frame = EncodedFrame::new(buf.freeze());
            let compressed_len = frame.len();
            Ok(Encoded {
                frame,
                compressed_len,
            })
        }
        PayloadMode::Compressed => {
            let compressed =
                jpeg::compress_gray(raw.header.width, raw.header.height, &raw.pixels, quality)?;
            let compressed_len = compressed.len();
            Ok(Encoded {
                frame: EncodedFrame::new(Bytes::from(compressed)),
                compressed_len,
            })
        }
        PayloadMode::CompressedText => {
            let compressed =
                jpeg::compress_gray(raw.header.width, raw.header.height, &raw.pixels, quality)?;
            let compressed_len = compressed.len();
            let text = BASE64.encode(&compressed);
            Ok(Encoded {
                frame: EncodedFrame::new(Bytes::from(text)),
                compressed_len,
            })
        }
    }
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

    fn three_2x2_frames() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend(record(2, 2, &[10, 20, 30, 40]));
        data.extend(record(2, 2, &[50, 60, 70, 80]));
        data.extend(record(2, 2, &[90, 100, 110, 120]));
        data
    }

    #[test]
    fn test_raw_mode_keeps_header_prefix() {
        let store = ingest_dataset(three_2x2_frames().as_slice(), PayloadMode::Raw, 95);

        assert_eq!(store.len(), 3);
        assert_eq!(
            store.get(0).unwrap().data.as_ref(),
            &[0, 2, 0, 2, 10, 20, 30, 40]
        );
        assert_eq!(
            store.get(2).unwrap().data.as_ref(),
            &[0, 2, 0, 2, 90, 100, 110, 120]
        );
    }

    #[test]
    fn test_frame_count_matches_complete_records() {
        let mut data = three_2x2_frames();
        data.extend(&[0x00, 0x02]); // trailing short header

        let store = ingest_dataset(data.as_slice(), PayloadMode::Raw, 95);

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_truncated_payload_keeps_prior_frames() {
        let mut data = three_2x2_frames();
        data.extend(record(2, 2, &[1, 2])); // 2 of 4 pixel bytes

        let store = ingest_dataset(data.as_slice(), PayloadMode::Raw, 95);

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_empty_dataset_yields_empty_store() {
        let store = ingest_dataset(&[][..], PayloadMode::Raw, 95);

        assert!(store.is_empty());
    }

    #[test]
    fn test_compressed_mode_emits_jpeg() {
        let pixels = vec![77u8; 16 * 16];
        let data = record(16, 16, &pixels);

        let store = ingest_dataset(data.as_slice(), PayloadMode::Compressed, 95);

        assert_eq!(store.len(), 1);
        let jpeg = &store.get(0).unwrap().data;
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_base64_round_trips_to_compressed_bytes() {
        let pixels: Vec<u8> = (0..32 * 32).map(|i| (i % 199) as u8).collect();
        let data = record(32, 32, &pixels);

        let binary = ingest_dataset(data.as_slice(), PayloadMode::Compressed, 95);
        let text = ingest_dataset(data.as_slice(), PayloadMode::CompressedText, 95);

        let compressed = binary.get(0).unwrap().data.as_ref();
        let encoded = text.get(0).unwrap().data.as_ref();

        // Standard alphabet with padding: length is ceil(n / 3) * 4
        assert_eq!(encoded.len(), compressed.len().div_ceil(3) * 4);
        assert_eq!(BASE64.decode(encoded).unwrap(), compressed);
    }

    #[test]
    fn test_zero_dimension_frame_raw() {
        let data = record(0, 10, &[]);

        let store = ingest_dataset(data.as_slice(), PayloadMode::Raw, 95);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().data.as_ref(), &[0, 0, 0, 10]);
    }
}
