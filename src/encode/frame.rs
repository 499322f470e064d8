//! Wire payload types

use bytes::Bytes;

use crate::transport::PayloadKind;

/// How ingested frames are transcoded for the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadMode {
    /// Header prefix + raw grayscale pixels
    #[default]
    Raw,
    /// Grayscale JPEG
    Compressed,
    /// Base64 text of the grayscale JPEG
    CompressedText,
}

impl PayloadMode {
    /// Wire framing used for frames in this mode
    pub fn payload_kind(self) -> PayloadKind {
        match self {
            PayloadMode::Raw | PayloadMode::Compressed => PayloadKind::Binary,
            PayloadMode::CompressedText => PayloadKind::Text,
        }
    }

    /// Whether the JPEG compressor runs during ingestion
    pub fn is_compressed(self) -> bool {
        !matches!(self, PayloadMode::Raw)
    }
}

/// A wire-ready frame
///
/// Immutable once produced; owned by the frame store for the process
/// lifetime. Cheap to clone: `Bytes` is reference-counted, so the store, the
/// scheduler, and the transport share one allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    pub data: Bytes,
}

impl EncodedFrame {
    pub fn new(data: Bytes) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_kind_mapping() {
        assert_eq!(PayloadMode::Raw.payload_kind(), PayloadKind::Binary);
        assert_eq!(PayloadMode::Compressed.payload_kind(), PayloadKind::Binary);
        assert_eq!(PayloadMode::CompressedText.payload_kind(), PayloadKind::Text);
    }

    #[test]
    fn test_compression_flag() {
        assert!(!PayloadMode::Raw.is_compressed());
        assert!(PayloadMode::Compressed.is_compressed());
        assert!(PayloadMode::CompressedText.is_compressed());
    }

    #[test]
    fn test_encoded_frame_len() {
        let frame = EncodedFrame::new(Bytes::from_static(&[1, 2, 3]));

        assert_eq!(frame.len(), 3);
        assert!(!frame.is_empty());
        assert!(EncodedFrame::new(Bytes::new()).is_empty());
    }
}
