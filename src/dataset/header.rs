//! Per-frame header record

/// Fixed 4-byte record preceding each frame's pixel data
///
/// Stored big-endian on disk. `width * height` grayscale bytes follow
/// immediately after the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u16,
    pub height: u16,
}

impl FrameHeader {
    /// Encoded size in bytes
    pub const LEN: usize = 4;

    /// Parse from the on-disk big-endian layout
    pub fn from_be_bytes(raw: [u8; Self::LEN]) -> Self {
        Self {
            width: u16::from_be_bytes([raw[0], raw[1]]),
            height: u16::from_be_bytes([raw[2], raw[3]]),
        }
    }

    /// Re-encode to the on-disk layout (raw wire payloads keep this prefix)
    pub fn to_be_bytes(self) -> [u8; Self::LEN] {
        let w = self.width.to_be_bytes();
        let h = self.height.to_be_bytes();
        [w[0], w[1], h[0], h[1]]
    }

    /// Pixel byte count promised by this header
    pub fn pixel_len(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}
