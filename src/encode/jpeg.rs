//! Grayscale JPEG compression

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

use crate::error::{EngineError, Result};

/// Compress one grayscale frame to JPEG at the given quality factor.
///
/// Single-component (luma-only) input, so the output carries no chroma
/// planes. The output buffer is pre-sized past the raw length: JPEG entropy
/// coding can exceed the input size for small or noisy frames.
pub fn compress_gray(width: u16, height: u16, pixels: &[u8], quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(pixels.len() + 1024);
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode(
            pixels,
            u32::from(width),
            u32::from(height),
            ExtendedColorType::L8,
        )
        .map_err(EngineError::Compress)?;
    Ok(out)
}
