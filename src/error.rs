//! Engine error types

use std::io;

/// Convenience alias for results produced inside the engine
pub type Result<T> = std::result::Result<T, EngineError>;

/// Error type for ingestion and encoding operations
///
/// None of these cross the transport boundary: ingestion errors are handled
/// by local recovery (stop or skip) and the broadcast path is best-effort.
#[derive(Debug)]
pub enum EngineError {
    /// Dataset stream could not be read
    Dataset(io::Error),
    /// A frame's pixel payload ended before the header's promised length
    PartialFrame { expected: usize, got: usize },
    /// JPEG compression failed for a single frame
    Compress(image::ImageError),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::Dataset(e) => write!(f, "Dataset read failed: {}", e),
            EngineError::PartialFrame { expected, got } => {
                write!(f, "Partial frame read: expected {} bytes, got {}", expected, got)
            }
            EngineError::Compress(e) => write!(f, "Frame compression failed: {}", e),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Dataset(e) => Some(e),
            EngineError::PartialFrame { .. } => None,
            EngineError::Compress(e) => Some(e),
        }
    }
}

impl From<io::Error> for EngineError {
    fn from(e: io::Error) -> Self {
        EngineError::Dataset(e)
    }
}

impl From<image::ImageError> for EngineError {
    fn from(e: image::ImageError) -> Self {
        EngineError::Compress(e)
    }
}
