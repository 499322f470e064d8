//! Wire encoding of frames
//!
//! Transcoding runs once, during ingestion; the broadcast loop only ever
//! re-sends the finished payloads. Three representations are supported,
//! selected at engine construction:
//!
//! - **Raw**: the 4-byte header (network order) followed by the grayscale
//!   pixels, binary-framed.
//! - **Compressed**: grayscale JPEG bytes, binary-framed.
//! - **CompressedText**: standard base64 of the JPEG bytes, text-framed.

pub mod frame;
pub mod jpeg;
pub mod pipeline;

pub use frame::{EncodedFrame, PayloadMode};
pub use pipeline::ingest_dataset;
