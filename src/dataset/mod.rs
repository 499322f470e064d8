//! Binary frame dataset parsing
//!
//! A dataset is a flat file of repeating records:
//!
//! ```text
//! ┌─────────────┬──────────────┬────────────────────────────┐
//! │ width: u16  │ height: u16  │ width * height pixel bytes │
//! │ big-endian  │ big-endian   │ 8-bit grayscale            │
//! └─────────────┴──────────────┴────────────────────────────┘
//! ```
//!
//! There is no trailing length field; end-of-file (or a short header read)
//! terminates the sequence.

pub mod header;
pub mod reader;

pub use header::FrameHeader;
pub use reader::{DatasetReader, RawFrame};
