//! Write-once frame storage and the broadcast cursor

use crate::encode::EncodedFrame;

/// Ordered, immutable sequence of wire-ready frames
///
/// Built once during ingestion and never mutated afterwards, so the
/// scheduler reads it through a plain `Arc` without locking.
#[derive(Debug, Default)]
pub struct FrameStore {
    frames: Vec<EncodedFrame>,
}

impl FrameStore {
    pub fn new(frames: Vec<EncodedFrame>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&EncodedFrame> {
        self.frames.get(index)
    }
}

/// Cyclic index over a non-empty store: after the last frame, selection
/// resumes at index 0.
#[derive(Debug)]
pub struct FrameCursor {
    next: usize,
    len: usize,
}

impl FrameCursor {
    /// `len` is the length of the store this cursor indexes; must be > 0.
    pub fn new(len: usize) -> Self {
        debug_assert!(len > 0);
        Self { next: 0, len }
    }

    /// Index to broadcast this tick; advances with wraparound.
    pub fn advance(&mut self) -> usize {
        let index = self.next;
        self.next = (self.next + 1) % self.len;
        index
    }
}
