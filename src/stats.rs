//! Broadcast and ingestion metrics
//!
//! Observability only; nothing here feeds back into control flow.

use std::time::{Duration, Instant};

/// Messages-per-window counter behind the scheduler's periodic rate report
///
/// Created at scheduler start, reset on each report, never persisted.
#[derive(Debug)]
pub struct ThroughputCounter {
    interval: Duration,
    window_start: Instant,
    messages: u64,
}

/// One completed reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThroughputReport {
    pub messages: u64,
    pub elapsed: Duration,
}

impl ThroughputReport {
    /// Messages per second over the window
    pub fn rate(&self) -> f64 {
        let elapsed_ms = self.elapsed.as_millis() as f64;
        if elapsed_ms > 0.0 {
            self.messages as f64 * 1000.0 / elapsed_ms
        } else {
            0.0
        }
    }
}

impl ThroughputCounter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: Instant::now(),
            messages: 0,
        }
    }

    /// Count one delivered message
    pub fn record(&mut self) {
        self.messages += 1;
    }

    /// Messages counted in the current window
    pub fn messages(&self) -> u64 {
        self.messages
    }

    /// Produce a report and reset if more than the interval elapsed at `now`.
    pub fn maybe_report(&mut self, now: Instant) -> Option<ThroughputReport> {
        let elapsed = now.duration_since(self.window_start);
        if elapsed <= self.interval {
            return None;
        }

        let report = ThroughputReport {
            messages: self.messages,
            elapsed,
        };
        self.messages = 0;
        self.window_start = now;
        Some(report)
    }
}

/// Byte accounting for one ingestion run
#[derive(Debug, Clone, Copy, Default)]
pub struct IngestStats {
    frames: u64,
    raw_bytes: u64,
    compressed_bytes: u64,
    encoded_bytes: u64,
}

/// Per-frame averages over an ingestion run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngestAverages {
    pub raw: f64,
    pub compressed: f64,
    pub encoded: f64,
    /// Compressed size as a percentage of raw size
    pub ratio_pct: f64,
}

impl IngestStats {
    /// Account one ingested frame's sizes at each pipeline stage.
    pub fn record(&mut self, raw: usize, compressed: usize, encoded: usize) {
        self.frames += 1;
        self.raw_bytes += raw as u64;
        self.compressed_bytes += compressed as u64;
        self.encoded_bytes += encoded as u64;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// `None` when no frames were ingested (nothing to average).
    pub fn averages(&self) -> Option<IngestAverages> {
        if self.frames == 0 {
            return None;
        }

        let frames = self.frames as f64;
        let ratio_pct = if self.raw_bytes > 0 {
            self.compressed_bytes as f64 * 100.0 / self.raw_bytes as f64
        } else {
            0.0
        };

        Some(IngestAverages {
            raw: self.raw_bytes as f64 / frames,
            compressed: self.compressed_bytes as f64 / frames,
            encoded: self.encoded_bytes as f64 / frames,
            ratio_pct,
        })
    }
}
