//! Engine configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::encode::PayloadMode;

/// Engine configuration options
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Dataset file ingested at startup
    pub dataset_path: PathBuf,

    /// Endpoint path registered with the transport
    pub endpoint_path: String,

    /// Broadcast ticks per second
    pub fps: u32,

    /// Wire representation of each frame
    pub payload_mode: PayloadMode,

    /// JPEG quality factor (1-100), used by the compressed modes
    pub jpeg_quality: u8,

    /// Minimum elapsed time between throughput reports
    pub stats_interval: Duration,

    /// How long `stop` waits for the broadcast loop before giving up
    pub shutdown_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("images.bin"),
            endpoint_path: "/ws/rle".to_string(),
            fps: 60,
            payload_mode: PayloadMode::Raw,
            jpeg_quality: 95,
            stats_interval: Duration::from_millis(2000),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl EngineConfig {
    /// Set the dataset file path
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Set the endpoint path
    pub fn endpoint_path(mut self, path: impl Into<String>) -> Self {
        self.endpoint_path = path.into();
        self
    }

    /// Set the broadcast rate (clamped to at least 1)
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Set the wire representation
    pub fn payload_mode(mut self, mode: PayloadMode) -> Self {
        self.payload_mode = mode;
        self
    }

    /// Set the JPEG quality factor (clamped to 1-100)
    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Set the throughput report interval
    pub fn stats_interval(mut self, interval: Duration) -> Self {
        self.stats_interval = interval;
        self
    }

    /// Set the shutdown timeout
    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Sleep between broadcast ticks: `1000 / fps` milliseconds.
    ///
    /// The integer division truncates (60 FPS gives 16 ms, not 16.67) and no
    /// drift compensation is applied; the sleep is relative to the end of the
    /// previous tick.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(1000 / self.fps.max(1)))
    }
}
