//! Fixed-rate broadcast loop
//!
//! One dedicated task, started at engine activation. Each tick it selects
//! the cursor's frame, snapshots the registry, sends the frame to every
//! subscriber in the snapshot, advances the cursor with wraparound, reports
//! throughput when the stats window elapses, then sleeps `1000 / fps` ms.
//!
//! Every subscriber in a tick's snapshot receives the same frame; a
//! subscriber connecting mid-tick is not guaranteed that tick's frame (this
//! is a live, lossy feed). The stop flag is checked once per iteration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::encode::EncodedFrame;
use crate::registry::SubscriberRegistry;
use crate::stats::ThroughputCounter;
use crate::store::{FrameCursor, FrameStore};
use crate::transport::{PayloadKind, Transport};

pub(crate) struct Scheduler<T> {
    pub store: Arc<FrameStore>,
    pub registry: Arc<SubscriberRegistry>,
    pub transport: Arc<T>,
    pub stop: Arc<AtomicBool>,
    pub kind: PayloadKind,
    pub tick: Duration,
    pub stats_interval: Duration,
}

impl<T: Transport> Scheduler<T> {
    /// Run until the stop flag is observed.
    ///
    /// An empty store exits immediately: no sends, no sleeps.
    pub async fn run(self) {
        if self.store.is_empty() {
            tracing::warn!("frame store is empty, broadcast loop exiting");
            return;
        }

        let mut cursor = FrameCursor::new(self.store.len());
        let mut throughput = ThroughputCounter::new(self.stats_interval);

        tracing::info!(
            frames = self.store.len(),
            tick_ms = self.tick.as_millis() as u64,
            "broadcast loop started"
        );

        while !self.stop.load(Ordering::Relaxed) {
            let index = cursor.advance();
            if let Some(frame) = self.store.get(index) {
                self.send_to_all(frame, &mut throughput);
            }

            if let Some(report) = throughput.maybe_report(Instant::now()) {
                tracing::info!(
                    rate = report.rate(),
                    messages = report.messages,
                    subscribers = self.registry.len(),
                    "broadcast rate"
                );
            }

            // Relative to "just finished"; drift is not compensated.
            tokio::time::sleep(self.tick).await;
        }

        tracing::info!("broadcast loop stopped");
    }

    /// One send pass: the same frame to every subscriber in a momentary
    /// snapshot. Sends happen outside the registry lock, so connect/close
    /// callbacks never wait behind this pass.
    ///
    /// A failed send means the peer is gone or cannot keep up; that
    /// subscriber is dropped from the registry.
    fn send_to_all(&self, frame: &EncodedFrame, throughput: &mut ThroughputCounter) {
        if frame.is_empty() {
            return;
        }

        for id in self.registry.snapshot() {
            match self.transport.send(id, self.kind, &frame.data) {
                Ok(()) => throughput.record(),
                Err(e) => {
                    let remaining = self.registry.remove(id);
                    tracing::warn!(
                        subscriber = %id,
                        error = %e,
                        remaining,
                        "send failed, subscriber dropped"
                    );
                }
            }
        }
    }
}
