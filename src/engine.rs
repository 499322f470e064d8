//! Engine lifecycle and transport callback surface
//!
//! The engine is the single explicit object owning the frame store, the
//! subscriber registry, and the scheduler's stop flag — constructed once at
//! activation, shared by `Arc` with the broadcast task and the transport's
//! callback threads.
//!
//! ```text
//!  dataset file ──► ingest_dataset ──► FrameStore (write-once)
//!                                          │
//!                      Scheduler task ─────┤ read-only, cyclic
//!                                          ▼
//!              SubscriberRegistry snapshot ──► Transport::send
//!                  ▲               ▲
//!          on_ready│       on_close│        (transport callbacks)
//! ```

use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use tokio::task::JoinHandle;

use crate::config::EngineConfig;
use crate::encode::ingest_dataset;
use crate::registry::SubscriberRegistry;
use crate::scheduler::Scheduler;
use crate::store::FrameStore;
use crate::transport::{EndpointEvents, PayloadKind, SubscriberId, Transport};

/// Greeting sent to each subscriber when its connection becomes ready
const GREETING: &[u8] = b"Hello world!";

/// The frame-broadcast engine
///
/// Constructed and started via [`Engine::start`]; must be called within a
/// tokio runtime, since the broadcast loop runs as a spawned task.
pub struct Engine<T: Transport> {
    config: EngineConfig,
    transport: Arc<T>,
    store: Arc<FrameStore>,
    registry: Arc<SubscriberRegistry>,
    stop: Arc<AtomicBool>,
    scheduler: Mutex<Option<JoinHandle<()>>>,
}

impl<T: Transport> Engine<T> {
    /// Ingest the configured dataset and start broadcasting.
    ///
    /// A missing or unreadable dataset file is logged and leaves the store
    /// empty; activation still succeeds and the loop exits without sending.
    pub fn start(config: EngineConfig, transport: Arc<T>) -> Arc<Self> {
        let store = match File::open(&config.dataset_path) {
            Ok(file) => ingest_dataset(
                BufReader::new(file),
                config.payload_mode,
                config.jpeg_quality,
            ),
            Err(e) => {
                tracing::error!(
                    path = %config.dataset_path.display(),
                    error = %e,
                    "could not open dataset"
                );
                FrameStore::default()
            }
        };

        Self::start_with_store(config, transport, store)
    }

    /// Start with an already-built frame store.
    pub fn start_with_store(
        config: EngineConfig,
        transport: Arc<T>,
        store: FrameStore,
    ) -> Arc<Self> {
        let engine = Arc::new(Self {
            store: Arc::new(store),
            registry: Arc::new(SubscriberRegistry::new()),
            stop: Arc::new(AtomicBool::new(false)),
            scheduler: Mutex::new(None),
            transport: Arc::clone(&transport),
            config,
        });

        engine.transport.register_endpoint(
            &engine.config.endpoint_path,
            Arc::clone(&engine) as Arc<dyn EndpointEvents>,
        );

        let scheduler = Scheduler {
            store: Arc::clone(&engine.store),
            registry: Arc::clone(&engine.registry),
            transport,
            stop: Arc::clone(&engine.stop),
            kind: engine.config.payload_mode.payload_kind(),
            tick: engine.config.tick_interval(),
            stats_interval: engine.config.stats_interval,
        };
        let handle = tokio::spawn(scheduler.run());
        *engine
            .scheduler
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(handle);

        tracing::info!(
            endpoint = %engine.config.endpoint_path,
            frames = engine.store.len(),
            fps = engine.config.fps,
            "engine started"
        );

        engine
    }

    /// Number of frames available for broadcast
    pub fn frame_count(&self) -> usize {
        self.store.len()
    }

    /// Current subscriber count
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Signal the broadcast loop to stop and wait (bounded) for it to finish.
    ///
    /// The loop observes the flag within about one tick, plus any time spent
    /// in a send call. If it does not quiesce within the shutdown timeout the
    /// task is left running and reported as leaked, not force-killed.
    pub async fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);

        let handle = self
            .scheduler
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(handle) = handle {
            match tokio::time::timeout(self.config.shutdown_timeout, handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!(error = %e, "broadcast loop panicked"),
                Err(_) => tracing::warn!(
                    timeout_ms = self.config.shutdown_timeout.as_millis() as u64,
                    "broadcast loop did not stop in time, task leaked"
                ),
            }
        }

        // Registry lock turnover is the barrier: no callback still holds
        // state from before the stop once this returns.
        let subscribers = self.registry.len();
        tracing::info!(subscribers, "engine stopped");
    }
}

impl<T: Transport> EndpointEvents for Engine<T> {
    fn on_connect_attempt(&self, subscriber: SubscriberId) -> bool {
        tracing::debug!(subscriber = %subscriber, "connection attempt");
        true
    }

    fn on_ready(&self, subscriber: SubscriberId) {
        let total = self.registry.add(subscriber);
        tracing::info!(subscriber = %subscriber, total, "subscriber ready");

        let greeting = Bytes::from_static(GREETING);
        if let Err(e) = self
            .transport
            .send(subscriber, PayloadKind::Text, &greeting)
        {
            let total = self.registry.remove(subscriber);
            tracing::warn!(
                subscriber = %subscriber,
                error = %e,
                total,
                "greeting failed, subscriber dropped"
            );
        }
    }

    fn on_data(&self, _subscriber: SubscriberId, _kind: PayloadKind, _payload: Bytes) -> bool {
        // The feed is one-way; inbound payloads are ignored.
        true
    }

    fn on_close(&self, subscriber: SubscriberId) {
        let total = self.registry.remove(subscriber);
        tracing::info!(subscriber = %subscriber, total, "subscriber closed");
    }
}
