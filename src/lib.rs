//! Real-time frame broadcast engine
//!
//! Ingests a binary dataset of grayscale frames once at startup, transcodes
//! each into its wire form (raw bytes, grayscale JPEG, or base64 text of the
//! JPEG), and fans the current frame out to every connected subscriber at a
//! fixed rate through a caller-provided transport.
//!
//! # Architecture
//!
//! ```text
//!  images.bin ──► encode::ingest_dataset ──► FrameStore (write-once)
//!                                                │
//!                            Scheduler (60 FPS)  │ read-only, cyclic
//!                                                ▼
//!                  SubscriberRegistry snapshot ──► Transport::send
//!                     ▲               ▲
//!             on_ready│       on_close│  (transport callbacks)
//! ```
//!
//! The transport (WebSocket handshake, framing, TLS) is an external
//! collaborator: it implements [`Transport`] and drives the engine's
//! [`EndpointEvents`] callbacks as connections come and go.
//!
//! Delivery is lossy and best-effort: latest frame wins, there is
//! no replay, and a subscriber that cannot keep up is dropped rather than
//! allowed to stall the feed.
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use framecast::{Engine, EngineConfig, PayloadMode};
//! # struct MyTransport;
//! # impl framecast::Transport for MyTransport {
//! #     fn register_endpoint(&self, _: &str, _: Arc<dyn framecast::EndpointEvents>) {}
//! #     fn send(
//! #         &self,
//! #         _: framecast::SubscriberId,
//! #         _: framecast::PayloadKind,
//! #         _: &bytes::Bytes,
//! #     ) -> Result<(), framecast::SendError> {
//! #         Ok(())
//! #     }
//! # }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let transport = Arc::new(MyTransport);
//! let config = EngineConfig::default().payload_mode(PayloadMode::CompressedText);
//! let engine = Engine::start(config, transport);
//!
//! // ... serve until shutdown ...
//! engine.stop().await;
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod encode;
pub mod engine;
pub mod error;
pub mod registry;
mod scheduler;
pub mod stats;
pub mod store;
pub mod transport;

pub use config::EngineConfig;
pub use encode::{ingest_dataset, EncodedFrame, PayloadMode};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use registry::SubscriberRegistry;
pub use store::{FrameCursor, FrameStore};
pub use transport::{EndpointEvents, PayloadKind, SendError, SubscriberId, Transport};
