//! Frame feed demo with a stand-in transport
//!
//! Run with: cargo run --example feed_server [DATASET]
//!
//! Examples:
//!   cargo run --example feed_server                 # reads ./images.bin
//!   cargo run --example feed_server frames.bin      # reads ./frames.bin
//!
//! A real deployment would back [`Transport`] with a WebSocket server; this
//! demo wires a stub that counts sends and simulates one subscriber joining,
//! so the whole ingest -> broadcast -> stop path can be watched in the logs.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use framecast::{
    EndpointEvents, Engine, EngineConfig, PayloadKind, PayloadMode, SendError, SubscriberId,
    Transport,
};

/// Transport stand-in: accepts the endpoint registration and counts sends.
#[derive(Default)]
struct StubTransport {
    events: Mutex<Option<Arc<dyn EndpointEvents>>>,
    sent: AtomicU64,
}

impl StubTransport {
    fn events(&self) -> Arc<dyn EndpointEvents> {
        self.events
            .lock()
            .unwrap()
            .clone()
            .expect("endpoint not registered")
    }
}

impl Transport for StubTransport {
    fn register_endpoint(&self, path: &str, events: Arc<dyn EndpointEvents>) {
        println!("endpoint registered at {}", path);
        *self.events.lock().unwrap() = Some(events);
    }

    fn send(
        &self,
        _subscriber: SubscriberId,
        _kind: PayloadKind,
        _payload: &Bytes,
    ) -> Result<(), SendError> {
        self.sent.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("framecast=debug".parse()?),
        )
        .init();

    let dataset = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "images.bin".to_string());

    let transport = Arc::new(StubTransport::default());
    let config = EngineConfig::default()
        .dataset_path(dataset)
        .payload_mode(PayloadMode::Raw);
    let engine = Engine::start(config, Arc::clone(&transport));

    // Simulate one subscriber connecting through the transport
    let events = transport.events();
    let subscriber = SubscriberId(1);
    if events.on_connect_attempt(subscriber) {
        events.on_ready(subscriber);
    }

    println!("broadcasting, press Ctrl+C to stop");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            println!("\nshutting down...");
        }
        _ = tokio::time::sleep(Duration::from_secs(10)) => {
            println!("demo window elapsed");
        }
    }

    events.on_close(subscriber);
    engine.stop().await;

    println!("total sends: {}", transport.sent.load(Ordering::Relaxed));
    Ok(())
}
