//! Transport integration seam
//!
//! The engine never owns a connection. An external connection-oriented
//! transport (WebSocket server or similar) accepts, upgrades, and frames the
//! wire; the engine registers an [`EndpointEvents`] handler for one endpoint
//! path and pushes payloads through [`Transport::send`].
//!
//! Callbacks arrive on transport-owned tasks or threads, concurrently with
//! the broadcast loop. Only the subscriber registry's lock orders them.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;

/// Opaque identity of one connected subscriber
///
/// Valid between the `on_ready` and `on_close` callbacks for that connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriberId(pub u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Wire framing for an outgoing payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// Binary framing (raw or JPEG frame bytes)
    Binary,
    /// Text framing (base64 frame text, greeting)
    Text,
}

/// Error from a failed [`Transport::send`]
///
/// Either way the peer is treated as unusable and dropped from the registry;
/// the transport remains responsible for surfacing `on_close` eventually.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The connection is already gone
    Closed,
    /// The subscriber's outgoing queue is full (peer cannot keep up)
    Backpressure,
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SendError::Closed => write!(f, "Connection closed"),
            SendError::Backpressure => write!(f, "Subscriber queue full"),
        }
    }
}

impl std::error::Error for SendError {}

/// Connection-oriented transport the engine broadcasts through
pub trait Transport: Send + Sync + 'static {
    /// Register the callback handler for an endpoint path.
    fn register_endpoint(&self, path: &str, events: Arc<dyn EndpointEvents>);

    /// Fire-and-forget write to one subscriber.
    ///
    /// Must not block the caller: implementations queue the payload or fail
    /// fast with [`SendError`]. Delivery is best-effort and never retried.
    fn send(
        &self,
        subscriber: SubscriberId,
        kind: PayloadKind,
        payload: &Bytes,
    ) -> Result<(), SendError>;
}

/// Callback surface the engine exposes to the transport
pub trait EndpointEvents: Send + Sync {
    /// A connection is attempting to open the endpoint. `true` accepts.
    fn on_connect_attempt(&self, subscriber: SubscriberId) -> bool;

    /// The connection completed its handshake and can receive payloads.
    fn on_ready(&self, subscriber: SubscriberId);

    /// Inbound payload from the subscriber. `true` keeps the connection open.
    fn on_data(&self, subscriber: SubscriberId, kind: PayloadKind, payload: Bytes) -> bool;

    /// The connection closed (peer or transport initiated).
    fn on_close(&self, subscriber: SubscriberId);
}
