//! Subscriber registry
//!
//! The only mutable state shared between the transport's callbacks and the
//! broadcast loop. Connect/close events mutate it; each tick the scheduler
//! takes a momentary snapshot and sends outside the lock, so callbacks never
//! wait behind a send pass.

pub mod store;

pub use store::SubscriberRegistry;
