//! Subscriber set implementation

use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard};

use crate::transport::SubscriberId;

/// Concurrently-mutated set of live subscribers
///
/// Coarse single-lock discipline: every operation takes the one mutex, and
/// holds it only for the set operation itself. Membership is unique by id;
/// insertion order is irrelevant (snapshots come out in id order).
#[derive(Debug, Default)]
pub struct SubscriberRegistry {
    subscribers: Mutex<BTreeSet<SubscriberId>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber, returning the registry size after insertion.
    ///
    /// Adding an id that is already present leaves the set unchanged; the
    /// transport double-invoking ready for one connection is harmless.
    pub fn add(&self, id: SubscriberId) -> usize {
        let mut subscribers = self.lock();
        subscribers.insert(id);
        subscribers.len()
    }

    /// Remove a subscriber, returning the registry size after removal.
    ///
    /// Idempotent: removing an absent id is a no-op, not an error.
    pub fn remove(&self, id: SubscriberId) -> usize {
        let mut subscribers = self.lock();
        subscribers.remove(&id);
        subscribers.len()
    }

    /// Momentary copy of the current membership, in id order.
    pub fn snapshot(&self) -> Vec<SubscriberId> {
        self.lock().iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<SubscriberId>> {
        // The set stays valid even if a holder panicked mid-operation.
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_add_returns_size() {
        let registry = SubscriberRegistry::new();

        assert_eq!(registry.add(SubscriberId(1)), 1);
        assert_eq!(registry.add(SubscriberId(2)), 2);
    }

    #[test]
    fn test_duplicate_add_leaves_size_unchanged() {
        let registry = SubscriberRegistry::new();

        registry.add(SubscriberId(7));
        assert_eq!(registry.add(SubscriberId(7)), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let registry = SubscriberRegistry::new();
        registry.add(SubscriberId(1));

        assert_eq!(registry.remove(SubscriberId(1)), 0);
        assert_eq!(registry.remove(SubscriberId(1)), 0);
        assert_eq!(registry.remove(SubscriberId(99)), 0);
    }

    #[test]
    fn test_snapshot_is_ordered_copy() {
        let registry = SubscriberRegistry::new();
        registry.add(SubscriberId(3));
        registry.add(SubscriberId(1));
        registry.add(SubscriberId(2));

        let snapshot = registry.snapshot();
        assert_eq!(
            snapshot,
            vec![SubscriberId(1), SubscriberId(2), SubscriberId(3)]
        );

        // The snapshot is detached from later mutation
        registry.remove(SubscriberId(2));
        assert_eq!(snapshot.len(), 3);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_concurrent_mutation_keeps_set_consistent() {
        let registry = Arc::new(SubscriberRegistry::new());

        // Pre-populate ids 0..100, to be removed concurrently with adds of
        // the disjoint range 100..500.
        for id in 0..100 {
            registry.add(SubscriberId(id));
        }

        let mut handles = Vec::new();
        for chunk in 0..4 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                for id in (100 + chunk * 100)..(200 + chunk * 100) {
                    registry.add(SubscriberId(id));
                }
            }));
        }
        for chunk in 0..2 {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                for id in (chunk * 50)..(50 + chunk * 50) {
                    registry.remove(SubscriberId(id));
                }
            }));
        }
        {
            let registry = Arc::clone(&registry);
            handles.push(std::thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = registry.snapshot();
                    assert!(snapshot.windows(2).all(|w| w[0] < w[1]));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        // 100 pre-added - 100 removed + 400 added
        assert_eq!(registry.len(), 400);
        let snapshot = registry.snapshot();
        assert!(snapshot.iter().all(|id| id.0 >= 100));
    }
}
