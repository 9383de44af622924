//! Shared Store Module
//!
//! Thread-safe handle around a [`Store`] for concurrent callers.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::Result;
use crate::kv::{Clock, Lookup, Store, StoreStats, Timestamp};

// == Shared Store ==
/// Cloneable handle to one store guarded by a single `RwLock`.
///
/// Mutations take the write lock, so a compare-and-set runs its read,
/// comparison and write inside one critical section. Reads, key listings
/// and exports take the read lock and see a consistent view of the map.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<Store>>,
}

impl SharedStore {
    /// Wraps an existing store.
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(Store::with_clock(clock))
    }

    pub fn write(
        &self,
        key: impl Into<String>,
        value: Value,
        ttl: Option<f64>,
        now: Option<Timestamp>,
    ) {
        self.inner.write().write(key, value, ttl, now);
    }

    pub fn read(&self, key: &str, now: Option<Timestamp>) -> Lookup {
        self.inner.read().read(key, now)
    }

    pub fn delete(&self, key: &str) -> bool {
        self.inner.write().delete(key)
    }

    pub fn keys(&self, now: Option<Timestamp>) -> Vec<String> {
        self.inner.read().keys(now)
    }

    /// Atomic compare-and-set; see [`Store::compare_and_set`].
    pub fn compare_and_set(
        &self,
        key: &str,
        expected: &Lookup,
        new_value: Value,
        now: Option<Timestamp>,
    ) -> bool {
        self.inner
            .write()
            .compare_and_set(key, expected, new_value, now)
    }

    pub fn export(&self, now: Option<Timestamp>) -> String {
        self.inner.read().export(now)
    }

    /// Replaces the store contents; the store is untouched on error.
    pub fn import(&self, input: &str) -> Result<()> {
        self.inner.write().import(input)
    }

    pub fn cleanup_expired(&self, now: Option<Timestamp>) -> usize {
        self.inner.write().cleanup_expired(now)
    }

    pub fn stats(&self) -> StoreStats {
        self.inner.read().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_shared_clones_see_same_store() {
        let store = SharedStore::default();
        let other = store.clone();

        store.write("k", json!("v"), None, None);
        assert_eq!(other.read("k", None), Lookup::Present(json!("v")));
        assert_eq!(other.keys(None), vec!["k"]);
    }

    #[test]
    fn test_racing_cas_from_absent_has_one_winner() {
        let store = SharedStore::default();
        let winners = AtomicUsize::new(0);

        thread::scope(|s| {
            for id in 0..16 {
                let store = &store;
                let winners = &winners;
                s.spawn(move || {
                    if store.compare_and_set("lock", &Lookup::Absent, json!(id), Some(0.0)) {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                });
            }
        });

        assert_eq!(winners.load(Ordering::SeqCst), 1);
        assert!(store.read("lock", Some(0.0)).is_present());
        assert_eq!(store.stats().cas_failed, 15);
    }

    #[test]
    fn test_racing_increments_are_not_lost() {
        let store = SharedStore::default();
        store.write("counter", json!(0), None, None);

        thread::scope(|s| {
            for _ in 0..8 {
                let store = &store;
                s.spawn(move || {
                    for _ in 0..50 {
                        // Retry until our read-modify-write lands.
                        loop {
                            let current = store.read("counter", None);
                            let n = current.as_value().and_then(Value::as_u64).unwrap_or(0);
                            if store.compare_and_set("counter", &current, json!(n + 1), None) {
                                break;
                            }
                        }
                    }
                });
            }
        });

        assert_eq!(store.read("counter", None), Lookup::Present(json!(400)));
    }

    #[test]
    fn test_shared_malformed_import_keeps_state() {
        let store = SharedStore::default();
        store.write("a", json!(1), None, None);

        assert!(store.import("[]").is_err());
        assert_eq!(store.keys(None), vec!["a"]);

        store.import(r#"{"b": 2}"#).unwrap();
        assert_eq!(store.keys(None), vec!["b"]);
    }
}
