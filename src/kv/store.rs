//! Store Module
//!
//! Main storage engine: HashMap records with lazy, logical-time TTL expiry,
//! compare-and-set and snapshot export/import.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::kv::{Clock, Lookup, Record, Snapshot, StoreStats, SystemClock, Timestamp};

// == Store ==
/// In-memory key-value store with TTL support.
///
/// Every operation takes an optional `now`. When omitted, the store's
/// [`Clock`] supplies it. Expired records stay in the map until they are
/// overwritten, deleted or removed by [`Store::cleanup_expired`], but every
/// read-like operation treats them as absent.
#[derive(Debug)]
pub struct Store {
    /// Key-value storage
    entries: HashMap<String, Record>,
    /// Operation counters
    stats: StoreStats,
    /// Fallback time source
    clock: Arc<dyn Clock>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    // == Constructor ==
    /// Creates an empty store backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty store that reads missing `now` values from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: StoreStats::new(),
            clock,
        }
    }

    fn resolve(&self, now: Option<Timestamp>) -> Timestamp {
        now.unwrap_or_else(|| self.clock.now())
    }

    fn live(&self, key: &str, now: Timestamp) -> Option<&Record> {
        self.entries
            .get(key)
            .filter(|record| !record.is_expired_at(now))
    }

    // == Write ==
    /// Stores a value, replacing any prior record and its expiry.
    ///
    /// With a TTL the record expires at `now + ttl`; without one it never
    /// expires and `now` is not consulted.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in seconds; negative values yield an expired record
    /// * `now` - Logical time of the write
    pub fn write(
        &mut self,
        key: impl Into<String>,
        value: Value,
        ttl: Option<f64>,
        now: Option<Timestamp>,
    ) {
        let key = key.into();
        let record = Record::new(value, ttl, || self.resolve(now));
        debug!(key = %key, expires_at = ?record.expires_at, "write");

        self.entries.insert(key, record);
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
    }

    // == Read ==
    /// Returns the logical value of `key` at `now`.
    ///
    /// A record expires once `now` reaches its expiry instant. Reading never
    /// removes anything.
    pub fn read(&self, key: &str, now: Option<Timestamp>) -> Lookup {
        let now = self.resolve(now);
        self.live(key, now)
            .map(|record| record.value.clone())
            .into()
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns true whenever a mapping entry was physically present, even if
    /// it had already expired.
    pub fn delete(&mut self, key: &str) -> bool {
        let existed = self.entries.remove(key).is_some();
        if existed {
            self.stats.record_delete();
            self.stats.set_total_entries(self.entries.len());
        }
        debug!(key, existed, "delete");
        existed
    }

    // == Keys ==
    /// Returns every live key at `now` in ascending order.
    pub fn keys(&self, now: Option<Timestamp>) -> Vec<String> {
        let now = self.resolve(now);
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, record)| !record.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    // == Compare And Set ==
    /// Replaces the value of `key` with `new_value` if its logical value at
    /// `now` equals `expected`.
    ///
    /// Missing and expired keys compare equal to [`Lookup::Absent`]. Numbers
    /// compare by value, so an expected `2` matches a stored `2.0`. A
    /// successful swap always stores a record that never expires.
    pub fn compare_and_set(
        &mut self,
        key: &str,
        expected: &Lookup,
        new_value: Value,
        now: Option<Timestamp>,
    ) -> bool {
        let now = self.resolve(now);
        let matches = expected.matches(self.live(key, now).map(|record| &record.value));

        if matches {
            self.entries
                .insert(key.to_string(), Record::permanent(new_value));
            self.stats.set_total_entries(self.entries.len());
        }
        self.stats.record_cas(matches);
        debug!(key, swapped = matches, "compare_and_set");
        matches
    }

    // == Export ==
    /// Serializes every live key at `now` to a JSON snapshot.
    ///
    /// Expiry metadata is dropped; keys are emitted in sorted order.
    pub fn export(&self, now: Option<Timestamp>) -> String {
        self.snapshot(now).encode()
    }

    /// Collects the live contents at `now`.
    pub fn snapshot(&self, now: Option<Timestamp>) -> Snapshot {
        let now = self.resolve(now);
        let mut snapshot = Snapshot::new();
        for (key, record) in &self.entries {
            if !record.is_expired_at(now) {
                snapshot.insert(key.clone(), record.value.clone());
            }
        }
        snapshot
    }

    // == Import ==
    /// Replaces the whole store with the contents of a JSON snapshot.
    ///
    /// Imported records never expire. On a malformed snapshot the store is
    /// left exactly as it was.
    pub fn import(&mut self, input: &str) -> Result<()> {
        let snapshot = Snapshot::decode(input).map_err(|e| {
            warn!(error = %e, "rejected snapshot import");
            e
        })?;
        self.restore(snapshot);
        Ok(())
    }

    /// Replaces the whole store with an already decoded snapshot.
    pub fn restore(&mut self, snapshot: Snapshot) {
        let replaced = self.entries.len();
        let loaded = snapshot.len();
        self.entries = snapshot
            .into_iter()
            .map(|(key, value)| (key, Record::permanent(value)))
            .collect();

        self.stats.record_import();
        self.stats.set_total_entries(self.entries.len());
        info!(
            "Imported snapshot: {} keys loaded, {} entries replaced",
            loaded, replaced
        );
    }

    // == Cleanup Expired ==
    /// Physically removes all records expired at `now`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self, now: Option<Timestamp>) -> usize {
        let now = self.resolve(now);
        let before = self.entries.len();
        self.entries.retain(|_, record| !record.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.set_total_entries(self.entries.len());
        if removed > 0 {
            debug!("TTL cleanup: removed {} expired entries", removed);
        }
        removed
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of physical entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no physical entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
