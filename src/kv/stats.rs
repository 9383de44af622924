//! Store Statistics Module
//!
//! Tracks mutation counters and compare-and-set outcomes.

use serde::Serialize;

// == Store Stats ==
/// Tracks store operation counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreStats {
    /// Number of write calls
    pub writes: u64,
    /// Number of delete calls that removed an entry
    pub deletes: u64,
    /// Number of compare-and-set calls that swapped the value
    pub cas_succeeded: u64,
    /// Number of compare-and-set calls rejected by the comparison
    pub cas_failed: u64,
    /// Number of successful snapshot imports
    pub imports: u64,
    /// Current number of physical entries, including expired ones not yet cleaned up
    pub total_entries: usize,
}

impl StoreStats {
    // == Constructor ==
    /// Creates a new StoreStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == CAS Success Rate ==
    /// Returns succeeded / (succeeded + failed), or 0.0 if no CAS was attempted.
    pub fn cas_success_rate(&self) -> f64 {
        let total = self.cas_succeeded + self.cas_failed;
        if total == 0 {
            0.0
        } else {
            self.cas_succeeded as f64 / total as f64
        }
    }

    pub fn record_write(&mut self) {
        self.writes += 1;
    }

    pub fn record_delete(&mut self) {
        self.deletes += 1;
    }

    /// Records the outcome of one compare-and-set call.
    pub fn record_cas(&mut self, swapped: bool) {
        if swapped {
            self.cas_succeeded += 1;
        } else {
            self.cas_failed += 1;
        }
    }

    pub fn record_import(&mut self) {
        self.imports += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = StoreStats::new();
        assert_eq!(stats.writes, 0);
        assert_eq!(stats.deletes, 0);
        assert_eq!(stats.cas_succeeded, 0);
        assert_eq!(stats.cas_failed, 0);
        assert_eq!(stats.total_entries, 0);
    }

    #[test]
    fn test_cas_success_rate_no_attempts() {
        let stats = StoreStats::new();
        assert_eq!(stats.cas_success_rate(), 0.0);
    }

    #[test]
    fn test_cas_success_rate_mixed() {
        let mut stats = StoreStats::new();
        stats.record_cas(true);
        stats.record_cas(false);
        stats.record_cas(false);
        stats.record_cas(true);
        assert_eq!(stats.cas_success_rate(), 0.5);
    }

    #[test]
    fn test_counters() {
        let mut stats = StoreStats::new();
        stats.record_write();
        stats.record_write();
        stats.record_delete();
        stats.record_import();
        stats.set_total_entries(42);

        assert_eq!(stats.writes, 2);
        assert_eq!(stats.deletes, 1);
        assert_eq!(stats.imports, 1);
        assert_eq!(stats.total_entries, 42);
    }
}
