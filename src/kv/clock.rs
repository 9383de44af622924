//! Clock Module
//!
//! Supplies the logical time used when a caller passes no explicit `now`.

use std::fmt::Debug;

use parking_lot::Mutex;

/// Logical time in seconds. TTLs are expressed in the same unit.
pub type Timestamp = f64;

// == Clock Trait ==
/// Source of the current logical time.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current time in seconds.
    fn now(&self) -> Timestamp;
}

// == System Clock ==
/// Wall clock reporting fractional Unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let now = chrono::Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
    }
}

// == Manual Clock ==
/// Clock that only moves when told to.
///
/// Used by tests and deterministic replays where time must not drift
/// between two operations.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock to an absolute time.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock() = now;
    }

    /// Moves the clock forward by `secs`.
    pub fn advance(&self, secs: f64) {
        *self.now.lock() += secs;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}
