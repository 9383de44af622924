//! Key-Value Store Module
//!
//! Provides in-memory storage with logical-time TTL expiry, compare-and-set
//! and JSON snapshots.

mod clock;
mod entry;
mod lookup;
mod shared;
mod snapshot;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use entry::Record;
pub use lookup::Lookup;
pub use serde_json::Value;
pub use shared::SharedStore;
pub use snapshot::Snapshot;
pub use stats::StoreStats;
pub use store::Store;
