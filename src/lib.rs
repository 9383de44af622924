//! Mini KV - An in-memory key-value store driven by logical time
//!
//! Provides TTL expiry evaluated against caller-supplied instants, atomic
//! compare-and-set and deterministic JSON snapshots.

pub mod config;
pub mod error;
pub mod kv;
pub mod models;
pub mod replay;

pub use config::Config;
pub use error::{Result, StoreError};
pub use kv::{Lookup, SharedStore, Store};
pub use replay::Replayer;
