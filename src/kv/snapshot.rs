//! Snapshot Module
//!
//! JSON encoding of the live contents of a store.
//!
//! Format: a single JSON object mapping each key to its value. Keys are
//! emitted in sorted order with compact separators, so two stores holding
//! the same data export byte-identical text. No expiry metadata is carried.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, StoreError};

// == Snapshot ==
/// Decoded snapshot: key to value, sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<String, Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces one key.
    pub fn insert(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }

    // == Encode ==
    /// Serializes the snapshot to compact JSON with sorted keys.
    pub fn encode(&self) -> String {
        serde_json::to_string(&self.entries).expect("string-keyed JSON map always serializes")
    }

    // == Decode ==
    /// Parses snapshot text.
    ///
    /// Fails with `MalformedSnapshot` unless the input is a single JSON
    /// object. Nesting depth is not limited, so anything `encode` emits
    /// decodes again.
    pub fn decode(input: &str) -> Result<Self> {
        let malformed = |e: serde_json::Error| StoreError::MalformedSnapshot(e.to_string());

        let mut deserializer = serde_json::Deserializer::from_str(input);
        deserializer.disable_recursion_limit();
        let entries = BTreeMap::<String, Value>::deserialize(&mut deserializer).map_err(malformed)?;
        deserializer.end().map_err(malformed)?;

        Ok(Self { entries })
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl IntoIterator for Snapshot {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
