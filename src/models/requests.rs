//! Command DTOs for the replay runner
//!
//! Defines the structure of one JSON-lines replay command.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::kv::Timestamp;

/// One store operation, tagged by `op`.
///
/// Example lines:
/// ```text
/// {"op": "write", "key": "a", "value": "alive", "ttl": 10, "now": 100}
/// {"op": "compare_and_set", "key": "lock", "new_value": "me"}
/// {"op": "compare_and_set", "key": "lock", "expected": null, "new_value": "me"}
/// ```
/// In `compare_and_set`, an omitted `expected` means the key must be
/// absent, while `"expected": null` means it must hold JSON null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Write {
        key: String,
        value: Value,
        #[serde(default)]
        ttl: Option<f64>,
        #[serde(default)]
        now: Option<Timestamp>,
    },
    Read {
        key: String,
        #[serde(default)]
        now: Option<Timestamp>,
    },
    Delete {
        key: String,
    },
    Keys {
        #[serde(default)]
        now: Option<Timestamp>,
    },
    CompareAndSet {
        key: String,
        #[serde(default, deserialize_with = "present")]
        expected: Option<Value>,
        new_value: Value,
        #[serde(default)]
        now: Option<Timestamp>,
    },
    Export {
        #[serde(default)]
        now: Option<Timestamp>,
    },
    Import {
        snapshot: String,
    },
    Cleanup {
        #[serde(default)]
        now: Option<Timestamp>,
    },
    Stats,
}

/// Maps a field that is present (even as `null`) to `Some`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl Command {
    /// Key the command addresses, if any.
    pub fn key(&self) -> Option<&str> {
        match self {
            Command::Write { key, .. }
            | Command::Read { key, .. }
            | Command::Delete { key }
            | Command::CompareAndSet { key, .. } => Some(key.as_str()),
            _ => None,
        }
    }

    /// Validates the command data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self, max_key_length: usize) -> Option<String> {
        let key = self.key()?;
        if key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if key.len() > max_key_length {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                max_key_length
            ));
        }
        None
    }
}
