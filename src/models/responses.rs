//! Outcome DTOs for the replay runner
//!
//! Defines the structure of the JSON line printed for each command.

use serde::Serialize;
use serde_json::Value;

use crate::kv::StoreStats;

/// Result of applying one command, tagged by `result`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// Write or import applied
    Ok,
    /// Read found a live value
    Value { value: Value },
    /// Read found nothing live
    Missing,
    Deleted { existed: bool },
    Keys { keys: Vec<String> },
    Swapped { swapped: bool },
    Snapshot { snapshot: String },
    Cleaned { removed: usize },
    Stats(StatsResponse),
    /// Command rejected; the store is unchanged
    Error { error: String },
}

impl Outcome {
    /// Creates an error outcome
    pub fn error(error: impl Into<String>) -> Self {
        Outcome::Error {
            error: error.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }
}

/// One printed replay line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayLine {
    /// 1-based line number in the script
    pub line: usize,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl ReplayLine {
    pub fn new(line: usize, outcome: Outcome) -> Self {
        Self { line, outcome }
    }
}

/// Response body for the stats command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsResponse {
    pub writes: u64,
    pub deletes: u64,
    pub cas_succeeded: u64,
    pub cas_failed: u64,
    pub imports: u64,
    /// Physical entries, including expired ones not yet cleaned up
    pub total_entries: usize,
    /// cas_succeeded / (cas_succeeded + cas_failed)
    pub cas_success_rate: f64,
}

impl From<StoreStats> for StatsResponse {
    fn from(stats: StoreStats) -> Self {
        Self {
            cas_success_rate: stats.cas_success_rate(),
            writes: stats.writes,
            deletes: stats.deletes,
            cas_succeeded: stats.cas_succeeded,
            cas_failed: stats.cas_failed,
            imports: stats.imports,
            total_entries: stats.total_entries,
        }
    }
}
