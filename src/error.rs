//! Error types for the key-value store
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Store Error Enum ==
/// Unified error type for the store and the replay runner.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// Snapshot input is not a JSON object of string keys
    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// Replay command failed validation
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Replay script line could not be parsed
    #[error("Script error on line {line}: {message}")]
    Script { line: usize, message: String },
}

// == Result Type Alias ==
/// Convenience Result type for the store.
pub type Result<T> = std::result::Result<T, StoreError>;
