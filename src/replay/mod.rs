//! Replay Module
//!
//! Deterministic replay of store command scripts.
//!
//! # Script Format
//! One JSON command per line, tagged by `op`:
//! `write`, `read`, `delete`, `keys`, `compare_and_set`, `export`,
//! `import`, `cleanup`, `stats`. Blank lines and `#` comments are skipped.

mod runner;

pub use runner::Replayer;
