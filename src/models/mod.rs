//! Command and outcome models for the replay runner
//!
//! This module defines the DTOs used for deserializing replay script lines
//! and serializing their outcomes.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::Command;
pub use responses::{Outcome, ReplayLine, StatsResponse};
