//! Record Module
//!
//! Defines the structure for individual store records with TTL support.

use serde_json::Value;

use crate::kv::Timestamp;

// == Record ==
/// A single stored value and its absolute expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// The stored value
    pub value: Value,
    /// Expiration instant in logical seconds, None = no expiration
    pub expires_at: Option<Timestamp>,
}

impl Record {
    // == Constructor ==
    /// Creates a record expiring `ttl` seconds after `now`.
    ///
    /// `now` is only read when a TTL is given. A negative TTL yields a
    /// record that is already expired.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL in seconds
    /// * `now` - Produces the creation instant
    pub fn new(value: Value, ttl: Option<f64>, now: impl FnOnce() -> Timestamp) -> Self {
        Self {
            value,
            expires_at: ttl.map(|ttl| now() + ttl),
        }
    }

    /// Creates a record that never expires.
    pub fn permanent(value: Value) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    // == Is Expired ==
    /// Checks if the record has expired at `now`.
    ///
    /// Boundary condition: a record is expired once `now` reaches
    /// `expires_at`, so a record written to expire at T is already gone
    /// when evaluated exactly at T.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        match self.expires_at {
            Some(expires) => expires <= now,
            None => false,
        }
    }
}
