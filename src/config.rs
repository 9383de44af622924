//! Configuration Module
//!
//! Handles loading replay and logging settings from environment variables.

use std::env;

/// Runtime configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum key length in bytes accepted by replay commands
    pub max_key_length: usize,
    /// Abort a replay on the first unparseable line
    pub strict: bool,
    /// Log filter used when RUST_LOG is unset
    pub log_filter: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MINI_KV_MAX_KEY_LENGTH` - Maximum key length (default: 256)
    /// - `MINI_KV_STRICT` - Stop on the first bad script line (default: false)
    /// - `MINI_KV_LOG` - Fallback log filter (default: "mini_kv=info")
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_key_length: env::var("MINI_KV_MAX_KEY_LENGTH")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_key_length),
            strict: env::var("MINI_KV_STRICT")
                .ok()
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.strict),
            log_filter: env::var("MINI_KV_LOG").unwrap_or(defaults.log_filter),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_key_length: 256,
            strict: false,
            log_filter: "mini_kv=info".to_string(),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
