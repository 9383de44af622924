//! Replay Runner
//!
//! Applies JSON-lines store commands to a shared store, one outcome per
//! command.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::kv::{Lookup, SharedStore};
use crate::models::{Command, Outcome, ReplayLine, StatsResponse};

/// Runner state: the target store plus replay settings.
#[derive(Debug, Clone)]
pub struct Replayer {
    /// Store the commands are applied to
    pub store: SharedStore,
    max_key_length: usize,
    strict: bool,
}

impl Replayer {
    /// Creates a runner over `store` with default settings.
    pub fn new(store: SharedStore) -> Self {
        Self::with_config(store, &Config::default())
    }

    /// Creates a runner over `store` using limits from the Config.
    pub fn with_config(store: SharedStore, config: &Config) -> Self {
        Self {
            store,
            max_key_length: config.max_key_length,
            strict: config.strict,
        }
    }

    /// Creates a runner over a fresh store from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_config(SharedStore::default(), config)
    }

    // == Apply ==
    /// Applies one command to the store.
    ///
    /// Fails with `InvalidCommand` when the key is rejected, and with
    /// `MalformedSnapshot` when an import cannot be parsed. Neither
    /// failure touches the store.
    pub fn apply(&self, command: Command) -> Result<Outcome> {
        if let Some(error_msg) = command.validate(self.max_key_length) {
            return Err(StoreError::InvalidCommand(error_msg));
        }

        let store = &self.store;
        let outcome = match command {
            Command::Write {
                key,
                value,
                ttl,
                now,
            } => {
                store.write(key, value, ttl, now);
                Outcome::Ok
            }
            Command::Read { key, now } => match store.read(&key, now) {
                Lookup::Present(value) => Outcome::Value { value },
                Lookup::Absent => Outcome::Missing,
            },
            Command::Delete { key } => Outcome::Deleted {
                existed: store.delete(&key),
            },
            Command::Keys { now } => Outcome::Keys {
                keys: store.keys(now),
            },
            Command::CompareAndSet {
                key,
                expected,
                new_value,
                now,
            } => Outcome::Swapped {
                swapped: store.compare_and_set(&key, &Lookup::from(expected), new_value, now),
            },
            Command::Export { now } => Outcome::Snapshot {
                snapshot: store.export(now),
            },
            Command::Import { snapshot } => {
                store.import(&snapshot)?;
                Outcome::Ok
            }
            Command::Cleanup { now } => Outcome::Cleaned {
                removed: store.cleanup_expired(now),
            },
            Command::Stats => Outcome::Stats(StatsResponse::from(store.stats())),
        };
        Ok(outcome)
    }

    // == Run Script ==
    /// Runs a whole JSON-lines script.
    ///
    /// Blank lines and lines starting with `#` are skipped. A line that does
    /// not parse becomes an error outcome, or aborts the run with
    /// `StoreError::Script` in strict mode. Commands rejected by
    /// [`Replayer::apply`] always become error outcomes.
    pub fn run_script(&self, script: &str) -> Result<Vec<ReplayLine>> {
        let mut lines = Vec::new();
        info!("Replay started");

        for (index, raw) in script.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            let command = match serde_json::from_str::<Command>(text) {
                Ok(command) => command,
                Err(e) if self.strict => {
                    return Err(StoreError::Script {
                        line,
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!(line, error = %e, "skipping unparseable command");
                    lines.push(ReplayLine::new(line, Outcome::error(e.to_string())));
                    continue;
                }
            };

            debug!(line, ?command, "applying");
            let outcome = self.apply(command).unwrap_or_else(|e| {
                warn!(line, error = %e, "command rejected");
                Outcome::error(e.to_string())
            });
            lines.push(ReplayLine::new(line, outcome));
        }

        let errors = lines.iter().filter(|l| l.outcome.is_error()).count();
        info!(
            "Replay finished: {} commands, {} errors",
            lines.len(),
            errors
        );
        Ok(lines)
    }
}
