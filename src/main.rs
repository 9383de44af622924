//! Mini KV - replay a store command script
//!
//! Reads JSON-lines commands and prints one JSON outcome per command on
//! stdout. Logs go to stderr.

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_kv::{Config, Replayer};

/// Mini KV - replay JSON-lines store commands against a fresh in-memory store
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Script to replay; `-` or no value reads stdin
    script: Option<PathBuf>,

    /// Abort on the first unparseable line (overrides MINI_KV_STRICT)
    #[arg(long)]
    strict: bool,

    /// Maximum key length in bytes (overrides MINI_KV_MAX_KEY_LENGTH)
    #[arg(long)]
    max_key_length: Option<usize>,
}

impl Cli {
    /// Layers command-line flags over the environment configuration.
    fn apply(&self, mut config: Config) -> Config {
        if self.strict {
            config.strict = true;
        }
        if let Some(max_key_length) = self.max_key_length {
            config.max_key_length = max_key_length;
        }
        config
    }

    /// Script path, or None for stdin.
    fn script_path(&self) -> Option<&Path> {
        self.script
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

/// Main entry point for the replay tool.
///
/// # Startup Sequence
/// 1. Parse arguments and load configuration from environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Read the script
/// 4. Replay it against a fresh store and print outcomes
fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());

    // RUST_LOG wins over the configured fallback filter
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        "Configuration loaded: max_key_length={}, strict={}",
        config.max_key_length, config.strict
    );

    let script_path = cli.script_path();
    let script = read_script(script_path)?;
    let source = script_path.map_or_else(|| "stdin".to_string(), |p| p.display().to_string());

    let replayer = Replayer::from_config(&config);
    let lines = replayer
        .run_script(&script)
        .with_context(|| format!("replay of {} aborted", source))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in &lines {
        let json = serde_json::to_string(line).context("failed to encode outcome")?;
        writeln!(out, "{}", json).context("failed to write outcome")?;
    }
    out.flush().context("failed to flush stdout")?;

    Ok(())
}

/// Reads the script from a file, or stdin when no path is given.
fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut script = String::new();
            io::stdin()
                .read_to_string(&mut script)
                .context("failed to read script from stdin")?;
            Ok(script)
        }
    }
}
