//! Shared plumbing for the PFFRG binaries.
//!
//! Logging goes to stderr so stdout carries only generated text. Every
//! binary takes the same `-v` / `--quiet` switches and, where it produces
//! output, the same `--format` and `--out` options.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logging switches shared by every binary.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LogArgs {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl LogArgs {
    /// Installs the global subscriber. `RUST_LOG` overrides the switches.
    pub fn init(self) {
        init_logging(self.verbose, self.quiet);
    }
}

/// Default filter directive for a verbosity level.
#[must_use]
pub fn level_directive(verbosity: u8, quiet: bool) -> &'static str {
    match (quiet, verbosity) {
        (true, _) => "off",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    }
}

/// Installs a `tracing` subscriber writing to stderr.
///
/// A second call is a no-op.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_directive(verbosity, quiet)));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}

/// Output encoding of the generator binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// The text fragments the downstream solver pastes in.
    #[default]
    Text,
    /// The structured model as pretty-printed JSON.
    Json,
}

/// Reads a configuration file.
///
/// # Errors
///
/// Returns an error naming the path if the file cannot be read.
pub fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))
}

/// Pretty-prints a JSON value with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn pretty_json(value: &serde_json::Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("Failed to serialize JSON output")?;
    text.push('\n');
    Ok(text)
}

/// Writes `text` to `out`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error naming the destination if writing fails.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = text.len(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
