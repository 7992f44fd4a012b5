//! `pffrg-patterns`: dumps the contraction-pattern catalog as JSON.
//!
//! Every pattern is listed with its legs, internal index ranges, restricted
//! pairs, phase factors, lookup products and grouping.
//!
//! **Usage:**
//! ```text
//! pffrg-patterns [--channel <name>] [--out <file>] [-v...] [--quiet]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;
use pffrg_algebra::serializer::json::{pattern_to_json, to_json};
use pffrg_algebra::Catalog;
use pffrg_clients::{pretty_json, write_output, LogArgs};

/// Dump the PFFRG contraction-pattern catalog.
#[derive(Parser)]
#[command(
    name = "pffrg-patterns",
    version,
    about = "Dump the PFFRG contraction-pattern catalog"
)]
struct Args {
    /// Only this channel, e.g. `s`, `rpa`, `t-left`, `schwinger-dyson`.
    #[arg(long)]
    channel: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.log.init();

    let catalog = Catalog::full();
    tracing::info!(
        version = catalog.version,
        patterns = catalog.patterns.len(),
        candidates = catalog.candidate_count(),
        "catalog loaded"
    );

    let value = match &args.channel {
        Some(name) => {
            let pattern = catalog
                .patterns
                .iter()
                .find(|p| p.channel.as_str() == name)
                .ok_or_else(|| {
                    let known: Vec<&str> = catalog
                        .patterns
                        .iter()
                        .map(|p| p.channel.as_str())
                        .collect();
                    anyhow!("Unknown channel {name:?}; known: {}", known.join(", "))
                })?;
            pattern_to_json(pattern)
        }
        None => to_json(catalog),
    };
    write_output(args.out.as_deref(), &pretty_json(&value)?)
}
