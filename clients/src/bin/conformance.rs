//! `pffrg-conformance`: checks the term generator against its testable properties.
//!
//! Runs the complete conformance suite:
//! - structure-constant table laws
//! - coefficient closure of every generated term
//! - determinism and cross-run isolation
//! - symmetry reduction
//! - catalog inventory, reference counts and the golden s-channel term
//! - output line templates
//!
//! **Usage:**
//! ```text
//! pffrg-conformance [-v...] [--quiet]
//! ```
//!
//! Exits non-zero if any conformance check fails.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::process;

use anyhow::Result;
use clap::Parser;
use pffrg_clients::LogArgs;
use pffrg_conformance::run_all;

/// Run the PFFRG conformance suite.
#[derive(Parser)]
#[command(
    name = "pffrg-conformance",
    version,
    about = "Check the PFFRG term generator against its testable properties"
)]
struct Args {
    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.log.init();

    let report = run_all();

    println!("PFFRG Term Generator Conformance Report");
    println!("=======================================");
    println!();

    for result in &report.results {
        println!("{result}");
    }

    println!();
    println!("Summary: {}", report.summary());

    let failed = report.failure_count();
    if failed > 0 {
        eprintln!("Conformance FAILED: {failed} check(s) did not pass.");
        process::exit(1);
    }

    println!("Conformance PASSED.");
    Ok(())
}
