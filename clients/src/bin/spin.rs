//! `pffrg-spin`: generates the spin-correlation terms for one matrix element.
//!
//! Prints the first terms (summed over lattice sites), the second terms and
//! the terms quadratic in propagators. With no arguments the output is the
//! reference output for `(mu, nu) = (2, 1)` with both restrictions on.
//!
//! **Usage:**
//! ```text
//! pffrg-spin [--config <file>] [--mu <0-3>] [--nu <0-3>] [--unrestricted]
//!            [--expanded] [--format text|json] [--out <file>] [-v...] [--quiet]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pffrg_algebra::Symmetry;
use pffrg_clients::{pretty_json, read_config, write_output, LogArgs, OutputFormat};
use pffrg_codegen::json::spin_to_json;
use pffrg_codegen::render::render_spin;
use pffrg_codegen::{generate_spin, SpinConfig};

/// Generate the PFFRG spin-correlation terms.
#[derive(Parser)]
#[command(
    name = "pffrg-spin",
    version,
    about = "Generate PFFRG spin-correlation terms"
)]
struct Args {
    /// TOML configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Row of the correlation matrix element.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..4))]
    mu: Option<u8>,

    /// Column of the correlation matrix element.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..4))]
    nu: Option<u8>,

    /// Drop both symmetry restrictions.
    #[arg(long)]
    unrestricted: bool,

    /// Write expanded interpolation calls instead of abstract symbols.
    #[arg(long)]
    expanded: bool,

    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write to this file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

impl Args {
    fn config(&self) -> Result<SpinConfig> {
        let mut config = match &self.config {
            Some(path) => SpinConfig::from_toml(&read_config(path)?)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?,
            None => SpinConfig::default(),
        };
        if self.unrestricted {
            config.symmetry = Symmetry::NONE;
        }
        if self.expanded {
            config.simplified = false;
        }
        if let Some(mu) = self.mu {
            config.mu = usize::from(mu);
        }
        if let Some(nu) = self.nu {
            config.nu = usize::from(nu);
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.log.init();

    let config = args.config()?;
    tracing::debug!(?config, "configuration resolved");
    let output = generate_spin(&config).context("Spin-correlation generation failed")?;

    let text = match args.format {
        OutputFormat::Text => render_spin(&output),
        OutputFormat::Json => pretty_json(&spin_to_json(&output))?,
    };
    write_output(args.out.as_deref(), &text)
}
