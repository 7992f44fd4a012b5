//! `pffrg-flow`: generates the pseudo-fermion vertex flow-equation terms.
//!
//! Prints the Schwinger–Dyson expression, the five channel expressions with
//! their `addG` and `double t..` lines, and the per-channel term counts.
//! With no arguments the output is the reference output.
//!
//! **Usage:**
//! ```text
//! pffrg-flow [--config <file>] [--reduced-rotation] [--time-reversal]
//!            [--style abstract|interpolated] [--two-loop] [--sublattice 0|1|2]
//!            [--format text|json] [--out <file>] [-v...] [--quiet]
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
use clap::{Parser, ValueEnum};
use pffrg_clients::{pretty_json, read_config, write_output, LogArgs, OutputFormat};
use pffrg_codegen::json::flow_to_json;
use pffrg_codegen::render::render_flow;
use pffrg_codegen::{generate_flow, FlowConfig, OperandStyle};

/// Operand notation on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Style {
    /// Abstract symbols such as `Ch1A1_01`.
    Abstract,
    /// Expanded `getIntpolG(...)` calls.
    Interpolated,
}

impl From<Style> for OperandStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Abstract => OperandStyle::Abstract,
            Style::Interpolated => OperandStyle::Interpolated,
        }
    }
}

/// Generate the PFFRG flow-equation terms.
#[derive(Parser)]
#[command(
    name = "pffrg-flow",
    version,
    about = "Generate PFFRG flow-equation terms"
)]
struct Args {
    /// TOML configuration file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Restrict to a U(1) spin-rotation symmetric model.
    #[arg(long)]
    reduced_rotation: bool,

    /// Restrict to a time-reversal symmetric model.
    #[arg(long)]
    time_reversal: bool,

    /// Operand notation.
    #[arg(long, value_enum)]
    style: Option<Style>,

    /// Emit two-loop vertex terms.
    #[arg(long)]
    two_loop: bool,

    /// Sublattice selector of the RPA vertex-product offset.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=2))]
    sublattice: Option<u8>,

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
    fn config(&self) -> Result<FlowConfig> {
        let mut config = match &self.config {
            Some(path) => FlowConfig::from_toml(&read_config(path)?)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?,
            None => FlowConfig::default(),
        };
        config.symmetry.reduced_rotation |= self.reduced_rotation;
        config.symmetry.time_reversal |= self.time_reversal;
        config.two_loop |= self.two_loop;
        if let Some(style) = self.style {
            config.style = style.into();
        }
        if let Some(sublattice) = self.sublattice {
            config.sublattice = sublattice;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.log.init();

    let config = args.config()?;
    tracing::debug!(?config, "configuration resolved");
    let output = generate_flow(&config).context("Flow-equation generation failed")?;

    let text = match args.format {
        OutputFormat::Text => render_flow(&output),
        OutputFormat::Json => pretty_json(&flow_to_json(&output))?,
    };
    write_output(args.out.as_deref(), &text)
}
