//! PFFRG conformance suite.
//!
//! Validates the term generator against its testable properties by
//! generating a fixed set of sample runs once and handing them to each
//! validator.
//!
//! # Conformance Scope
//!
//! | Validator | Property |
//! |-----------|----------|
//! | `algebra/*` | Structure-constant table laws, reduced-rotation pair rule |
//! | `engine/closure` | Every term carries its exact coefficient in `{±1, ±i}` |
//! | `engine/determinism` | Identical configuration gives byte-identical output, no cross-run state |
//! | `engine/symmetry` | Restrictions strictly shrink the enumeration and are honored by every term |
//! | `engine/inventory` | Catalog shape, reference term counts, golden s-channel term, reference phases and spin text |
//! | `output/templates` | Every emitted line matches its template, brackets balance |
//!
//! # Entry Point
//!
//! ```no_run
//! use pffrg_conformance::run_all;
//!
//! let report = run_all();
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use pffrg_algebra::Symmetry;
use pffrg_codegen::{generate_flow, generate_spin, FlowConfig, FlowOutput, SpinConfig, SpinOutput};
use tracing::debug;

pub use report::{ConformanceReport, Severity, TestResult};

/// Reduced rotation without time reversal.
pub const ROTATION: Symmetry = Symmetry {
    reduced_rotation: true,
    time_reversal: false,
};

/// Generation runs shared by the validators.
#[derive(Debug, Clone)]
pub struct Samples {
    /// Flow equation, no restriction (the reference run).
    pub none: FlowOutput,
    /// Flow equation, reduced rotation.
    pub rotation: FlowOutput,
    /// Flow equation, reduced rotation and time reversal.
    pub full: FlowOutput,
    /// Spin correlation, no restriction.
    pub spin_none: SpinOutput,
    /// Spin correlation with the reference configuration.
    pub spin_full: SpinOutput,
}

impl Samples {
    /// Runs every sample configuration in a fixed order.
    ///
    /// # Errors
    ///
    /// Propagates the first generation error.
    pub fn generate() -> pffrg_codegen::Result<Self> {
        let flow = |symmetry| {
            generate_flow(&FlowConfig {
                symmetry,
                ..FlowConfig::default()
            })
        };
        let spin_none = SpinConfig {
            symmetry: Symmetry::NONE,
            ..SpinConfig::default()
        };
        Ok(Self {
            none: flow(Symmetry::NONE)?,
            rotation: flow(ROTATION)?,
            full: flow(Symmetry::FULL)?,
            spin_none: generate_spin(&spin_none)?,
            spin_full: generate_spin(&SpinConfig::default())?,
        })
    }

    /// Flow-equation runs with their names.
    pub fn flows(&self) -> [(&'static str, &FlowOutput); 3] {
        [
            ("none", &self.none),
            ("rotation", &self.rotation),
            ("full", &self.full),
        ]
    }

    /// Spin-correlation runs with their names.
    pub fn spins(&self) -> [(&'static str, &SpinOutput); 2] {
        [
            ("spin-none", &self.spin_none),
            ("spin-full", &self.spin_full),
        ]
    }
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. Structure-constant table (no generation needed)
/// 2. Sample generation; a failure here ends the run
/// 3. Coefficient closure
/// 4. Determinism and cross-run isolation
/// 5. Symmetry reduction
/// 6. Inventory (catalog, reference counts, golden term)
/// 7. Output templates
pub fn run_all() -> ConformanceReport {
    let mut report = ConformanceReport::new();

    // 1. Table
    report.extend(validators::algebra::validate());

    // 2. Samples
    let samples = match Samples::generate() {
        Ok(samples) => {
            report.push(TestResult::pass(
                "engine/generation",
                "All sample configurations generate without error",
            ));
            samples
        }
        Err(e) => {
            report.push(TestResult::fail("engine/generation", e.to_string()));
            return report;
        }
    };
    debug!("samples generated");

    // 3-7. Properties of the generated output
    report.extend(validators::closure::validate(&samples));
    report.extend(validators::determinism::validate(&samples));
    report.extend(validators::symmetry::validate(&samples));
    report.extend(validators::inventory::validate(&samples));
    report.extend(validators::templates::validate(&samples));

    debug!(summary = %report.summary(), "conformance run finished");
    report
}

#[cfg(test)]
mod tests_unit {
    use super::*;

    #[test]
    fn reference_build_conforms() {
        let report = run_all();
        let failures: Vec<_> = report.results.iter().filter(|r| r.is_failure()).collect();
        assert!(failures.is_empty(), "Conformance failures: {failures:#?}");
    }

    #[test]
    fn samples_use_their_configurations() {
        let samples = Samples::generate();
        assert!(samples.is_ok());
        if let Ok(samples) = samples {
            assert_eq!(samples.rotation.config.symmetry, ROTATION);
            assert_eq!(samples.full.config.symmetry, Symmetry::FULL);
            assert_eq!(samples.spin_full.config, SpinConfig::default());
        }
    }
}
