//! Coefficient-closure validator.
//!
//! Re-evaluates every generated term from its recorded index assignment and
//! checks that the stored phase is exactly the contraction's coefficient.
//! Since a phase is never zero, this also shows vanishing contractions never
//! produce a term.

use pffrg_algebra::{Catalog, Channel, Symmetry};
use pffrg_codegen::{Evaluator, Term};

use super::{flow_terms, spin_terms, truncate};
use crate::report::{ConformanceReport, TestResult};
use crate::Samples;

const VALIDATOR: &str = "engine/closure";

/// Validates coefficient closure over every sampled run.
pub fn validate(samples: &Samples) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for (name, output) in samples.flows() {
        let symmetry = output.config.symmetry;
        for (channel, terms) in flow_terms(output) {
            check_terms(&mut report, name, channel, symmetry, &terms);
        }
    }
    for (name, output) in samples.spins() {
        let symmetry = output.config.symmetry;
        for (channel, terms) in spin_terms(output) {
            check_terms(&mut report, name, channel, symmetry, &terms);
        }
    }
    report
}

fn check_terms(
    report: &mut ConformanceReport,
    run: &str,
    channel: Channel,
    symmetry: Symmetry,
    terms: &[&Term],
) {
    let evaluator = Catalog::full()
        .find(channel)
        .map(|p| Evaluator::new(p, symmetry));
    let eval = match evaluator {
        Some(Ok(eval)) => eval,
        Some(Err(e)) => {
            report.push(TestResult::fail(VALIDATOR, format!("{run}/{channel}: {e}")));
            return;
        }
        None => {
            report.push(TestResult::fail(
                VALIDATOR,
                format!("{run}/{channel}: no pattern in catalog"),
            ));
            return;
        }
    };
    let violations: Vec<String> = terms
        .iter()
        .filter_map(|t| match eval.coefficient(&t.tuple, t.product) {
            Ok(expected) if expected == t.phase.coefficient() => None,
            Ok(expected) => Some(format!(
                "product {} at {:?}: stored {}, evaluates to {expected}",
                t.product, t.tuple, t.phase
            )),
            Err(e) => Some(format!("product {} at {:?}: {e}", t.product, t.tuple)),
        })
        .collect();
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!(
            "{run}/{channel}: {} terms carry their exact unit coefficient",
            terms.len()
        ),
        format!(
            "{run}/{channel}: {} terms disagree with re-evaluation",
            violations.len()
        ),
        truncate(violations),
    ));
}
