//! Symmetry-reduction validator.
//!
//! Compares the unrestricted, reduced-rotation and fully restricted flow
//! runs:
//! - reduced rotation strictly lowers the term count of every flow channel
//! - adding time reversal never raises a count, and strictly lowers the total
//! - every term honors the restricted index pairs of its pattern
//! - under time reversal every propagator leg sits at the identity component
//! - each expression has one group per admitted leg assignment

use pffrg_algebra::model::IDENTITY;
use pffrg_algebra::{Catalog, Channel, Symmetry};
use pffrg_codegen::{FlowOutput, Term};

use super::{flow_terms, spin_terms, truncate};
use crate::report::{ConformanceReport, TestResult};
use crate::Samples;

const VALIDATOR: &str = "engine/symmetry";

/// Validates the symmetry restrictions on the sampled runs.
pub fn validate(samples: &Samples) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    check_rotation_reduces(&mut report, samples);
    check_reversal_reduces(&mut report, samples);
    for (name, output) in samples.flows() {
        let symmetry = output.config.symmetry;
        check_restricted_pairs(&mut report, name, symmetry, flow_terms(output));
        check_group_counts(&mut report, name, output);
    }
    for (name, output) in samples.spins() {
        let symmetry = output.config.symmetry;
        check_restricted_pairs(&mut report, name, symmetry, spin_terms(output));
    }
    check_identity_legs(&mut report, samples);
    report
}

fn check_rotation_reduces(report: &mut ConformanceReport, samples: &Samples) {
    let none = samples.none.report.flow_counts();
    let rotation = samples.rotation.report.flow_counts();
    let violations: Vec<String> = Channel::FLOW
        .iter()
        .zip(rotation.iter().zip(none))
        .filter(|(_, (r, n))| **r >= *n)
        .map(|(c, (r, n))| format!("{c}: {r} restricted vs {n} unrestricted"))
        .collect();
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("Reduced rotation lowers every channel: {rotation:?} < {none:?}"),
        "Reduced rotation does not lower every channel",
        violations,
    ));
}

fn check_reversal_reduces(report: &mut ConformanceReport, samples: &Samples) {
    let rotation = samples.rotation.report.flow_counts();
    let full = samples.full.report.flow_counts();
    let mut violations: Vec<String> = Channel::FLOW
        .iter()
        .zip(full.iter().zip(rotation))
        .filter(|(_, (f, r))| **f > *r)
        .map(|(c, (f, r))| format!("{c}: {f} with time reversal vs {r} without"))
        .collect();
    let total = |counts: [usize; 5]| counts.iter().sum::<usize>();
    if total(full) >= total(rotation) {
        violations.push(format!(
            "total {} with time reversal vs {} without",
            total(full),
            total(rotation)
        ));
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("Time reversal lowers the total: {full:?} <= {rotation:?}"),
        "Time reversal does not reduce the enumeration",
        violations,
    ));
}

fn check_restricted_pairs(
    report: &mut ConformanceReport,
    run: &str,
    symmetry: Symmetry,
    terms: Vec<(Channel, Vec<&Term>)>,
) {
    if !symmetry.reduced_rotation {
        return;
    }
    let catalog = Catalog::full();
    let mut violations = Vec::new();
    for (channel, terms) in terms {
        let Some(pattern) = catalog.find(channel) else {
            violations.push(format!("{channel}: no pattern in catalog"));
            continue;
        };
        for term in terms {
            let broken = pattern
                .restricted_pairs
                .iter()
                .map(|&(x, y)| (term.tuple.value(x), term.tuple.value(y)))
                .find(|&(x, y)| !symmetry.permits_pair(x, y));
            if let Some(pair) = broken {
                violations.push(format!("{channel}: pair {pair:?} at {:?}", term.tuple));
            }
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{run}: every term honors its restricted pairs"),
        format!(
            "{run}: {} terms break the reduced-rotation rule",
            violations.len()
        ),
        truncate(violations),
    ));
}

fn check_identity_legs(report: &mut ConformanceReport, samples: &Samples) {
    let mut violations = Vec::new();
    let runs = [
        ("full", flow_terms(&samples.full)),
        ("spin-full", spin_terms(&samples.spin_full)),
    ];
    for (run, terms) in runs {
        for (channel, terms) in terms {
            for term in terms {
                if term.legs.components().iter().any(|&c| c != IDENTITY) {
                    violations.push(format!("{run}/{channel}: legs {:?}", term.legs.components()));
                }
            }
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Time reversal keeps every propagator leg at the identity component",
        "Terms with non-identity legs under time reversal",
        truncate(violations),
    ));
}

fn check_group_counts(report: &mut ConformanceReport, run: &str, output: &FlowOutput) {
    let components = output.config.symmetry.components().len();
    let catalog = Catalog::full();
    let mut violations = Vec::new();
    let leg_grouped = [
        (Channel::SchwingerDyson, &output.schwinger_dyson),
        (Channel::S, &output.s),
        (Channel::TLeft, &output.t_left),
        (Channel::TRight, &output.t_right),
        (Channel::U, &output.u),
    ];
    for (channel, exprs) in leg_grouped {
        let Some(pattern) = catalog.find(channel) else {
            violations.push(format!("{channel}: no pattern in catalog"));
            continue;
        };
        let expected = components.pow(pattern.legs.len() as u32);
        for expr in exprs {
            if expr.groups.len() != expected {
                violations.push(format!(
                    "{channel} {}{}: {} groups, expected {expected}",
                    expr.mu,
                    expr.nu,
                    expr.groups.len()
                ));
            }
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{run}: one group per admitted leg assignment"),
        format!("{run}: wrong number of leg groups"),
        truncate(violations),
    ));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn samples_reduce() {
        let samples = Samples::generate().unwrap();
        let report = validate(&samples);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn swapped_runs_fail_reduction() {
        let mut samples = Samples::generate().unwrap();
        std::mem::swap(&mut samples.none, &mut samples.rotation);
        let mut report = ConformanceReport::new();
        check_rotation_reduces(&mut report, &samples);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].details.len(), 5);
    }
}
