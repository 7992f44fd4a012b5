//! Determinism validator.
//!
//! Regenerates sample configurations after the full sample set has run and
//! compares the results with the originals:
//! - structured output is equal
//! - rendered text is byte-identical
//! - structured JSON serializes to the same string
//!
//! Matching after the other runs in between also shows no state leaks from
//! one generation into the next.

use pffrg_codegen::json::{flow_to_json, spin_to_json};
use pffrg_codegen::render::{render_flow, render_spin};
use pffrg_codegen::{generate_flow, generate_spin, FlowOutput, SpinOutput};

use crate::report::{ConformanceReport, TestResult};
use crate::Samples;

const VALIDATOR: &str = "engine/determinism";

/// Validates that regeneration reproduces every sampled run.
pub fn validate(samples: &Samples) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for (name, original) in samples.flows() {
        match generate_flow(&original.config) {
            Ok(again) => compare_flow(&mut report, name, original, &again),
            Err(e) => report.push(TestResult::fail(VALIDATOR, format!("{name}: {e}"))),
        }
    }
    for (name, original) in samples.spins() {
        match generate_spin(&original.config) {
            Ok(again) => compare_spin(&mut report, name, original, &again),
            Err(e) => report.push(TestResult::fail(VALIDATOR, format!("{name}: {e}"))),
        }
    }
    report
}

fn compare_flow(report: &mut ConformanceReport, name: &str, a: &FlowOutput, b: &FlowOutput) {
    let mut differences = Vec::new();
    if a != b {
        differences.push("structured output differs".to_owned());
    }
    if render_flow(a) != render_flow(b) {
        differences.push("rendered text differs".to_owned());
    }
    if flow_to_json(a).to_string() != flow_to_json(b).to_string() {
        differences.push("JSON differs".to_owned());
    }
    push(report, name, differences);
}

fn compare_spin(report: &mut ConformanceReport, name: &str, a: &SpinOutput, b: &SpinOutput) {
    let mut differences = Vec::new();
    if a != b {
        differences.push("structured output differs".to_owned());
    }
    if render_spin(a) != render_spin(b) {
        differences.push("rendered text differs".to_owned());
    }
    if spin_to_json(a).to_string() != spin_to_json(b).to_string() {
        differences.push("JSON differs".to_owned());
    }
    push(report, name, differences);
}

fn push(report: &mut ConformanceReport, name: &str, differences: Vec<String>) {
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{name}: regeneration is byte-identical"),
        format!("{name}: regeneration differs"),
        differences,
    ));
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pffrg_algebra::Channel;

    #[test]
    fn samples_regenerate_identically() {
        let samples = Samples::generate().unwrap();
        let report = validate(&samples);
        assert_eq!(report.results.len(), 5);
        assert!(report.all_passed(), "{:#?}", report.results);
    }

    #[test]
    fn altered_output_is_detected() {
        let samples = Samples::generate().unwrap();
        let mut altered = samples.spin_none.clone();
        altered.first.groups.retain(|g| g.terms.is_empty());
        altered.report.terms.insert(Channel::SpinFirst, 0);
        let mut report = ConformanceReport::new();
        compare_spin(&mut report, "altered", &samples.spin_none, &altered);
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.results[0].details.len(), 3);
    }
}
