//! Inventory validator.
//!
//! Verifies the pattern catalog and the reference run:
//! - 9 patterns (5 flow channels, Schwinger–Dyson, 3 spin-correlation), all well formed
//! - flow candidate counts 4096 / 64 / 4096 / 4096 / 4096 per leg assignment
//! - reference term counts 4096 / 1024 / 4096 / 4096 / 4096
//! - structured counts agree with the report, over all 16 `(mu, nu)`
//! - the golden all-identity s-channel term
//! - the u-channel sign for unequal propagator legs, and real reference phases
//! - the reference spin-correlation text

use pffrg_algebra::{Catalog, Channel};
use pffrg_codegen::emit::{emit, operand_indices, Notation};
use pffrg_codegen::evaluate::check_pattern;
use pffrg_codegen::render::render_spin;
use pffrg_codegen::{Expression, OperandStyle, Phase, RpaSum, Term};

use crate::report::{ConformanceReport, TestResult};
use crate::Samples;

const VALIDATOR: &str = "engine/inventory";

/// Expected catalog size.
pub const EXPECTED_PATTERNS: usize = 9;
/// Candidate internal assignments per leg assignment, flow channels in counter order.
pub const EXPECTED_CANDIDATES: [usize; 5] = [4096, 64, 4096, 4096, 4096];
/// Reference term counts, flow channels in counter order.
pub const EXPECTED_TERMS: [usize; 5] = [4096, 1024, 4096, 4096, 4096];
/// Text of the all-identity s-channel term.
pub const GOLDEN_TERM: &str = " -Ch1A1_00*Ch1A2_00";
/// Leading u-channel terms of `(mu, nu) = (1, 0)` for legs `(0, 0)` and `(0, 1)`.
pub const GOLDEN_U_TERMS: [&str; 2] = [" -Ch5A1_00*Ch5A2_10", " +Ch5A1_00*Ch5A2_00"];
/// Reference spin-correlation output for `(mu, nu) = (2, 1)` with both restrictions.
pub const REFERENCE_SPIN: &str = "First terms(includes summation over lattice sites): \n\
    (+ga0*(+gb2_0*(+ga2_0*(+gb0*(+G21)))))\n\
    Second terms: \n\
    (+ga0*(+gb2_0*(+ga2_0*(+gb0*(+G03+G12+G21-G30)))))\n\
    Terms quadratic in propagators: \n\
    \n";

/// Validates catalog shape and reference counts.
pub fn validate(samples: &Samples) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    validate_catalog(&mut report);
    validate_reference_counts(&mut report, samples);
    validate_structure(&mut report, samples);
    validate_golden_term(&mut report, samples);
    validate_reference_phases(&mut report, samples);
    validate_reference_spin(&mut report, samples);
    report
}

fn validate_catalog(report: &mut ConformanceReport) {
    let catalog = Catalog::full();
    check_count(
        report,
        "patterns",
        catalog.patterns.len(),
        EXPECTED_PATTERNS,
    );

    let malformed: Vec<String> = catalog
        .patterns
        .iter()
        .filter_map(|p| check_pattern(p).err().map(|e| e.to_string()))
        .collect();
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Every pattern references only the indices it declares",
        "Malformed patterns",
        malformed,
    ));

    for (channel, expected) in Channel::FLOW.iter().zip(EXPECTED_CANDIDATES) {
        let actual = catalog
            .find(*channel)
            .map(|p| p.candidate_count())
            .unwrap_or_default();
        check_count(report, &format!("{channel} candidate"), actual, expected);
    }
}

fn validate_reference_counts(report: &mut ConformanceReport, samples: &Samples) {
    let counts = samples.none.report.flow_counts();
    for ((channel, actual), expected) in Channel::FLOW.iter().zip(counts).zip(EXPECTED_TERMS) {
        check_count(report, &format!("{channel} term"), actual, expected);
    }
}

fn validate_structure(report: &mut ConformanceReport, samples: &Samples) {
    let mut violations = Vec::new();
    for (name, output) in samples.flows() {
        let leg_grouped = [
            (Channel::S, &output.s),
            (Channel::TLeft, &output.t_left),
            (Channel::TRight, &output.t_right),
            (Channel::U, &output.u),
        ];
        for (channel, exprs) in leg_grouped {
            let total: usize = exprs.iter().map(Expression::term_count).sum();
            if exprs.len() != 16 || total != output.report.count(channel) {
                violations.push(format!(
                    "{name}/{channel}: {} expressions, {total} terms, report says {}",
                    exprs.len(),
                    output.report.count(channel)
                ));
            }
        }
        let rpa: usize = output.rpa.iter().map(RpaSum::term_count).sum();
        if output.rpa.len() != 16 || rpa != output.report.count(Channel::Rpa) {
            violations.push(format!(
                "{name}/rpa: {} sums, {rpa} terms, report says {}",
                output.rpa.len(),
                output.report.count(Channel::Rpa)
            ));
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Reported counts cover all 16 (mu, nu) and match the structured output",
        "Reported counts disagree with the structured output",
        violations,
    ));
}

fn validate_golden_term(report: &mut ConformanceReport, samples: &Samples) {
    let term = samples
        .none
        .s
        .first()
        .and_then(|e| e.groups.first())
        .and_then(|g| g.terms.first());
    let (Some(term), Some(pattern)) = (term, Catalog::full().find(Channel::S)) else {
        report.push(TestResult::fail(VALIDATOR, "No s-channel term for (mu, nu) = (0, 0)"));
        return;
    };
    let notation = Notation::Flow {
        style: OperandStyle::Abstract,
        two_loop: false,
        sublattice: 1,
    };
    let text = emit(pattern, term, &notation);
    let operands = operand_indices(pattern, term);
    let mut violations = Vec::new();
    if term.phase != Phase::MinusOne {
        violations.push(format!("phase {}, expected -1", term.phase));
    }
    if operands != [[0, 0], [0, 0]] {
        violations.push(format!("operands {operands:?}, expected [[0, 0], [0, 0]]"));
    }
    if text != GOLDEN_TERM {
        violations.push(format!("text {text:?}, expected {GOLDEN_TERM:?}"));
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("Golden s-channel term {GOLDEN_TERM:?}"),
        "Golden s-channel term differs",
        violations,
    ));
}

fn validate_reference_phases(report: &mut ConformanceReport, samples: &Samples) {
    let notation = Notation::Flow {
        style: OperandStyle::Abstract,
        two_loop: false,
        sublattice: 1,
    };
    let mut violations = Vec::new();
    let u = samples.none.u.iter().find(|e| (e.mu, e.nu) == (1, 0));
    let leading = u.map(|e| {
        e.groups
            .iter()
            .take(2)
            .filter_map(|g| g.terms.first())
            .collect::<Vec<&Term>>()
    });
    match (leading, Catalog::full().find(Channel::U)) {
        (Some(terms), Some(pattern)) => {
            let texts: Vec<String> = terms.iter().map(|t| emit(pattern, t, &notation)).collect();
            if texts != GOLDEN_U_TERMS {
                violations.push(format!(
                    "u (1, 0) leading terms {texts:?}, expected {GOLDEN_U_TERMS:?}"
                ));
            }
        }
        _ => violations.push("no u-channel expression for (mu, nu) = (1, 0)".to_owned()),
    }

    let output = &samples.none;
    let leg_grouped = output
        .s
        .iter()
        .chain(&output.t_left)
        .chain(&output.t_right)
        .chain(&output.u)
        .chain(&output.schwinger_dyson);
    let rpa = output
        .rpa
        .iter()
        .flat_map(|sum| &sum.parts)
        .flat_map(|p| &p.terms);
    let imaginary = leg_grouped
        .flat_map(|e| e.terms().map(move |t| (e.channel, t)))
        .chain(rpa.map(|t| (Channel::Rpa, t)))
        .filter(|(_, t)| matches!(t.phase, Phase::PlusI | Phase::MinusI))
        .count();
    if imaginary > 0 {
        violations.push(format!("{imaginary} reference terms carry an imaginary phase"));
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Reference phases are real and the u channel flips sign for unequal legs",
        "Reference phase conventions differ",
        violations,
    ));
}

fn validate_reference_spin(report: &mut ConformanceReport, samples: &Samples) {
    let text = render_spin(&samples.spin_full);
    if text == REFERENCE_SPIN {
        report.push(TestResult::pass(VALIDATOR, "Reference spin-correlation output reproduced"));
    } else {
        report.push(TestResult::fail_with_details(
            VALIDATOR,
            "Reference spin-correlation output differs",
            text.lines().map(str::to_owned).collect(),
        ));
    }
}

fn check_count(report: &mut ConformanceReport, label: &str, actual: usize, expected: usize) {
    if actual == expected {
        report.push(TestResult::pass(VALIDATOR, format!("Correct {label} count: {actual}")));
    } else {
        report.push(TestResult::fail(
            VALIDATOR,
            format!("Wrong {label} count: expected {expected}, got {actual}"),
        ));
    }
}
