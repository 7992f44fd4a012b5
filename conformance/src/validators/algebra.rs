//! Structure-constant validator.
//!
//! Checks the Pauli-algebra table against its defining properties:
//! - `σ^0` is a two-sided unit and every generator squares to it
//! - for fixed `(i, j)` exactly one `k`, namely `i XOR j`, is nonzero
//! - the reference entries `β^{00}_0 = 1` and `β^{xy}_z = i`
//! - products of any two entries stay in `{0, ±1, ±i}`
//! - the reduced-rotation rule admits a fixed set of index pairs

use pffrg_algebra::model::{I, ONE, RANK, ZERO};
use pffrg_algebra::symmetry::rotation_pair;
use pffrg_algebra::table::{is_admissible, lookup};

use super::truncate;
use crate::report::{ConformanceReport, TestResult};

const VALIDATOR: &str = "algebra/table";

/// Pairs admitted by the reduced-rotation rule.
pub const EXPECTED_ROTATION_PAIRS: usize = 8;

/// Validates the structure-constant table.
pub fn validate() -> ConformanceReport {
    let mut report = ConformanceReport::new();
    check_unit(&mut report);
    check_support(&mut report);
    check_reference_entries(&mut report);
    check_product_closure(&mut report);
    check_rotation_pairs(&mut report);
    report
}

fn indices() -> impl Iterator<Item = (usize, usize)> {
    (0..RANK).flat_map(|i| (0..RANK).map(move |j| (i, j)))
}

fn check_unit(report: &mut ConformanceReport) {
    let mut violations = Vec::new();
    for k in 0..RANK {
        if lookup(0, k, k) != ONE || lookup(k, 0, k) != ONE {
            violations.push(format!("sigma^0 is not a unit on sigma^{k}"));
        }
        if lookup(k, k, 0) != ONE {
            violations.push(format!("sigma^{k} does not square to sigma^0"));
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Identity is a two-sided unit and every generator squares to it",
        "Unit or square law violated",
        violations,
    ));
}

fn check_support(report: &mut ConformanceReport) {
    let mut violations = Vec::new();
    for (i, j) in indices() {
        let support: Vec<usize> = (0..RANK).filter(|&k| lookup(i, j, k) != ZERO).collect();
        if support != [i ^ j] {
            violations.push(format!(
                "beta[{i}][{j}] supported on {support:?}, expected [{}]",
                i ^ j
            ));
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Every product has a single nonzero component at i XOR j",
        "Products with wrong support",
        truncate(violations),
    ));
}

fn check_reference_entries(report: &mut ConformanceReport) {
    let mut violations = Vec::new();
    if lookup(0, 0, 0) != ONE {
        violations.push(format!("beta[0][0][0] = {}, expected 1", lookup(0, 0, 0)));
    }
    if lookup(1, 2, 3) != I {
        violations.push(format!("beta[1][2][3] = {}, expected i", lookup(1, 2, 3)));
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Reference entries beta[0][0][0] = 1 and beta[1][2][3] = i",
        "Reference entries differ",
        violations,
    ));
}

fn check_product_closure(report: &mut ConformanceReport) {
    let entries: Vec<_> = indices()
        .flat_map(|(i, j)| (0..RANK).map(move |k| lookup(i, j, k)))
        .collect();
    let mut violations = Vec::new();
    if let Some(bad) = entries.iter().find(|c| !is_admissible(**c)) {
        violations.push(format!("entry {bad} outside {{0, ±1, ±i}}"));
    }
    for a in &entries {
        for b in &entries {
            let product = a * b;
            if !is_admissible(product) {
                violations.push(format!("{a} * {b} = {product}"));
            }
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!(
            "All {} pairwise entry products stay in {{0, ±1, ±i}}",
            entries.len().pow(2)
        ),
        "Entry products leave the admissible set",
        truncate(violations),
    ));
}

fn check_rotation_pairs(report: &mut ConformanceReport) {
    let admitted: Vec<(usize, usize)> = indices().filter(|&(x, y)| rotation_pair(x, y)).collect();
    let symmetric = admitted.iter().all(|&(x, y)| rotation_pair(y, x));
    if admitted.len() == EXPECTED_ROTATION_PAIRS && symmetric {
        report.push(TestResult::pass(
            "algebra/rotation",
            format!(
                "Reduced-rotation rule admits {} of 16 index pairs",
                admitted.len()
            ),
        ));
    } else {
        report.push(TestResult::fail_with_details(
            "algebra/rotation",
            format!(
                "Reduced-rotation rule admits {} pairs (expected {EXPECTED_ROTATION_PAIRS}, symmetric: {symmetric})",
                admitted.len()
            ),
            admitted.iter().map(|p| format!("{p:?}")).collect(),
        ));
    }
}
