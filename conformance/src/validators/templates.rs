//! Output-template validator.
//!
//! Renders the sampled runs and checks every line against the templates the
//! downstream solver parses:
//! - each flow line is a header, an `addG`, a `double t..` or a count line
//! - parentheses and square brackets balance on every line
//! - one `addG` line per permitted `(mu, nu)` in each of channels 0, 2 and 4
//! - sixteen RPA lines regardless of restrictions
//! - the count lines repeat the report
//! - the spin output has its three headers in order

use regex::Regex;

use pffrg_codegen::render::{render_flow, render_spin};
use pffrg_codegen::{FlowOutput, SpinOutput};

use super::truncate;
use crate::report::{ConformanceReport, TestResult};
use crate::Samples;

const VALIDATOR: &str = "output/templates";

const FLOW_LINES: [&str; 7] = [
    r"^$",
    r"^SDE terms : $",
    r"^(0|z)-component: BV\*\(.*\)\*weight2\*weight3$",
    r"^Channel no [024]: $",
    r"^addG\(\( .*\)/\(2\*pi\) , DG_vec,1,[0-3],[0-3], R, ns,nt,nu\);$",
    r"^double t[0-3]{2}i[0-2] = .+;$",
    r"^Number of terms in channel [0-4]: [0-9]+$",
];

const SPIN_HEADERS: [&str; 3] = [
    "First terms(includes summation over lattice sites): ",
    "Second terms: ",
    "Terms quadratic in propagators: ",
];

/// Validates the rendered text of every sampled run.
pub fn validate(samples: &Samples) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let compiled: Result<Vec<Regex>, _> = FLOW_LINES.iter().map(|p| Regex::new(p)).collect();
    let templates = match compiled {
        Ok(templates) => templates,
        Err(e) => {
            report.push(TestResult::fail(VALIDATOR, format!("Invalid line template: {e}")));
            return report;
        }
    };
    for (name, output) in samples.flows() {
        check_flow(&mut report, name, output, &templates);
    }
    for (name, output) in samples.spins() {
        check_spin(&mut report, name, output);
    }
    report
}

fn balanced(line: &str) -> bool {
    let mut depth = [0i64; 2];
    for ch in line.chars() {
        match ch {
            '(' => depth[0] += 1,
            ')' => depth[0] -= 1,
            '[' => depth[1] += 1,
            ']' => depth[1] -= 1,
            _ => continue,
        }
        if depth.iter().any(|d| *d < 0) {
            return false;
        }
    }
    depth == [0, 0]
}

fn check_flow(
    report: &mut ConformanceReport,
    name: &str,
    output: &FlowOutput,
    templates: &[Regex],
) {
    let text = render_flow(output);
    let lines: Vec<&str> = text.lines().collect();

    let mut violations = Vec::new();
    for (n, line) in lines.iter().enumerate() {
        if !templates.iter().any(|t| t.is_match(line)) {
            violations.push(format!("line {}: no template matches {}", n + 1, preview(line)));
        } else if !balanced(line) {
            violations.push(format!("line {}: unbalanced brackets in {}", n + 1, preview(line)));
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{name}: {} flow lines match their templates", lines.len()),
        format!("{name}: {} flow lines off template", violations.len()),
        truncate(violations),
    ));

    let symmetry = output.config.symmetry;
    let permitted = (0..4)
        .flat_map(|mu| (0..4).map(move |nu| (mu, nu)))
        .filter(|&(mu, nu)| symmetry.permits_pair(mu, nu))
        .count();
    let add_g = lines.iter().filter(|l| l.starts_with("addG((")).count();
    let rpa = lines.iter().filter(|l| l.starts_with("double t")).count();
    let mut violations = Vec::new();
    if add_g != 3 * permitted {
        violations.push(format!("{add_g} addG lines, expected {}", 3 * permitted));
    }
    if rpa != 16 {
        violations.push(format!("{rpa} RPA lines, expected 16"));
    }
    for (i, count) in output.report.flow_counts().iter().enumerate() {
        let expected = format!("Number of terms in channel {i}: {count}");
        if !lines.contains(&expected.as_str()) {
            violations.push(format!("missing {expected:?}"));
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{name}: {add_g} addG lines for {permitted} permitted pairs, 16 RPA lines, counts repeated"),
        format!("{name}: flow line inventory differs"),
        violations,
    ));
}

fn check_spin(report: &mut ConformanceReport, name: &str, output: &SpinOutput) {
    let text = render_spin(output);
    let lines: Vec<&str> = text.lines().collect();
    let mut violations = Vec::new();
    if lines.len() != 6 {
        violations.push(format!("{} lines, expected 6", lines.len()));
    }
    for (i, header) in SPIN_HEADERS.iter().enumerate() {
        if lines.get(2 * i) != Some(header) {
            violations.push(format!("line {} is not {header:?}", 2 * i + 1));
        }
        match lines.get(2 * i + 1) {
            Some(body) if balanced(body) => {}
            Some(body) => violations.push(format!("unbalanced brackets in {}", preview(body))),
            None => violations.push(format!("no body after {header:?}")),
        }
    }
    report.push(TestResult::from_violations(
        VALIDATOR,
        format!("{name}: spin output has its three sections"),
        format!("{name}: spin output off template"),
        violations,
    ));
}

fn preview(line: &str) -> String {
    let head: String = line.chars().take(60).collect();
    if head.len() < line.len() {
        format!("{head:?}...")
    } else {
        format!("{head:?}")
    }
}
