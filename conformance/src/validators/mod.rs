//! Validators for the generator's testable properties.
//!
//! Each validator inspects the [`Samples`](crate::Samples) generated once
//! per run and returns its own [`ConformanceReport`](crate::ConformanceReport).

pub mod algebra;
pub mod closure;
pub mod determinism;
pub mod inventory;
pub mod symmetry;
pub mod templates;

use pffrg_algebra::Channel;
use pffrg_codegen::{FlowOutput, SpinOutput, Term};

/// Details listed per failing check before the rest are summarized.
pub(crate) const MAX_DETAILS: usize = 10;

/// Every term of a flow-equation run, grouped by the channel that emitted it.
pub(crate) fn flow_terms(output: &FlowOutput) -> Vec<(Channel, Vec<&Term>)> {
    let leg_grouped = [
        (Channel::SchwingerDyson, &output.schwinger_dyson),
        (Channel::S, &output.s),
        (Channel::TLeft, &output.t_left),
        (Channel::TRight, &output.t_right),
        (Channel::U, &output.u),
    ];
    let mut out: Vec<(Channel, Vec<&Term>)> = leg_grouped
        .into_iter()
        .map(|(channel, exprs)| (channel, exprs.iter().flat_map(|e| e.terms()).collect()))
        .collect();
    let rpa = output
        .rpa
        .iter()
        .flat_map(|sum| sum.parts.iter())
        .flat_map(|part| part.terms.iter())
        .collect();
    out.insert(2, (Channel::Rpa, rpa));
    out
}

/// Every term of a spin-correlation run, grouped by expression.
pub(crate) fn spin_terms(output: &SpinOutput) -> Vec<(Channel, Vec<&Term>)> {
    [&output.first, &output.second, &output.quadratic]
        .into_iter()
        .map(|e| (e.channel, e.terms().collect()))
        .collect()
}

/// Truncates a violation list to [`MAX_DETAILS`] entries plus a tally line.
pub(crate) fn truncate(mut violations: Vec<String>) -> Vec<String> {
    if violations.len() > MAX_DETAILS {
        let rest = violations.len() - MAX_DETAILS;
        violations.truncate(MAX_DETAILS);
        violations.push(format!("... and {rest} more"));
    }
    violations
}
