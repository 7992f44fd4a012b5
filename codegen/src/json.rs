//! Structured JSON output.
//!
//! Serializes the symbolic model (leg groups, terms, counts) independently
//! of the text templates. Each term carries its phase, the resolved operand
//! index pairs and, for convenience, its rendered text.

use serde_json::{json, Map, Value};

use pffrg_algebra::{Catalog, Channel, ContractionPattern, Symmetry};

use crate::aggregate::{Expression, LegGroup, RpaSum};
use crate::config::OperandStyle;
use crate::emit::{emit, operand_indices, Notation};
use crate::evaluate::{EvaluationStats, Term};
use crate::{FlowOutput, GenerationReport, SpinOutput};

/// Serializes a flow-equation run.
#[must_use]
pub fn flow_to_json(output: &FlowOutput) -> Value {
    let config = &output.config;
    let notation = Notation::Flow {
        style: config.style,
        two_loop: config.two_loop,
        sublattice: config.sublattice,
    };
    let style = match config.style {
        OperandStyle::Abstract => "abstract",
        OperandStyle::Interpolated => "interpolated",
    };
    let expressions = |exprs: &[Expression]| -> Value {
        Value::Array(exprs.iter().map(|e| expression(e, &notation)).collect())
    };
    let rpa: Vec<Value> = output.rpa.iter().map(|s| rpa_sum(s, &notation)).collect();
    json!({
        "config": {
            "symmetry": symmetry(config.symmetry),
            "style": style,
            "twoLoop": config.two_loop,
            "sublattice": config.sublattice
        },
        "schwingerDyson": expressions(&output.schwinger_dyson),
        "channels": {
            "s": expressions(&output.s),
            "rpa": rpa,
            "t-left": expressions(&output.t_left),
            "t-right": expressions(&output.t_right),
            "u": expressions(&output.u)
        },
        "report": report(&output.report)
    })
}

/// Serializes a spin-correlation run.
#[must_use]
pub fn spin_to_json(output: &SpinOutput) -> Value {
    let config = &output.config;
    let notation = Notation::Spin {
        simplified: config.simplified,
    };
    json!({
        "config": {
            "symmetry": symmetry(config.symmetry),
            "simplified": config.simplified,
            "mu": config.mu,
            "nu": config.nu
        },
        "first": expression(&output.first, &notation),
        "second": expression(&output.second, &notation),
        "quadratic": expression(&output.quadratic, &notation),
        "report": report(&output.report)
    })
}

fn symmetry(s: Symmetry) -> Value {
    json!({
        "reducedRotation": s.reduced_rotation,
        "timeReversal": s.time_reversal
    })
}

fn report(r: &GenerationReport) -> Value {
    let mut terms = Map::new();
    for (channel, count) in &r.terms {
        terms.insert(channel.as_str().to_owned(), json!(count));
    }
    json!({
        "terms": terms,
        "flowCounts": r.flow_counts(),
        "stats": stats(&r.stats)
    })
}

fn stats(s: &EvaluationStats) -> Value {
    json!({
        "candidates": s.candidates,
        "filtered": s.filtered,
        "dropped": s.dropped,
        "terms": s.terms
    })
}

fn pattern(channel: Channel) -> Option<&'static ContractionPattern> {
    Catalog::full().find(channel)
}

fn term(pattern: Option<&ContractionPattern>, t: &Term, notation: &Notation) -> Value {
    let (operands, text) = match pattern {
        Some(p) => (operand_indices(p, t), emit(p, t, notation)),
        None => (Vec::new(), String::new()),
    };
    json!({
        "phase": t.phase.as_str(),
        "product": t.product,
        "operands": operands,
        "text": text
    })
}

fn group(pattern: Option<&ContractionPattern>, g: &LegGroup, notation: &Notation) -> Value {
    let terms: Vec<Value> = g.terms.iter().map(|t| term(pattern, t, notation)).collect();
    json!({
        "legs": g.legs.ordinals(),
        "components": g.legs.components(),
        "terms": terms
    })
}

fn expression(e: &Expression, notation: &Notation) -> Value {
    let p = pattern(e.channel);
    let groups: Vec<Value> = e.groups.iter().map(|g| group(p, g, notation)).collect();
    json!({
        "channel": e.channel.as_str(),
        "mu": e.mu,
        "nu": e.nu,
        "termCount": e.term_count(),
        "groups": groups
    })
}

fn rpa_sum(s: &RpaSum, notation: &Notation) -> Value {
    let p = pattern(Channel::Rpa);
    let parts: Vec<Value> = s
        .parts
        .iter()
        .map(|part| {
            let terms: Vec<Value> = part.terms.iter().map(|t| term(p, t, notation)).collect();
            json!({
                "b": part.b,
                "c": part.c,
                "vertexIndex": part.vertex_index,
                "terms": terms
            })
        })
        .collect();
    json!({
        "mu": s.mu,
        "nu": s.nu,
        "termCount": s.term_count(),
        "parts": parts
    })
}
