//! Text rendering.
//!
//! Renders aggregated expressions as the literal source fragments the
//! downstream solver pastes in. Only this module knows the line templates;
//! everything upstream works on structured terms.

use std::fmt::Write as FmtWrite;

use pffrg_algebra::symmetry::Z;
use pffrg_algebra::{Catalog, Channel, ContractionPattern};

use crate::aggregate::{Expression, LegGroup, RpaSum};
use crate::emit::{emit, Notation};
use crate::mapping::{
    operand_notation, vertex_product_offset, SDE_LABELS, SDE_LEG_SYMBOLS, SPIN_LEG_FREQUENCIES,
    SPIN_LEG_SYMBOLS,
};
use crate::{FlowOutput, SpinOutput};

/// Tail shared by every `addG` line.
const ADD_G_TAIL: &str = ", R, ns,nt,nu);";

fn pattern(channel: Channel) -> Option<&'static ContractionPattern> {
    Catalog::full().find(channel)
}

fn join_terms(pattern: &ContractionPattern, group: &LegGroup, notation: &Notation) -> String {
    group
        .terms
        .iter()
        .map(|t| emit(pattern, t, notation))
        .collect()
}

fn join_groups(pattern: &ContractionPattern, groups: &[LegGroup], notation: &Notation) -> String {
    groups
        .iter()
        .map(|g| join_terms(pattern, g, notation))
        .collect()
}

/// Renders a leg-grouped flow expression as `+(<terms>)*<suffix><A><B>`
/// per nonempty group. Returns an empty string when no group holds a term.
#[must_use]
pub fn flow_expression(expr: &Expression, notation: &Notation) -> String {
    let (Some(p), Some(n)) = (pattern(expr.channel), operand_notation(expr.channel)) else {
        return String::new();
    };
    let mut out = String::new();
    for group in expr.groups.iter().filter(|g| !g.terms.is_empty()) {
        let _ = write!(
            out,
            "+({})*{}",
            join_terms(p, group, notation),
            n.group_suffix
        );
        for ordinal in group.legs.ordinals() {
            let _ = write!(out, "{ordinal}");
        }
    }
    out
}

/// Renders the right-hand side of one `t<mu><nu>` line.
///
/// Each nonempty `(b, c)` part becomes ` +(<terms>)*vertexProduct[...]`;
/// a sum without terms renders as `0`.
#[must_use]
pub fn rpa_sum(sum: &RpaSum, notation: &Notation, sublattice: u8) -> String {
    let Some(p) = pattern(Channel::Rpa) else {
        return "0".to_owned();
    };
    let offset = vertex_product_offset(sublattice);
    let mut out = String::new();
    for part in sum.parts.iter().filter(|part| !part.terms.is_empty()) {
        let terms: String = part.terms.iter().map(|t| emit(p, t, notation)).collect();
        let _ = write!(
            out,
            " +({terms})*vertexProduct[{offset}{}]",
            part.vertex_index
        );
    }
    if out.is_empty() {
        out.push('0');
    }
    out
}

/// Renders one Schwinger–Dyson component as
/// `BV*(+(+(+(<terms>)*PrC_<C>)*PrB_<B>)*PrA_<A>...)*weight2*weight3`.
///
/// Nesting levels without terms are omitted.
#[must_use]
pub fn schwinger_dyson(expr: &Expression, notation: &Notation) -> String {
    let Some(p) = pattern(Channel::SchwingerDyson) else {
        return String::new();
    };
    let inner = nest_omitting(p, &expr.groups, 0, notation);
    format!("BV*({inner})*weight2*weight3")
}

fn nest_omitting(
    pattern: &ContractionPattern,
    groups: &[LegGroup],
    depth: usize,
    notation: &Notation,
) -> String {
    let symbol = match SDE_LEG_SYMBOLS.get(depth) {
        Some(symbol) if depth < pattern.legs.len() => symbol,
        _ => return join_groups(pattern, groups, notation),
    };
    let mut out = String::new();
    for chunk in groups.chunk_by(|a, b| a.legs.ordinals[depth] == b.legs.ordinals[depth]) {
        let inner = nest_omitting(pattern, chunk, depth + 1, notation);
        if !inner.is_empty() {
            let _ = write!(out, "+({inner})*{symbol}{}", chunk[0].legs.ordinals[depth]);
        }
    }
    out
}

/// Renders a first- or second-term spin-correlation expression as nested
/// brackets over the legs `a, b, c, d`.
///
/// Every level is written, with or without terms. Expanded levels name the
/// leg component as `iGLam(0, ..)` for the identity and `iGLam(1, ..)` for z
/// under every symmetry; [`SpinConfig::validate`](crate::SpinConfig::validate)
/// rejects expanded output when x or y can occur.
#[must_use]
pub fn spin_nested(expr: &Expression, simplified: bool) -> String {
    let Some(p) = pattern(expr.channel) else {
        return String::new();
    };
    let notation = Notation::Spin { simplified };
    format!("({})", nest_all(p, &expr.groups, 0, &notation, simplified))
}

/// Writes one bracket level per leg. The `iGLam` index is `component / Z`,
/// so the identity is 0 and z is 1 whatever the symmetry.
fn nest_all(
    pattern: &ContractionPattern,
    groups: &[LegGroup],
    depth: usize,
    notation: &Notation,
    simplified: bool,
) -> String {
    if depth >= pattern.legs.len().min(SPIN_LEG_SYMBOLS.len()) {
        return join_groups(pattern, groups, notation);
    }
    let mut out = String::new();
    for chunk in groups.chunk_by(|a, b| a.legs.ordinals[depth] == b.legs.ordinals[depth]) {
        let legs = &chunk[0].legs;
        if simplified {
            let _ = write!(
                out,
                "+{}{}*(",
                SPIN_LEG_SYMBOLS[depth], legs.components[depth]
            );
        } else {
            let _ = write!(
                out,
                "+iGLam({},{},G_vec)*(",
                legs.components[depth] / Z,
                SPIN_LEG_FREQUENCIES[depth]
            );
        }
        out.push_str(&nest_all(pattern, chunk, depth + 1, notation, simplified));
        out.push(')');
    }
    out
}

/// Renders the flat sum of spin-correlation terms quadratic in propagators.
#[must_use]
pub fn spin_quadratic(expr: &Expression) -> String {
    let Some(p) = pattern(Channel::SpinQuadratic) else {
        return String::new();
    };
    let notation = Notation::Spin { simplified: true };
    expr.terms().map(|t| emit(p, t, &notation)).collect()
}

/// Renders the complete flow-equation program output.
#[must_use]
pub fn render_flow(output: &FlowOutput) -> String {
    let config = &output.config;
    let notation = Notation::Flow {
        style: config.style,
        two_loop: config.two_loop,
        sublattice: config.sublattice,
    };
    let permitted = |e: &&Expression| config.symmetry.permits_pair(e.mu, e.nu);
    let mut out = String::new();

    let _ = writeln!(out, "SDE terms : ");
    for (label, expr) in SDE_LABELS.iter().zip(&output.schwinger_dyson) {
        let _ = writeln!(out, "{label}: {}", schwinger_dyson(expr, &notation));
    }
    out.push('\n');

    let _ = writeln!(out, "Channel no 0: ");
    for expr in output.s.iter().filter(permitted) {
        let _ = writeln!(
            out,
            "addG(( {})/(2*pi) , DG_vec,1,{},{}{ADD_G_TAIL}",
            or_zero(flow_expression(expr, &notation)),
            expr.mu,
            expr.nu
        );
    }
    out.push('\n');

    for sum in &output.rpa {
        let _ = writeln!(
            out,
            "double t{}{}i{} = {};",
            sum.mu,
            sum.nu,
            config.sublattice,
            rpa_sum(sum, &notation, config.sublattice)
        );
    }
    out.push_str("\n\n");

    let _ = writeln!(out, "Channel no 2: ");
    let t_pairs = output.t_left.iter().zip(&output.t_right);
    for (left, right) in t_pairs.filter(|(l, _)| permitted(l)) {
        let _ = writeln!(
            out,
            "addG(( 2*t{mu}{nu} {}{})/(2*pi) , DG_vec,1,{mu},{nu}{ADD_G_TAIL}",
            flow_expression(left, &notation),
            flow_expression(right, &notation),
            mu = left.mu,
            nu = left.nu
        );
    }
    out.push('\n');

    let _ = writeln!(out, "Channel no 4: ");
    for expr in output.u.iter().filter(permitted) {
        let _ = writeln!(
            out,
            "addG(( {})/(2*pi) , DG_vec,1,{},{}{ADD_G_TAIL}",
            or_zero(flow_expression(expr, &notation)),
            expr.mu,
            expr.nu
        );
    }
    out.push('\n');

    for (i, count) in output.report.flow_counts().iter().enumerate() {
        let _ = writeln!(out, "Number of terms in channel {i}: {count}");
    }
    out
}

/// Renders the complete spin-correlation program output.
#[must_use]
pub fn render_spin(output: &SpinOutput) -> String {
    let simplified = output.config.simplified;
    let mut out = String::new();
    let _ = writeln!(out, "First terms(includes summation over lattice sites): ");
    let _ = writeln!(out, "{}", spin_nested(&output.first, simplified));
    let _ = writeln!(out, "Second terms: ");
    let _ = writeln!(out, "{}", spin_nested(&output.second, simplified));
    let _ = writeln!(out, "Terms quadratic in propagators: ");
    let _ = writeln!(out, "{}", spin_quadratic(&output.quadratic));
    out
}

fn or_zero(expr: String) -> String {
    if expr.is_empty() {
        "0".to_owned()
    } else {
        expr
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::aggregate::collect_legs;
    use crate::config::OperandStyle;
    use crate::evaluate::{EvaluationStats, Evaluator};
    use pffrg_algebra::{channels, Symmetry};

    const ABSTRACT: Notation = Notation::Flow {
        style: OperandStyle::Abstract,
        two_loop: false,
        sublattice: 1,
    };

    fn expression(
        pattern: &ContractionPattern,
        symmetry: Symmetry,
        mu: usize,
        nu: usize,
    ) -> Expression {
        let eval = Evaluator::new(pattern, symmetry).unwrap();
        collect_legs(&eval, mu, nu, &mut EvaluationStats::default()).unwrap()
    }

    #[test]
    fn s_expression_opens_with_golden_term() {
        let expr = expression(&channels::s::PATTERN, Symmetry::NONE, 0, 0);
        let text = flow_expression(&expr, &ABSTRACT);
        assert!(text.starts_with("+( -Ch1A1_00*Ch1A2_00"), "{text}");
        assert!(text.ends_with(")*Pt33"), "{text}");
        assert_eq!(text.matches(")*Pt").count(), 16);
    }

    #[test]
    fn empty_groups_are_omitted() {
        let mut expr = expression(&channels::u::PATTERN, Symmetry::NONE, 0, 0);
        for group in expr.groups.iter_mut().skip(1) {
            group.terms.clear();
        }
        let text = flow_expression(&expr, &ABSTRACT);
        assert!(text.ends_with(")*Pt00"), "{text}");
        assert_eq!(text.matches("+(").count(), 1);

        for group in &mut expr.groups {
            group.terms.clear();
        }
        assert_eq!(flow_expression(&expr, &ABSTRACT), "");
        assert_eq!(or_zero(flow_expression(&expr, &ABSTRACT)), "0");
    }

    #[test]
    fn rotation_suffixes_use_ordinals() {
        let rotation = Symmetry {
            reduced_rotation: true,
            time_reversal: false,
        };
        let expr = expression(&channels::t_left::PATTERN, rotation, 0, 0);
        let text = flow_expression(&expr, &ABSTRACT);
        assert!(!text.contains("Pt3_3"), "{text}");
        assert!(text.contains(")*Pt3_1"), "{text}");
    }

    #[test]
    fn schwinger_dyson_brackets_balance() {
        let expr = expression(&channels::schwinger_dyson::PATTERN, Symmetry::NONE, 0, 0);
        let text = schwinger_dyson(&expr, &ABSTRACT);
        assert!(text.starts_with("BV*(+(+(+("), "{text}");
        assert!(text.ends_with(")*weight2*weight3"), "{text}");
        assert_eq!(text.matches('(').count(), text.matches(')').count());
        assert!(text.contains("FV1_") && text.contains("FV2_"));
    }

    #[test]
    fn spin_nesting_is_complete_under_time_reversal() {
        let expr = expression(&channels::spin::FIRST, Symmetry::FULL, 2, 1);
        let text = spin_nested(&expr, true);
        assert!(text.starts_with("(+ga0*(+gb2_0*(+ga2_0*(+gb0*("), "{text}");
        assert!(text.ends_with(")))))"), "{text}");

        let expanded = spin_nested(&expr, false);
        assert!(
            expanded.starts_with("(+iGLam(0,w,G_vec)*(+iGLam(0,w2,G_vec)*(+iGLam(0,w,G_vec)*(+iGLam(0,w2,G_vec)*("),
            "{expanded}"
        );
    }

    #[test]
    fn expanded_spin_indexes_z_as_one() {
        let rotation = Symmetry {
            reduced_rotation: true,
            time_reversal: false,
        };
        let expr = expression(&channels::spin::FIRST, rotation, 2, 1);
        let expanded = spin_nested(&expr, false);
        assert!(expanded.contains("+iGLam(1,w,G_vec)*("), "{expanded}");
        assert!(expanded.contains("+iGLam(1,w2,G_vec)*("), "{expanded}");
        assert!(!expanded.contains("iGLam(3,"), "{expanded}");
        assert!(!expanded.contains("iGLam(2,"), "{expanded}");
    }
}
