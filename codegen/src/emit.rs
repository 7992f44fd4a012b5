//! Term emission.
//!
//! Turns one [`Term`] into the literal text the downstream solver pastes
//! into its sources: the channel glyph for the phase followed by the
//! operand references tagged with their resolved indices.

use std::fmt::Write as FmtWrite;

use pffrg_algebra::{Channel, ContractionPattern};

use crate::config::OperandStyle;
use crate::evaluate::Term;
use crate::mapping::{glyphs, operand_notation, spin_vertex_tail, OperandNotation};

/// Notation options for emitted terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Flow-equation channels and the Schwinger–Dyson expression.
    Flow {
        /// Operand notation.
        style: OperandStyle,
        /// Emit two-loop vertex terms.
        two_loop: bool,
        /// Sublattice of the RPA propagator table.
        sublattice: u8,
    },
    /// Spin-correlation expressions.
    Spin {
        /// Abstract symbols instead of interpolation calls.
        simplified: bool,
    },
}

/// Resolves the operand index pairs of `term`'s product.
#[must_use]
pub fn operand_indices(pattern: &ContractionPattern, term: &Term) -> Vec<[usize; 2]> {
    pattern
        .products
        .get(term.product)
        .map(|p| {
            p.operands
                .iter()
                .map(|o| [term.tuple.value(o[0]), term.tuple.value(o[1])])
                .collect()
        })
        .unwrap_or_default()
}

/// Renders one term.
#[must_use]
pub fn emit(pattern: &ContractionPattern, term: &Term, notation: &Notation) -> String {
    let glyph = glyphs(pattern.channel).token(term.phase);
    let operands = operand_indices(pattern, term);
    let pair = |n: usize| operands.get(n).copied().unwrap_or_default();
    match (pattern.channel, notation) {
        (Channel::Rpa, &Notation::Flow { sublattice, .. }) => {
            let legs = term.legs.ordinals();
            let a = legs.first().copied().unwrap_or_default();
            let b = legs.get(1).copied().unwrap_or_default();
            format!("{glyph}Pt[{sublattice}][{}]", 4 * a + b)
        }
        (Channel::SchwingerDyson, _) => {
            let [b, c] = pair(0);
            format!("{glyph}FV{}_{b}{c}", term.product + 1)
        }
        (Channel::SpinFirst | Channel::SpinSecond, &Notation::Spin { simplified }) => {
            let [g, h] = pair(0);
            if simplified {
                format!("{glyph}G{g}{h}")
            } else {
                let tail = spin_vertex_tail(pattern.channel);
                format!("{glyph}getIntpolG(G_vec,1,{g},{h},{tail})")
            }
        }
        (Channel::SpinQuadratic, _) => {
            let legs = term.legs.components();
            let a = legs.first().copied().unwrap_or_default();
            let b = legs.get(1).copied().unwrap_or_default();
            format!("{glyph}ga{a}*ga{b}")
        }
        (channel, &Notation::Flow { style, two_loop, .. }) => match operand_notation(channel) {
            Some(n) => two_operands(n, glyph, pair(0), pair(1), style, two_loop),
            None => String::new(),
        },
        (_, Notation::Spin { .. }) => String::new(),
    }
}

fn two_operands(
    n: &OperandNotation,
    glyph: &str,
    x: [usize; 2],
    y: [usize; 2],
    style: OperandStyle,
    two_loop: bool,
) -> String {
    let mut out = String::new();
    match (style, two_loop) {
        (OperandStyle::Abstract, false) => {
            let _ = write!(
                out,
                "{glyph}{}{}{}*{}{}{}",
                n.symbols[0], x[0], x[1], n.symbols[1], y[0], y[1]
            );
        }
        (OperandStyle::Abstract, true) => {
            let first = format!("{}{}{}", n.symbols[0], x[0], x[1]);
            let second = format!("{}{}{}", n.symbols[1], y[0], y[1]);
            let _ = write!(out, "{glyph}{first}TL*{second}{glyph}{first}*{second}TL");
        }
        (OperandStyle::Interpolated, false) => {
            let _ = write!(
                out,
                "{glyph}{}*{}",
                interpolate("G_vec", x, None, n.tails[0]),
                interpolate("G_vec", y, None, n.tails[1])
            );
        }
        (OperandStyle::Interpolated, true) => {
            let kernels = |side: usize, idx: [usize; 2]| {
                format!(
                    "({}+{})",
                    interpolate(n.two_loop[side][0], idx, Some(0), n.tails[side]),
                    interpolate(n.two_loop[side][1], idx, Some(0), n.tails[side])
                )
            };
            let _ = write!(
                out,
                "{glyph}{}*{}{glyph}{}*{}",
                kernels(0, x),
                interpolate("G_vec", y, Some(0), n.tails[1]),
                interpolate("G_vec", x, Some(0), n.tails[0]),
                kernels(1, y)
            );
        }
    }
    out
}

fn interpolate(vertex: &str, idx: [usize; 2], order: Option<usize>, tail: &str) -> String {
    match order {
        Some(o) => format!("getIntpolG({vertex},1,{},{},{o},{tail})", idx[0], idx[1]),
        None => format!("getIntpolG({vertex},1,{},{},{tail})", idx[0], idx[1]),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::evaluate::Evaluator;
    use pffrg_algebra::{channels, Symmetry};

    const ABSTRACT: Notation = Notation::Flow {
        style: OperandStyle::Abstract,
        two_loop: false,
        sublattice: 1,
    };

    fn first_term(pattern: &ContractionPattern, mu: usize, nu: usize) -> Term {
        let eval = Evaluator::new(pattern, Symmetry::NONE).unwrap();
        eval.leg_assignments()
            .find_map(|legs| eval.terms(mu, nu, &legs).unwrap().0.first().copied())
            .unwrap()
    }

    #[test]
    fn golden_s_term() {
        let term = first_term(&channels::s::PATTERN, 0, 0);
        assert_eq!(
            emit(&channels::s::PATTERN, &term, &ABSTRACT),
            " -Ch1A1_00*Ch1A2_00"
        );
    }

    #[test]
    fn interpolated_s_term() {
        let term = first_term(&channels::s::PATTERN, 0, 0);
        let notation = Notation::Flow {
            style: OperandStyle::Interpolated,
            two_loop: false,
            sublattice: 1,
        };
        assert_eq!(
            emit(&channels::s::PATTERN, &term, &notation),
            " -getIntpolG(G_vec,1,0,0, R, ns,pw_1a,pw_1b)*getIntpolG(G_vec,1,0,0, R, ns,pw_2a,pw_2b)"
        );
    }

    #[test]
    fn two_loop_abstract_term() {
        let term = first_term(&channels::s::PATTERN, 0, 0);
        let notation = Notation::Flow {
            style: OperandStyle::Abstract,
            two_loop: true,
            sublattice: 1,
        };
        assert_eq!(
            emit(&channels::s::PATTERN, &term, &notation),
            " -Ch1A1_00TL*Ch1A2_00 -Ch1A1_00*Ch1A2_00TL"
        );
    }

    #[test]
    fn two_loop_interpolated_uses_channel_kernels() {
        let term = first_term(&channels::t_left::PATTERN, 0, 0);
        let notation = Notation::Flow {
            style: OperandStyle::Interpolated,
            two_loop: true,
            sublattice: 1,
        };
        let text = emit(&channels::t_left::PATTERN, &term, &notation);
        assert!(text.contains("(getIntpolG(DG_TwoLoop_S,1,0,"), "{text}");
        assert!(text.contains("+getIntpolG(DG_TwoLoop_U,1,0,"), "{text}");
        assert!(text.contains("+getIntpolG(DG_TwoLoop_T,1,"), "{text}");
        assert!(text.contains(",0, R0, pw_2a,pw_2b,nt)"), "{text}");
    }

    #[test]
    fn rpa_term_references_propagator_table() {
        let term = first_term(&channels::rpa::PATTERN, 0, 0);
        let text = emit(&channels::rpa::PATTERN, &term, &ABSTRACT);
        assert!(text.ends_with("Pt[1][0]"), "{text}");
    }

    #[test]
    fn spin_terms() {
        let simplified = Notation::Spin { simplified: true };
        let expanded = Notation::Spin { simplified: false };
        let first = first_term(&channels::spin::FIRST, 2, 1);
        let text = emit(&channels::spin::FIRST, &first, &simplified);
        assert!(text.contains('G') && !text.contains("getIntpolG"), "{text}");
        let text = emit(&channels::spin::FIRST, &first, &expanded);
        assert!(text.ends_with(", R, pw_wpw2,1,pw_wmw2)"), "{text}");

        let quadratic = first_term(&channels::spin::QUADRATIC, 2, 1);
        let text = emit(&channels::spin::QUADRATIC, &quadratic, &simplified);
        // b = 3 XOR a is the only partner of a = 0.
        assert!(text.ends_with("ga0*ga3"), "{text}");
    }
}
