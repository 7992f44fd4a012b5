//! Channel → text mapping tables.
//!
//! Deterministic mappings from channels to the glyphs, operand names,
//! interpolation-call tails and propagator suffixes consumed by the
//! downstream solver.

use pffrg_algebra::Channel;

use crate::normalize::Phase;

/// Glyphs printed in front of a term, indexed by [`Phase::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs(pub [&'static str; 4]);

impl Glyphs {
    /// The glyph for `phase`.
    #[must_use]
    pub fn token(&self, phase: Phase) -> &'static str {
        self.0[phase.index()]
    }
}

/// s channel.
pub const S_GLYPHS: Glyphs = Glyphs([" +", " -", "+i", "-i"]);
/// RPA channel. The glyphs carry the overall sign of the channel.
pub const RPA_GLYPHS: Glyphs = Glyphs(["-", "+", "-i*", "+i*"]);
/// t and u channels.
pub const CROSSED_GLYPHS: Glyphs = Glyphs([" +", " -", "+i*", "-i*"]);
/// Schwinger–Dyson and spin-correlation expressions.
pub const PLAIN_GLYPHS: Glyphs = Glyphs(["+", "-", "+i", "-i"]);

/// Returns the glyph table of a channel.
#[must_use]
pub fn glyphs(channel: Channel) -> &'static Glyphs {
    match channel {
        Channel::S => &S_GLYPHS,
        Channel::Rpa => &RPA_GLYPHS,
        Channel::TLeft | Channel::TRight | Channel::U => &CROSSED_GLYPHS,
        Channel::SchwingerDyson
        | Channel::SpinFirst
        | Channel::SpinSecond
        | Channel::SpinQuadratic => &PLAIN_GLYPHS,
    }
}

/// How the two vertex operands of a flow channel are named.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandNotation {
    /// Abstract symbol prefixes, e.g. `Ch1A1_`.
    pub symbols: [&'static str; 2],
    /// Argument tails of the interpolation calls, e.g. ` R, ns,pw_1a,pw_1b`.
    pub tails: [&'static str; 2],
    /// Two-loop vertex kernels summed in place of each operand.
    pub two_loop: [[&'static str; 2]; 2],
    /// Suffix prepended to the leg ordinals after each group, e.g. `Pt`.
    pub group_suffix: &'static str,
}

/// s channel.
pub const S_NOTATION: OperandNotation = OperandNotation {
    symbols: ["Ch1A1_", "Ch1A2_"],
    tails: [" R, ns,pw_1a,pw_1b", " R, ns,pw_2a,pw_2b"],
    two_loop: [
        ["DG_TwoLoop_T", "DG_TwoLoop_U"],
        ["DG_TwoLoop_T", "DG_TwoLoop_U"],
    ],
    group_suffix: "Pt",
};

/// t channel, external `mu` on the first vertex.
pub const T_LEFT_NOTATION: OperandNotation = OperandNotation {
    symbols: ["Ch3A1_", "Ch3A2_"],
    tails: [" R , pw_1a,nt,pw_1b", " R0, pw_2a,pw_2b,nt"],
    two_loop: [
        ["DG_TwoLoop_S", "DG_TwoLoop_U"],
        ["DG_TwoLoop_S", "DG_TwoLoop_T"],
    ],
    group_suffix: "Pt3_",
};

/// t channel, external `nu` on the second vertex.
pub const T_RIGHT_NOTATION: OperandNotation = OperandNotation {
    symbols: ["Ch4A1_", "Ch4A2_"],
    tails: [" R0, pw_1a,pw_1b,nt", " R , pw_2a,nt,pw_2b"],
    two_loop: [
        ["DG_TwoLoop_S", "DG_TwoLoop_T"],
        ["DG_TwoLoop_S", "DG_TwoLoop_U"],
    ],
    group_suffix: "Pt4_",
};

/// u channel.
pub const U_NOTATION: OperandNotation = OperandNotation {
    symbols: ["Ch5A1_", "Ch5A2_"],
    tails: [" R, pw_1a,pw_1b,nu", " R, pw_2a,pw_2b,nu"],
    two_loop: [
        ["DG_TwoLoop_S", "DG_TwoLoop_T"],
        ["DG_TwoLoop_S", "DG_TwoLoop_T"],
    ],
    group_suffix: "Pt",
};

/// Returns the operand notation of a flow channel with two vertex operands.
#[must_use]
pub fn operand_notation(channel: Channel) -> Option<&'static OperandNotation> {
    match channel {
        Channel::S => Some(&S_NOTATION),
        Channel::TLeft => Some(&T_LEFT_NOTATION),
        Channel::TRight => Some(&T_RIGHT_NOTATION),
        Channel::U => Some(&U_NOTATION),
        _ => None,
    }
}

/// Interpolation tail of the spin-correlation vertex for `channel`.
#[must_use]
pub fn spin_vertex_tail(channel: Channel) -> &'static str {
    match channel {
        Channel::SpinSecond => " R0, pw_wpw2,pw_wmw2,1",
        _ => " R, pw_wpw2,1,pw_wmw2",
    }
}

/// Leg prefixes of the nested spin-correlation brackets, outer to inner, in
/// simplified form.
pub const SPIN_LEG_SYMBOLS: [&str; 4] = ["ga", "gb2_", "ga2_", "gb"];

/// Frequency arguments of the expanded spin-correlation propagators, outer
/// to inner.
pub const SPIN_LEG_FREQUENCIES: [&str; 4] = ["w", "w2", "w", "w2"];

/// Propagator symbols of the Schwinger–Dyson legs, outer to inner.
pub const SDE_LEG_SYMBOLS: [&str; 3] = ["PrA_", "PrB_", "PrC_"];

/// Labels of the two Schwinger–Dyson components.
pub const SDE_LABELS: [&str; 2] = ["0-component", "z-component"];

/// Offset expression prepended to the RPA vertex-product index for a
/// sublattice.
#[must_use]
pub fn vertex_product_offset(sublattice: u8) -> &'static str {
    match sublattice {
        0 => "",
        1 => "shift+",
        _ => "shift2+",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_tables() {
        assert_eq!(glyphs(Channel::S).token(Phase::PlusOne), " +");
        assert_eq!(glyphs(Channel::Rpa).token(Phase::PlusOne), "-");
        assert_eq!(glyphs(Channel::Rpa).token(Phase::MinusI), "+i*");
        assert_eq!(glyphs(Channel::U).token(Phase::PlusI), "+i*");
        assert_eq!(glyphs(Channel::SpinFirst).token(Phase::MinusOne), "-");
    }

    #[test]
    fn plain_glyphs_match_phase_names() {
        let g = glyphs(Channel::SchwingerDyson);
        assert_eq!(g.token(Phase::PlusOne), "+");
        assert_eq!(g.token(Phase::MinusOne), "-");
        assert_eq!(g.token(Phase::PlusI), "+i");
        assert_eq!(g.token(Phase::MinusI), "-i");
    }

    #[test]
    fn every_two_operand_channel_has_notation() {
        for channel in [Channel::S, Channel::TLeft, Channel::TRight, Channel::U] {
            assert!(operand_notation(channel).is_some(), "{channel}");
        }
        assert!(operand_notation(Channel::Rpa).is_none());
    }

    #[test]
    fn offsets() {
        assert_eq!(vertex_product_offset(0), "");
        assert_eq!(vertex_product_offset(1), "shift+");
        assert_eq!(vertex_product_offset(2), "shift2+");
    }
}
