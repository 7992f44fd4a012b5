//! Core pattern model types.
//!
//! These types describe the term-generation problem as typed Rust data. A
//! [`ContractionPattern`] is pure configuration: it names the propagator legs
//! and internal indices a channel enumerates, the structure-constant lookups
//! it multiplies, and the phase conventions applied to each product. Every
//! channel module under [`crate::channels`] defines one or more patterns as
//! `const` items; the top-level entry point is
//! [`Catalog::full()`](crate::Catalog::full).

use std::fmt;

use num_complex::Complex;

/// A complex-integer coefficient. Valid coefficients lie in `{0, ±1, ±i}`.
pub type Coefficient = Complex<i32>;

/// The coefficient `0`.
pub const ZERO: Coefficient = Complex { re: 0, im: 0 };
/// The coefficient `+1`.
pub const ONE: Coefficient = Complex { re: 1, im: 0 };
/// The coefficient `-1`.
pub const MINUS_ONE: Coefficient = Complex { re: -1, im: 0 };
/// The coefficient `+i`.
pub const I: Coefficient = Complex { re: 0, im: 1 };
/// The coefficient `-i`.
pub const MINUS_I: Coefficient = Complex { re: 0, im: -1 };

/// Rank of the operator basis: the identity plus three Pauli generators.
pub const RANK: usize = 4;

/// Basis index of the identity operator.
pub const IDENTITY: usize = 0;

/// Maximum number of propagator legs a pattern may enumerate.
pub const MAX_LEGS: usize = 4;

/// Maximum number of internal indices a pattern may enumerate.
pub const MAX_INTERNALS: usize = 8;

/// Identifies one generated expression family.
///
/// The first five variants are the channels of the vertex flow equation, in
/// the order their term counters are reported. The remaining variants are the
/// auxiliary Schwinger–Dyson expression and the three pieces of the spin
/// correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// Channel 0: the s channel.
    S,
    /// Channel 1: the t-type channel evaluated via the RPA lattice summation.
    Rpa,
    /// Channel 2: t channel with the external `mu` leg on the first vertex.
    TLeft,
    /// Channel 3: t channel with the external `nu` leg on the second vertex.
    TRight,
    /// Channel 4: the u channel.
    U,
    /// Schwinger–Dyson auxiliary expression.
    SchwingerDyson,
    /// Spin correlation, terms without a Kronecker delta.
    SpinFirst,
    /// Spin correlation, terms with a Kronecker delta.
    SpinSecond,
    /// Spin correlation, terms quadratic in propagators.
    SpinQuadratic,
}

impl Channel {
    /// The five flow-equation channels in counter order.
    pub const FLOW: [Channel; 5] = [
        Channel::S,
        Channel::Rpa,
        Channel::TLeft,
        Channel::TRight,
        Channel::U,
    ];

    /// Returns the short identifier used in logs and JSON output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Channel::S => "s",
            Channel::Rpa => "rpa",
            Channel::TLeft => "t-left",
            Channel::TRight => "t-right",
            Channel::U => "u",
            Channel::SchwingerDyson => "schwinger-dyson",
            Channel::SpinFirst => "spin-first",
            Channel::SpinSecond => "spin-second",
            Channel::SpinQuadratic => "spin-quadratic",
        }
    }

    /// Returns the term-counter index of a flow-equation channel, or `None`
    /// for the auxiliary expressions.
    #[must_use]
    pub fn counter_index(self) -> Option<usize> {
        Channel::FLOW.iter().position(|c| *c == self)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a structure-constant argument takes its index value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first external (output) index.
    Mu,
    /// The second external (output) index.
    Nu,
    /// The component of the n-th propagator leg.
    Leg(usize),
    /// The n-th internal (summed) index, in declaration order.
    Internal(usize),
    /// The fixed identity index `0`.
    Identity,
}

/// An internal index enumerated over `start..RANK`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Internal {
    /// Loop variable name, used in diagnostics and JSON output.
    pub name: &'static str,
    /// First value of the range.
    pub start: usize,
}

impl Internal {
    /// An internal index over the full range `0..RANK`.
    #[must_use]
    pub const fn full(name: &'static str) -> Self {
        Self { name, start: 0 }
    }

    /// Number of values this index takes.
    #[must_use]
    pub const fn len(&self) -> usize {
        RANK.saturating_sub(self.start)
    }

    /// Whether the range is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A phase convention applied on top of the structure-constant product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factor {
    /// Multiply when exactly one of the two slots is the identity index.
    Mixed(Slot, Slot, Coefficient),
    /// Multiply when the slot is the identity index.
    Identity(Slot, Coefficient),
    /// Multiply when the two slots take different values.
    Differ(Slot, Slot, Coefficient),
    /// The term vanishes unless the two slots take the same value.
    Delta(Slot, Slot),
    /// Unconditional factor.
    Constant(Coefficient),
}

/// One product of structure constants and the operands it is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// `beta[s0][s1][s2]` lookups multiplied together.
    pub lookups: &'static [[Slot; 3]],
    /// Index pairs of the operands referenced by the emitted term.
    pub operands: &'static [[Slot; 2]],
}

/// How emitted terms are bucketed within one free-index expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One bucket per propagator-leg assignment, in enumeration order.
    Legs,
    /// One bucket per value pair of the two given internal indices.
    Internals(usize, usize),
}

/// A declarative contraction pattern.
///
/// Enumeration runs over the propagator legs (outermost, leg 0 first) and
/// then over the internal indices in declaration order, the last one
/// varying fastest. For every assignment admitted by the symmetry filter the
/// [`factors`](Self::factors) and the lookups of every
/// [`Product`] are multiplied into one coefficient per product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionPattern {
    /// The expression this pattern generates.
    pub channel: Channel,
    /// Human-readable label.
    pub label: &'static str,
    /// Description.
    pub comment: &'static str,
    /// Propagator leg names, outer to inner.
    pub legs: &'static [&'static str],
    /// Internal indices, outer to inner.
    pub internals: &'static [Internal],
    /// Index pairs governed by the reduced-rotation selection rule.
    pub restricted_pairs: &'static [(Slot, Slot)],
    /// Phase conventions.
    pub factors: &'static [Factor],
    /// Products evaluated per assignment, in emission order.
    pub products: &'static [Product],
    /// Bucketing of emitted terms.
    pub grouping: Grouping,
}

impl ContractionPattern {
    /// Number of internal-index assignments enumerated per leg assignment,
    /// before any filtering.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.internals.iter().map(Internal::len).product()
    }

    /// Iterates over every slot referenced anywhere in the pattern.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        let pairs = self.restricted_pairs.iter().flat_map(|(x, y)| [*x, *y]);
        let factors = self.factors.iter().flat_map(|f| match *f {
            Factor::Mixed(x, y, _) | Factor::Differ(x, y, _) | Factor::Delta(x, y) => vec![x, y],
            Factor::Identity(x, _) => vec![x],
            Factor::Constant(_) => Vec::new(),
        });
        let products = self.products.iter().flat_map(|p| {
            p.lookups
                .iter()
                .flatten()
                .chain(p.operands.iter().flatten())
                .copied()
        });
        pairs.chain(factors).chain(products)
    }
}

/// A full assignment of free, leg and internal indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexTuple {
    /// First external index.
    pub mu: usize,
    /// Second external index.
    pub nu: usize,
    /// Propagator leg components.
    pub legs: [usize; MAX_LEGS],
    /// Internal index values.
    pub internals: [usize; MAX_INTERNALS],
}

impl IndexTuple {
    /// An assignment with the given external indices and everything else at
    /// the identity.
    #[must_use]
    pub fn with_free(mu: usize, nu: usize) -> Self {
        Self {
            mu,
            nu,
            ..Self::default()
        }
    }

    /// Resolves the value a slot takes under this assignment.
    ///
    /// Out-of-range leg or internal positions resolve to the identity;
    /// patterns are checked against [`MAX_LEGS`] and [`MAX_INTERNALS`] before
    /// enumeration.
    #[must_use]
    pub fn value(&self, slot: Slot) -> usize {
        match slot {
            Slot::Mu => self.mu,
            Slot::Nu => self.nu,
            Slot::Leg(n) => self.legs.get(n).copied().unwrap_or(IDENTITY),
            Slot::Internal(n) => self.internals.get(n).copied().unwrap_or(IDENTITY),
            Slot::Identity => IDENTITY,
        }
    }
}

/// The complete set of contraction patterns known to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Catalog format version.
    pub version: &'static str,
    /// Every pattern, flow-equation channels first, in counter order.
    pub patterns: Vec<ContractionPattern>,
}

impl Catalog {
    /// Returns the first pattern generating `channel`.
    #[must_use]
    pub fn find(&self, channel: Channel) -> Option<&ContractionPattern> {
        self.patterns.iter().find(|p| p.channel == channel)
    }

    /// Iterates over the five flow-equation channel patterns in counter order.
    pub fn flow(&self) -> impl Iterator<Item = &ContractionPattern> + '_ {
        Channel::FLOW.iter().filter_map(move |c| self.find(*c))
    }

    /// Total number of internal-index candidates per leg assignment, summed
    /// over all patterns.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.patterns
            .iter()
            .map(ContractionPattern::candidate_count)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_indices_follow_flow_order() {
        for (i, channel) in Channel::FLOW.iter().enumerate() {
            assert_eq!(channel.counter_index(), Some(i));
        }
        assert_eq!(Channel::SchwingerDyson.counter_index(), None);
        assert_eq!(Channel::SpinQuadratic.counter_index(), None);
    }

    #[test]
    fn index_tuple_resolves_slots() {
        let mut t = IndexTuple::with_free(2, 3);
        t.legs[1] = 3;
        t.internals[4] = 1;
        assert_eq!(t.value(Slot::Mu), 2);
        assert_eq!(t.value(Slot::Nu), 3);
        assert_eq!(t.value(Slot::Leg(1)), 3);
        assert_eq!(t.value(Slot::Internal(4)), 1);
        assert_eq!(t.value(Slot::Identity), IDENTITY);
        assert_eq!(t.value(Slot::Internal(MAX_INTERNALS + 3)), IDENTITY);
    }

    #[test]
    fn internal_ranges() {
        assert_eq!(Internal::full("a").len(), RANK);
        let shifted = Internal {
            name: "a",
            start: 1,
        };
        assert_eq!(shifted.len(), 3);
        assert!(!shifted.is_empty());
        let exhausted = Internal {
            name: "x",
            start: RANK,
        };
        assert!(exhausted.is_empty());
    }
}
