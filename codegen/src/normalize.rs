//! Coefficient normalization.
//!
//! A contraction yields a complex integer. Zero drops the term; the four
//! unit values map onto a [`Phase`]; anything else means the pattern is
//! malformed and aborts generation.

use std::fmt;

use pffrg_algebra::model::{I, MINUS_I, MINUS_ONE, ONE, ZERO};
use pffrg_algebra::{Channel, Coefficient};

use crate::error::{GenerationError, Result};

/// One of the four nonzero admissible coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `+1`
    PlusOne,
    /// `-1`
    MinusOne,
    /// `+i`
    PlusI,
    /// `-i`
    MinusI,
}

impl Phase {
    /// All phases, in glyph-table order.
    pub const ALL: [Phase; 4] = [Phase::PlusOne, Phase::MinusOne, Phase::PlusI, Phase::MinusI];

    /// The coefficient this phase stands for.
    #[must_use]
    pub fn coefficient(self) -> Coefficient {
        match self {
            Phase::PlusOne => ONE,
            Phase::MinusOne => MINUS_ONE,
            Phase::PlusI => I,
            Phase::MinusI => MINUS_I,
        }
    }

    /// Position in a four-entry glyph table.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Phase::PlusOne => 0,
            Phase::MinusOne => 1,
            Phase::PlusI => 2,
            Phase::MinusI => 3,
        }
    }

    /// Short identifier used in structured output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::PlusOne => "+1",
            Phase::MinusOne => "-1",
            Phase::PlusI => "+i",
            Phase::MinusI => "-i",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalizes a coefficient produced by `channel`.
///
/// Returns `Ok(None)` when the term vanishes.
///
/// # Errors
///
/// Returns [`GenerationError::CoefficientOutOfRange`] if `value` is not one
/// of `{0, ±1, ±i}`.
pub fn normalize(channel: Channel, value: Coefficient) -> Result<Option<Phase>> {
    if value == ZERO {
        return Ok(None);
    }
    Phase::ALL
        .into_iter()
        .find(|p| p.coefficient() == value)
        .map(Some)
        .ok_or(GenerationError::CoefficientOutOfRange { channel, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn maps_the_five_admissible_values() {
        let ch = Channel::S;
        assert_eq!(normalize(ch, ONE).ok(), Some(Some(Phase::PlusOne)));
        assert_eq!(normalize(ch, MINUS_ONE).ok(), Some(Some(Phase::MinusOne)));
        assert_eq!(normalize(ch, I).ok(), Some(Some(Phase::PlusI)));
        assert_eq!(normalize(ch, MINUS_I).ok(), Some(Some(Phase::MinusI)));
        assert_eq!(normalize(ch, ZERO).ok(), Some(None));
    }

    #[test]
    fn rejects_everything_else() {
        for value in [Complex::new(1, 1), Complex::new(2, 0), Complex::new(0, -2)] {
            let err = normalize(Channel::U, value).unwrap_err();
            let GenerationError::CoefficientOutOfRange { channel, value: v } = &err else {
                unreachable!("{err}");
            };
            assert_eq!((*channel, *v), (Channel::U, value));
        }
    }

    #[test]
    fn phase_round_trip_through_coefficient() {
        for phase in Phase::ALL {
            assert_eq!(
                normalize(Channel::Rpa, phase.coefficient()).ok(),
                Some(Some(phase))
            );
            assert_eq!(Phase::ALL[phase.index()], phase);
        }
    }
}
