//! Model symmetry selection rules.
//!
//! Two independent switches restrict which index combinations contribute:
//!
//! - **Reduced rotation** (a global U(1) spin-rotation symmetry): propagators
//!   only carry the `0` and `z` components, and every restricted index pair
//!   must be diagonal (`x == y`), the raising/lowering pair `{x, y}` or the
//!   identity coupling `{0, z}`.
//! - **Time reversal**: propagators only carry the `0` component.
//!
//! Restricted component sets are enumerated directly by
//! [`Symmetry::components`]; nothing is filtered after the fact.

use crate::model::{IDENTITY, RANK};

/// Basis index of the `z` generator.
pub const Z: usize = 3;

const ALL_COMPONENTS: [usize; RANK] = [0, 1, 2, 3];
const ROTATION_COMPONENTS: [usize; 2] = [IDENTITY, Z];
const REVERSAL_COMPONENTS: [usize; 1] = [IDENTITY];

/// Process-wide symmetry configuration, fixed before a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Symmetry {
    /// Restrict to a global U(1) spin-rotation symmetric model.
    pub reduced_rotation: bool,
    /// Restrict to a time-reversal symmetric model.
    pub time_reversal: bool,
}

impl Symmetry {
    /// No restriction.
    pub const NONE: Symmetry = Symmetry {
        reduced_rotation: false,
        time_reversal: false,
    };

    /// Both restrictions.
    pub const FULL: Symmetry = Symmetry {
        reduced_rotation: true,
        time_reversal: true,
    };

    /// Returns whether the index pair `(x, y)` may contribute.
    #[must_use]
    pub fn permits_pair(self, x: usize, y: usize) -> bool {
        !self.reduced_rotation || rotation_pair(x, y)
    }

    /// Returns whether every pair of `pairs` may contribute.
    #[must_use]
    pub fn permits(self, pairs: &[(usize, usize)]) -> bool {
        pairs.iter().all(|&(x, y)| self.permits_pair(x, y))
    }

    /// Propagator components enumerated under this configuration, in order.
    #[must_use]
    pub fn components(self) -> &'static [usize] {
        if self.time_reversal {
            &REVERSAL_COMPONENTS
        } else if self.reduced_rotation {
            &ROTATION_COMPONENTS
        } else {
            &ALL_COMPONENTS
        }
    }

    /// Position of `component` in [`components`](Self::components).
    #[must_use]
    pub fn ordinal(self, component: usize) -> Option<usize> {
        self.components().iter().position(|&c| c == component)
    }
}

/// The reduced-rotation pair rule.
#[must_use]
pub fn rotation_pair(x: usize, y: usize) -> bool {
    x == y || matches!((x, y), (1, 2) | (2, 1) | (IDENTITY, Z) | (Z, IDENTITY))
}
