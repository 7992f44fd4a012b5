//! Property-based tests for the structure-constant table.
//!
//! Uses proptest to verify the operator-algebra identities the contraction
//! patterns rely on.

use pffrg_algebra::model::{Coefficient, ONE, RANK, ZERO};
use pffrg_algebra::symmetry::rotation_pair;
use pffrg_algebra::table::{is_admissible, lookup};
use pffrg_algebra::Symmetry;
use proptest::prelude::*;

fn index() -> impl Strategy<Value = usize> {
    0..RANK
}

// =============================================================================
// Algebra Properties
// =============================================================================

proptest! {
    /// The identity is a two-sided unit: σ^0 σ^j = σ^j σ^0 = σ^j.
    #[test]
    fn prop_identity_is_unit(j in index()) {
        prop_assert_eq!(lookup(0, j, j), ONE);
        prop_assert_eq!(lookup(j, 0, j), ONE);
    }

    /// Every generator squares to the identity.
    #[test]
    fn prop_generators_square_to_identity(j in index()) {
        prop_assert_eq!(lookup(j, j, 0), ONE);
    }

    /// (σ^i σ^j) σ^k = σ^i (σ^j σ^k).
    #[test]
    fn prop_associative(i in index(), j in index(), k in index()) {
        let left: Coefficient = lookup(i, j, i ^ j) * lookup(i ^ j, k, i ^ j ^ k);
        let right: Coefficient = lookup(j, k, j ^ k) * lookup(i, j ^ k, i ^ j ^ k);
        prop_assert_eq!(left, right);
    }

    /// Products of table entries never leave the admissible set.
    #[test]
    fn prop_products_stay_admissible(
        a in index(), b in index(), c in index(),
        d in index(), e in index(), f in index(),
    ) {
        let p = lookup(a, b, c) * lookup(d, e, f);
        prop_assert!(is_admissible(p));
    }

    /// Exactly one k is nonzero for every (i, j).
    #[test]
    fn prop_single_support(i in index(), j in index()) {
        let nonzero = (0..RANK).filter(|&k| lookup(i, j, k) != ZERO).count();
        prop_assert_eq!(nonzero, 1);
    }
}

// =============================================================================
// Symmetry Properties
// =============================================================================

proptest! {
    /// The reduced-rotation pair rule is symmetric in its arguments.
    #[test]
    fn prop_rotation_pair_symmetric(x in index(), y in index()) {
        prop_assert_eq!(rotation_pair(x, y), rotation_pair(y, x));
    }

    /// Enumerated components are sorted, unique and include the identity.
    #[test]
    fn prop_components_well_formed(rotation: bool, reversal: bool) {
        let sym = Symmetry { reduced_rotation: rotation, time_reversal: reversal };
        let comps = sym.components();
        prop_assert_eq!(comps.first().copied(), Some(0));
        prop_assert!(comps.windows(2).all(|w| w[0] < w[1]));
        for (ordinal, &c) in comps.iter().enumerate() {
            prop_assert_eq!(sym.ordinal(c), Some(ordinal));
        }
    }
}
