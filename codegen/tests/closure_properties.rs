//! Property-based tests for contraction evaluation.
//!
//! Every coefficient the catalog patterns can produce stays inside
//! `{0, ±1, ±i}`, whatever the index assignment, and every emitted term
//! carries exactly the coefficient the evaluator computes for it.

#![allow(clippy::unwrap_used)]

use pffrg_algebra::model::{IndexTuple, MAX_INTERNALS, MAX_LEGS, RANK, ZERO};
use pffrg_algebra::{table, Catalog, Symmetry};
use pffrg_codegen::Evaluator;
use proptest::prelude::*;

fn index() -> impl Strategy<Value = usize> {
    0..RANK
}

fn symmetry() -> impl Strategy<Value = Symmetry> {
    (any::<bool>(), any::<bool>()).prop_map(|(reduced_rotation, time_reversal)| Symmetry {
        reduced_rotation,
        time_reversal,
    })
}

fn tuple() -> impl Strategy<Value = IndexTuple> {
    (
        index(),
        index(),
        prop::array::uniform4(index()),
        prop::array::uniform8(index()),
    )
        .prop_map(|(mu, nu, legs, internals)| {
            let mut t = IndexTuple::with_free(mu, nu);
            t.legs = legs;
            t.internals = internals;
            t
        })
}

// =============================================================================
// Closure
// =============================================================================

proptest! {
    /// Any assignment of any pattern yields an admissible coefficient.
    #[test]
    fn prop_coefficients_admissible(pattern in 0usize..9, t in tuple(), sym in symmetry()) {
        let catalog = Catalog::full();
        let pattern = &catalog.patterns[pattern % catalog.patterns.len()];
        let eval = Evaluator::new(pattern, sym).unwrap();
        for product in 0..pattern.products.len() {
            let c = eval.coefficient(&t, product).unwrap();
            prop_assert!(table::is_admissible(c), "{} product {product}: {c}", pattern.channel);
        }
    }

    /// Rejected assignments contribute nothing.
    #[test]
    fn prop_filtered_assignments_vanish(pattern in 0usize..9, t in tuple()) {
        let catalog = Catalog::full();
        let pattern = &catalog.patterns[pattern % catalog.patterns.len()];
        let eval = Evaluator::new(pattern, Symmetry::FULL).unwrap();
        if !eval.permits(&t) {
            for product in 0..pattern.products.len() {
                prop_assert_eq!(eval.coefficient(&t, product).unwrap(), ZERO);
            }
        }
    }
}

// =============================================================================
// Emitted terms
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The phase of every emitted term is the evaluator's coefficient.
    #[test]
    fn prop_term_phase_matches_coefficient(
        pattern in 0usize..9,
        mu in index(),
        nu in index(),
        sym in symmetry(),
        pick in any::<prop::sample::Index>(),
    ) {
        let catalog = Catalog::full();
        let pattern = &catalog.patterns[pattern % catalog.patterns.len()];
        let eval = Evaluator::new(pattern, sym).unwrap();
        let assignments: Vec<_> = eval.leg_assignments().collect();
        let legs = assignments[pick.index(assignments.len())];
        let (terms, stats) = eval.terms(mu, nu, &legs).unwrap();
        prop_assert_eq!(terms.len(), stats.terms);
        prop_assert_eq!(
            stats.candidates,
            stats.filtered + (stats.terms + stats.dropped) / pattern.products.len()
        );
        for term in &terms {
            let exact = eval.coefficient(&term.tuple, term.product).unwrap();
            prop_assert_eq!(term.phase.coefficient(), exact);
            prop_assert_eq!(term.tuple.mu, mu);
            prop_assert_eq!(term.tuple.nu, nu);
            prop_assert!(term.legs.ordinals().iter().all(|&o| o < sym.components().len()));
        }
    }

    /// Leg components always come from the active component set.
    #[test]
    fn prop_leg_components_follow_symmetry(pattern in 0usize..9, sym in symmetry()) {
        let catalog = Catalog::full();
        let pattern = &catalog.patterns[pattern % catalog.patterns.len()];
        let eval = Evaluator::new(pattern, sym).unwrap();
        let components = sym.components();
        let mut count = 0;
        for legs in eval.leg_assignments() {
            count += 1;
            prop_assert!(legs.len <= MAX_LEGS);
            for (&o, &c) in legs.ordinals().iter().zip(legs.components()) {
                prop_assert_eq!(components[o], c);
            }
        }
        prop_assert_eq!(count, components.len().pow(pattern.legs.len() as u32));
        prop_assert!(pattern.internals.len() <= MAX_INTERNALS);
    }
}
