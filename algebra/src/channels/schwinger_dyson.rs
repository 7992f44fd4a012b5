//! Schwinger–Dyson auxiliary expression.
//!
//! Relates the self-energy to bare (`BV`) and full (`FV1`, `FV2`) vertices
//! for Heisenberg interactions. The outer index `mu` is a propagator
//! component, so it is enumerated from the component set rather than from
//! the full basis. Two products are evaluated per assignment; they differ by
//! exchanging legs A and B.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I,
};

const A: Slot = Slot::Internal(0);
const B: Slot = Slot::Internal(1);
const C: Slot = Slot::Internal(2);
const K: Slot = Slot::Internal(3);
const L: Slot = Slot::Internal(4);
const M: Slot = Slot::Internal(5);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);
const PR_C: Slot = Slot::Leg(2);

/// The Schwinger–Dyson pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::SchwingerDyson,
    label: "Schwinger-Dyson terms",
    comment: "Three propagators A, B, C around the full vertex (b,c); \
              the summed generator index a excludes the identity.",
    legs: &["prA", "prB", "prC"],
    internals: &[
        Internal {
            name: "a",
            start: 1,
        },
        Internal::full("b"),
        Internal::full("c"),
        Internal::full("k"),
        Internal::full("l"),
        Internal::full("m"),
    ],
    restricted_pairs: &[(C, B)],
    factors: &[
        Factor::Mixed(C, B, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Identity(PR_C, MINUS_I),
        Factor::Identity(Slot::Mu, I),
        Factor::Delta(M, C),
    ],
    products: &[
        Product {
            lookups: &[[K, A, PR_A], [Slot::Mu, K, B], [L, PR_C, A], [M, L, PR_B]],
            operands: &[[B, C]],
        },
        Product {
            lookups: &[[K, A, PR_B], [Slot::Mu, K, B], [L, PR_C, A], [M, L, PR_A]],
            operands: &[[B, C]],
        },
    ],
    grouping: Grouping::Legs,
};
