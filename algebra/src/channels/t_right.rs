//! Channel 3: t channel, external `nu` on the second vertex.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I,
};

const C: Slot = Slot::Internal(0);
const B: Slot = Slot::Internal(1);
const A: Slot = Slot::Internal(2);
const J: Slot = Slot::Internal(3);
const K: Slot = Slot::Internal(4);
const L: Slot = Slot::Internal(5);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);

/// The channel-3 t pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::TRight,
    label: "t channel (right)",
    comment: "On-site vertex (a,b) and vertex (c,nu) joined by propagators A and B.",
    legs: &["prA", "prB"],
    internals: &[
        Internal::full("c"),
        Internal::full("b"),
        Internal::full("a"),
        Internal::full("j"),
        Internal::full("k"),
        Internal::full("l"),
    ],
    restricted_pairs: &[(A, B), (C, Slot::Nu)],
    factors: &[
        Factor::Mixed(Slot::Nu, C, I),
        Factor::Mixed(A, B, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Mixed(Slot::Mu, Slot::Nu, MINUS_I),
    ],
    products: &[Product {
        lookups: &[[J, A, PR_A], [K, J, C], [L, K, PR_B], [Slot::Mu, L, B]],
        operands: &[[A, B], [C, Slot::Nu]],
    }],
    grouping: Grouping::Legs,
};
