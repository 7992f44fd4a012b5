//! Channel 2: t channel, external `mu` on the first vertex.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I,
};

const B: Slot = Slot::Internal(0);
const C: Slot = Slot::Internal(1);
const D: Slot = Slot::Internal(2);
const J: Slot = Slot::Internal(3);
const K: Slot = Slot::Internal(4);
const L: Slot = Slot::Internal(5);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);

/// The channel-2 t pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::TLeft,
    label: "t channel (left)",
    comment: "Vertex (mu,b) and on-site vertex (c,d) joined by propagators A and B.",
    legs: &["prA", "prB"],
    internals: &[
        Internal::full("b"),
        Internal::full("c"),
        Internal::full("d"),
        Internal::full("j"),
        Internal::full("k"),
        Internal::full("l"),
    ],
    restricted_pairs: &[(Slot::Mu, B), (C, D)],
    factors: &[
        Factor::Mixed(Slot::Mu, B, I),
        Factor::Mixed(D, C, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Mixed(Slot::Mu, Slot::Nu, MINUS_I),
    ],
    products: &[Product {
        lookups: &[[J, D, PR_B], [K, J, B], [L, K, PR_A], [Slot::Nu, L, C]],
        operands: &[[Slot::Mu, B], [C, D]],
    }],
    grouping: Grouping::Legs,
};
