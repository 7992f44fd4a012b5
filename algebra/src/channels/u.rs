//! Channel 4: the u channel.
//!
//! The `ω4 → -ω4` substitution flips the sign whenever the two legs carry
//! different components.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I, MINUS_ONE,
};

const B: Slot = Slot::Internal(0);
const A: Slot = Slot::Internal(1);
const C: Slot = Slot::Internal(2);
const D: Slot = Slot::Internal(3);
const G: Slot = Slot::Internal(4);
const H: Slot = Slot::Internal(5);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);

/// The u-channel pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::U,
    label: "u channel",
    comment: "Crossed propagators A, B between vertices (b,a) and (d,c).",
    legs: &["prA", "prB"],
    internals: &[
        Internal::full("b"),
        Internal::full("a"),
        Internal::full("c"),
        Internal::full("d"),
        Internal::full("g"),
        Internal::full("h"),
    ],
    restricted_pairs: &[(A, B), (C, D)],
    factors: &[
        Factor::Mixed(B, A, I),
        Factor::Mixed(D, C, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Mixed(Slot::Mu, Slot::Nu, MINUS_I),
        Factor::Differ(PR_A, PR_B, MINUS_ONE),
    ],
    products: &[Product {
        lookups: &[
            [G, D, PR_B],
            [Slot::Mu, G, B],
            [H, A, PR_A],
            [Slot::Nu, H, C],
        ],
        operands: &[[B, A], [D, C]],
    }],
    grouping: Grouping::Legs,
};
