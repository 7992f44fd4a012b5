//! Channel 0: the s channel.
//!
//! Both propagators connect the two vertices along the same frequency
//! transfer. Terms are grouped per leg assignment and tagged `Pt<A><B>`.
//!
//! The extra `-1` that the `ω4 → -ω4` substitution attaches to leg B = 0 is
//! not part of this pattern; the downstream solver applies it.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I,
};

const A: Slot = Slot::Internal(0);
const B: Slot = Slot::Internal(1);
const D: Slot = Slot::Internal(2);
const C: Slot = Slot::Internal(3);
const G: Slot = Slot::Internal(4);
const H: Slot = Slot::Internal(5);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);

/// The s-channel pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::S,
    label: "s channel",
    comment: "Two propagators A, B between vertices (a,b) and (c,d); \
              output vertex (mu,nu) attached through g and h.",
    legs: &["prA", "prB"],
    internals: &[
        Internal::full("a"),
        Internal::full("b"),
        Internal::full("d"),
        Internal::full("c"),
        Internal::full("g"),
        Internal::full("h"),
    ],
    restricted_pairs: &[(A, B), (C, D)],
    factors: &[
        Factor::Mixed(A, B, I),
        Factor::Mixed(C, D, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Mixed(Slot::Mu, Slot::Nu, MINUS_I),
    ],
    products: &[Product {
        lookups: &[
            [G, A, PR_A],
            [Slot::Mu, G, C],
            [H, B, PR_B],
            [Slot::Nu, H, D],
        ],
        operands: &[[A, B], [C, D]],
    }],
    grouping: Grouping::Legs,
};
