//! Channel 1: the t channel evaluated through the RPA lattice summation.
//!
//! Terms are not summed directly into `(mu, nu)` expressions. They are
//! bucketed by the intermediate vertex indices `(b, c)`; a second pass
//! multiplies each bucket by an externally supplied vertex product and sums
//! over `(b, c)`. The overall sign of this channel is carried by its glyphs,
//! and its factor 2 is applied by the downstream solver.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I,
};

const B: Slot = Slot::Internal(0);
const C: Slot = Slot::Internal(1);
const J: Slot = Slot::Internal(2);
const PR_A: Slot = Slot::Leg(0);
const PR_B: Slot = Slot::Leg(1);

/// The RPA-channel pattern.
pub const PATTERN: ContractionPattern = ContractionPattern {
    channel: Channel::Rpa,
    label: "RPA channel",
    comment: "Propagator bubble between vertex (mu,b) and vertex (c,nu); \
              bucketed by (b,c) for the lattice summation.",
    legs: &["prA", "prB"],
    internals: &[
        Internal::full("b"),
        Internal::full("c"),
        Internal::full("j"),
    ],
    restricted_pairs: &[(Slot::Mu, B), (C, Slot::Nu)],
    factors: &[
        Factor::Mixed(Slot::Mu, B, I),
        Factor::Mixed(C, Slot::Nu, I),
        Factor::Identity(PR_A, MINUS_I),
        Factor::Identity(PR_B, MINUS_I),
        Factor::Mixed(Slot::Mu, Slot::Nu, MINUS_I),
    ],
    products: &[Product {
        lookups: &[[J, B, PR_A], [PR_B, J, C]],
        operands: &[],
    }],
    grouping: Grouping::Internals(0, 1),
};
