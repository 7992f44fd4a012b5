//! Spin correlation expressed through pseudo-fermion vertices.
//!
//! `mu` and `nu` select the matrix element of the correlation and are fixed
//! per run. The four propagator legs `a, b, c, d` nest as bracket levels in
//! the rendered expression. The vertex `(g, h)` is imaginary when exactly
//! one of its indices is the identity.

use crate::model::{
    Channel, ContractionPattern, Factor, Grouping, Internal, Product, Slot, I, MINUS_I, MINUS_ONE,
};

const LEG_A: Slot = Slot::Leg(0);
const LEG_B: Slot = Slot::Leg(1);
const LEG_C: Slot = Slot::Leg(2);
const LEG_D: Slot = Slot::Leg(3);

const G: Slot = Slot::Internal(0);
const H: Slot = Slot::Internal(1);
const K: Slot = Slot::Internal(2);
const L: Slot = Slot::Internal(3);
const M: Slot = Slot::Internal(4);
const P: Slot = Slot::Internal(5);
const Q: Slot = Slot::Internal(6);
const R: Slot = Slot::Internal(7);

const PROPAGATOR_PARITY: [Factor; 4] = [
    Factor::Identity(LEG_A, MINUS_I),
    Factor::Identity(LEG_B, MINUS_I),
    Factor::Identity(LEG_C, MINUS_I),
    Factor::Identity(LEG_D, MINUS_I),
];

/// Terms without a Kronecker delta: the product of two separate traces.
/// Includes the summation over lattice sites downstream.
pub const FIRST: ContractionPattern = ContractionPattern {
    channel: Channel::SpinFirst,
    label: "spin correlation, first terms",
    comment: "Two traces [k,mu,c][l,k,g][0,l,a] and [m,nu,d][p,m,h][0,p,b].",
    legs: &["a", "b", "c", "d"],
    internals: &[
        Internal::full("g"),
        Internal::full("h"),
        Internal::full("k"),
        Internal::full("l"),
        Internal::full("m"),
        Internal::full("p"),
    ],
    restricted_pairs: &[],
    factors: &[
        PROPAGATOR_PARITY[0],
        PROPAGATOR_PARITY[1],
        PROPAGATOR_PARITY[2],
        PROPAGATOR_PARITY[3],
        Factor::Mixed(G, H, I),
    ],
    products: &[Product {
        lookups: &[
            [K, Slot::Mu, LEG_C],
            [L, K, G],
            [Slot::Identity, L, LEG_A],
            [M, Slot::Nu, LEG_D],
            [P, M, H],
            [Slot::Identity, P, LEG_B],
        ],
        operands: &[[G, H]],
    }],
    grouping: Grouping::Legs,
};

/// Terms with a Kronecker delta: a single trace over all operators.
pub const SECOND: ContractionPattern = ContractionPattern {
    channel: Channel::SpinSecond,
    label: "spin correlation, second terms",
    comment: "Single trace [k,mu,c][l,k,g][m,l,b][p,m,nu][q,p,d][r,q,h][0,r,a].",
    legs: &["a", "b", "c", "d"],
    internals: &[
        Internal::full("g"),
        Internal::full("h"),
        Internal::full("k"),
        Internal::full("l"),
        Internal::full("m"),
        Internal::full("p"),
        Internal::full("q"),
        Internal::full("r"),
    ],
    restricted_pairs: &[],
    factors: &[
        PROPAGATOR_PARITY[0],
        PROPAGATOR_PARITY[1],
        PROPAGATOR_PARITY[2],
        PROPAGATOR_PARITY[3],
        Factor::Mixed(G, H, I),
    ],
    products: &[Product {
        lookups: &[
            [K, Slot::Mu, LEG_C],
            [L, K, G],
            [M, L, LEG_B],
            [P, M, Slot::Nu],
            [Q, P, LEG_D],
            [R, Q, H],
            [Slot::Identity, R, LEG_A],
        ],
        operands: &[[G, H]],
    }],
    grouping: Grouping::Legs,
};

/// Terms quadratic in propagators, carrying an overall minus sign.
pub const QUADRATIC: ContractionPattern = ContractionPattern {
    channel: Channel::SpinQuadratic,
    label: "spin correlation, quadratic terms",
    comment: "Trace [l,mu,a][m,l,nu][0,m,b] over two propagators.",
    legs: &["a", "b"],
    internals: &[Internal::full("l"), Internal::full("m")],
    restricted_pairs: &[],
    factors: &[
        PROPAGATOR_PARITY[0],
        PROPAGATOR_PARITY[1],
        Factor::Constant(MINUS_ONE),
    ],
    products: &[Product {
        lookups: &[
            [Slot::Internal(0), Slot::Mu, LEG_A],
            [Slot::Internal(1), Slot::Internal(0), Slot::Nu],
            [Slot::Identity, Slot::Internal(1), LEG_B],
        ],
        operands: &[],
    }],
    grouping: Grouping::Legs,
};
