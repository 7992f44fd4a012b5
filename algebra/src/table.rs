//! Structure constants of the Pauli operator algebra.
//!
//! `BETA[i][j][k]` is defined by
//!
//! ```text
//! σ^i σ^j = Σ_k β^{ij}_k σ^k,   i, j, k ∈ {0, x, y, z}
//! ```
//!
//! with `σ^0` the 2×2 identity and `σ^{x,y,z}` the Pauli matrices. Every
//! entry lies in `{0, ±1, ±i}` and, for fixed `(i, j)`, exactly one `k` is
//! nonzero: `k = i XOR j`.
//!
//! ```
//! use pffrg_algebra::table::lookup;
//! use pffrg_algebra::model::{I, ONE};
//!
//! assert_eq!(lookup(0, 0, 0), ONE);
//! assert_eq!(lookup(1, 2, 3), I);
//! ```

use crate::model::{Coefficient, I, MINUS_I, ONE, RANK, ZERO};

const O: Coefficient = ZERO;
const P: Coefficient = ONE;
const J: Coefficient = I;
const K: Coefficient = MINUS_I;

/// The 4×4×4 structure-constant tensor.
pub static BETA: [[[Coefficient; RANK]; RANK]; RANK] = [
    [[P, O, O, O], [O, P, O, O], [O, O, P, O], [O, O, O, P]],
    [[O, P, O, O], [P, O, O, O], [O, O, O, J], [O, O, K, O]],
    [[O, O, P, O], [O, O, O, K], [P, O, O, O], [O, J, O, O]],
    [[O, O, O, P], [O, O, J, O], [O, K, O, O], [P, O, O, O]],
];

/// Returns `β^{ij}_k`.
///
/// # Panics
///
/// Panics if any index is not below [`RANK`].
#[inline]
#[must_use]
pub fn lookup(i: usize, j: usize, k: usize) -> Coefficient {
    BETA[i][j][k]
}

/// Returns `true` when `c` is one of the five admissible coefficients.
#[inline]
#[must_use]
pub fn is_admissible(c: Coefficient) -> bool {
    c.re.abs() + c.im.abs() <= 1
}
