//! Channel contraction patterns.
//!
//! Each sub-module encodes one expression family as `const` pattern data.
//! The five flow-equation channels share their leg conventions: every leg
//! whose component is the identity contributes `-i` (propagator parity), and
//! an output vertex with exactly one identity index contributes another `-i`.

pub mod rpa;
pub mod s;
pub mod schwinger_dyson;
pub mod spin;
pub mod t_left;
pub mod t_right;
pub mod u;
