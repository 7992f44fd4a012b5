//! Pauli structure constants and PFFRG contraction patterns encoded as typed
//! Rust data.
//!
//! The `pffrg-algebra` crate provides the fixed 4×4×4 structure-constant
//! tensor of the `{1, σx, σy, σz}` operator basis, the symmetry selection
//! rules, and one declarative [`ContractionPattern`] per generated
//! expression: the five channels of the two-particle vertex flow equation,
//! the Schwinger–Dyson auxiliary expression, and the three pieces of the
//! spin correlation.
//!
//! # Entry Point
//!
//! ```
//! let catalog = pffrg_algebra::Catalog::full();
//! assert_eq!(catalog.patterns.len(), 9);
//! assert_eq!(catalog.flow().count(), 5);
//! ```
//!
//! # Serialization
//!
//! ```
//! let catalog = pffrg_algebra::Catalog::full();
//! let json = pffrg_algebra::serializer::json::to_json(catalog);
//! assert_eq!(json["patterns"].as_array().map(Vec::len), Some(9));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod channels;
pub mod model;
#[cfg(feature = "serializers")]
pub mod serializer;
pub mod symmetry;
pub mod table;

pub use model::{
    Catalog, Channel, Coefficient, ContractionPattern, Factor, Grouping, IndexTuple, Internal,
    Product, Slot,
};
pub use symmetry::Symmetry;

impl Catalog {
    /// Returns the complete pattern catalog.
    ///
    /// Flow-equation channels come first in term-counter order
    /// `s → RPA → t(left) → t(right) → u`, followed by the Schwinger–Dyson
    /// expression and the spin-correlation pieces.
    #[must_use]
    pub fn full() -> &'static Catalog {
        static CATALOG: std::sync::OnceLock<Catalog> = std::sync::OnceLock::new();
        CATALOG.get_or_init(|| Catalog {
            version: env!("CARGO_PKG_VERSION"),
            patterns: vec![
                channels::s::PATTERN,
                channels::rpa::PATTERN,
                channels::t_left::PATTERN,
                channels::t_right::PATTERN,
                channels::u::PATTERN,
                channels::schwinger_dyson::PATTERN,
                channels::spin::FIRST,
                channels::spin::SECOND,
                channels::spin::QUADRATIC,
            ],
        })
    }
}
