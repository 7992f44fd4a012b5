//! Serializers for the pattern catalog.
//!
//! - **JSON** ([`json`]): every pattern with its legs, internal ranges,
//!   factors and lookups, as printed by `pffrg-patterns`.

pub mod json;
