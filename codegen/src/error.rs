//! Error types for pffrg-codegen

use pffrg_algebra::{Channel, Coefficient};
use thiserror::Error;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A contraction produced a value outside `{0, ±1, ±i}`
    #[error("Coefficient out of range in channel {channel}: {value} (must be in {{0, ±1, ±i}})")]
    CoefficientOutOfRange {
        /// Channel whose pattern produced the value
        channel: Channel,
        /// The offending coefficient
        value: Coefficient,
    },

    /// A pattern references an index it does not declare
    #[error("Malformed pattern for channel {channel}: {reason}")]
    MalformedPattern {
        /// Channel of the rejected pattern
        channel: Channel,
        /// What is wrong with it
        reason: String,
    },

    /// Invalid generator configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
