//! Error types for U-VecSort.

use thiserror::Error;

/// Errors surfaced by the sequencing engine.
///
/// Degenerate or duplicate strokes are not errors: the segment store drops
/// them silently. A refinement attempt that does not shorten the transit is
/// not an error either. What remains are configuration mistakes and broken
/// internal invariants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An internal invariant was violated. Continuing would operate on
    /// corrupted state, so callers should not retry.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for U-VecSort operations.
pub type Result<T> = std::result::Result<T, Error>;
