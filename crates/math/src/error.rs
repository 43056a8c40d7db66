//! Error types for numeric operations.

/// Errors that can occur during numeric operations.
#[derive(Debug, thiserror::Error)]
pub enum MathError {
    /// Prior pseudo-count is negative or not finite.
    #[error("invalid prior count: {0} (must be finite and >= 0)")]
    InvalidPriorCount(f64),

    /// Window width of zero.
    #[error("invalid window width: {0} (must be >= 1)")]
    InvalidWindow(usize),

    /// Dimension mismatch.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },
}
