//! Error types for window aggregation.

use statline_math::MathError;

/// Errors that can occur while configuring window aggregation.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
