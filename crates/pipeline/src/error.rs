//! Error types for the feature pipeline.

use statline_math::MathError;
use statline_traits::{EnrichError, EventError};
use statline_utils::UtilsError;
use statline_windows::WindowError;

/// Errors that can occur while building features.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Event reduction error.
    #[error("event error: {0}")]
    Event(#[from] EventError),

    /// Window aggregation error.
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Enrichment error.
    #[error("enrichment error: {0}")]
    Enrich(#[from] EnrichError),

    /// Frame utility error.
    #[error("frame error: {0}")]
    Utils(#[from] UtilsError),

    /// Polars error.
    #[error("data processing error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Missing required column.
    #[error("missing required column: {0}")]
    MissingColumn(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PipelineError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Event(err) => err.is_recoverable(),
            Self::Enrich(_) => true,
            _ => false,
        }
    }
}
