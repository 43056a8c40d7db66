//! Enrichment trait definitions.

use polars::prelude::*;

/// Errors that can occur while joining descriptive attributes.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// None of the recognized key columns is present in the source.
    #[error("no key column found, expected one of {candidates:?}")]
    MissingKeyColumn {
        /// Recognized key columns, in precedence order.
        candidates: Vec<String>,
    },

    /// The source has a key column but no row with a usable key.
    #[error("no usable rows in enrichment source")]
    NoUsableRows,

    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Joins descriptive columns onto a feature frame without dropping rows.
pub trait Enricher: Send + Sync {
    /// Left-join enrichment columns onto `features`.
    ///
    /// # Errors
    /// Returns `EnrichError` if the join cannot be performed.
    fn enrich(&self, features: DataFrame) -> Result<DataFrame, EnrichError>;

    /// Columns this enricher always adds.
    fn output_columns(&self) -> &[&str];
}
