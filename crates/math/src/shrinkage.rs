//! Pseudo-count shrinkage toward a population rate.

use ndarray::{Array1, Zip};
use statline_traits::RateSmoother;

use crate::MathError;

/// Pooled rate `sum(hits) / sum(exposures)`.
///
/// Returns 0.0 when the total exposure is not positive.
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if the arrays differ in length.
pub fn population_rate(hits: &Array1<f64>, exposures: &Array1<f64>) -> Result<f64, MathError> {
    if hits.len() != exposures.len() {
        return Err(MathError::DimensionMismatch { expected: exposures.len(), actual: hits.len() });
    }

    let total_exposures = exposures.sum();
    if total_exposures <= 0.0 {
        return Ok(0.0);
    }

    Ok(hits.sum() / total_exposures)
}

/// Shrink one rate toward `population_rate` with `prior` pseudo-observations.
///
/// Rows without exposure fall back to the population rate exactly.
#[must_use]
pub fn shrink_rate(hits: f64, exposures: f64, population_rate: f64, prior: f64) -> f64 {
    if exposures > 0.0 {
        (hits + prior * population_rate) / (exposures + prior)
    } else {
        population_rate
    }
}

/// Vectorised [`shrink_rate`].
///
/// # Errors
/// Returns `MathError::DimensionMismatch` if the arrays differ in length.
pub fn shrink_rates(
    hits: &Array1<f64>,
    exposures: &Array1<f64>,
    population_rate: f64,
    prior: f64,
) -> Result<Array1<f64>, MathError> {
    if hits.len() != exposures.len() {
        return Err(MathError::DimensionMismatch { expected: exposures.len(), actual: hits.len() });
    }

    Ok(Zip::from(hits)
        .and(exposures)
        .par_map_collect(|&h, &e| shrink_rate(h, e, population_rate, prior)))
}

/// Beta-binomial style smoother with a fixed pseudo-count prior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PseudoCountSmoother {
    prior: f64,
}

impl PseudoCountSmoother {
    /// Create a smoother.
    ///
    /// # Errors
    /// Returns `MathError::InvalidPriorCount` if `prior` is negative or not finite.
    pub fn new(prior: f64) -> Result<Self, MathError> {
        if !prior.is_finite() || prior < 0.0 {
            return Err(MathError::InvalidPriorCount(prior));
        }
        Ok(Self { prior })
    }

    /// Prior pseudo-count.
    #[must_use]
    pub const fn prior(&self) -> f64 {
        self.prior
    }
}

impl RateSmoother for PseudoCountSmoother {
    fn name(&self) -> &str {
        "pseudo_count"
    }

    fn smooth(&self, hits: f64, exposures: f64, population_rate: f64) -> f64 {
        shrink_rate(hits, exposures, population_rate, self.prior)
    }
}
