//! Rate smoothing trait definitions.

/// Converts a sparse empirical rate into a smoothed rate.
pub trait RateSmoother: Send + Sync {
    /// Returns the name of this smoother.
    fn name(&self) -> &str;

    /// Smooth `hits / exposures` toward `population_rate`.
    ///
    /// With no exposure the result is `population_rate`.
    fn smooth(&self, hits: f64, exposures: f64, population_rate: f64) -> f64;
}
