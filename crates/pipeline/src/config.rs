//! Pipeline configuration.

use statline_events::ReducerConfig;
use statline_math::{MathError, PseudoCountSmoother};
use statline_windows::{RollingConfig, SeasonMode};

use crate::{PipelineError, RosterConfig};

/// Shrinkage prior pseudo-counts per window.
///
/// Wider windows carry more evidence, so they get a stronger prior to stay
/// comparable in how far small samples are pulled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorCounts {
    /// Prior for the short window.
    pub short: f64,
    /// Prior for the long window.
    pub long: f64,
    /// Prior for the season.
    pub season: f64,
}

impl Default for PriorCounts {
    fn default() -> Self {
        Self { short: 10.0, long: 40.0, season: 200.0 }
    }
}

impl PriorCounts {
    /// Build one smoother per window, in short, long, season order.
    ///
    /// # Errors
    /// Returns `MathError::InvalidPriorCount` if any prior is negative or not finite.
    pub fn smoothers(&self) -> Result<[PseudoCountSmoother; 3], MathError> {
        Ok([
            PseudoCountSmoother::new(self.short)?,
            PseudoCountSmoother::new(self.long)?,
            PseudoCountSmoother::new(self.season)?,
        ])
    }
}

/// Full pipeline configuration. Every field has a working default.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Rolling window widths.
    pub rolling: RollingConfig,
    /// Shrinkage priors.
    pub priors: PriorCounts,
    /// Season aggregation mode.
    pub season_mode: SeasonMode,
    /// Outcome taxonomy and malformed-event policy.
    pub reducer: ReducerConfig,
    /// Roster column resolution.
    pub roster: RosterConfig,
}

impl PipelineConfig {
    /// Check the configuration before running.
    ///
    /// # Errors
    /// Returns `PipelineError` for invalid windows, invalid priors, or a
    /// taxonomy that lists one code under several outcomes.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.rolling.validate()?;
        self.priors.smoothers()?;

        let overlaps = self.reducer.taxonomy.overlapping_codes();
        if !overlaps.is_empty() {
            return Err(PipelineError::InvalidConfig(format!(
                "outcome codes listed under more than one outcome: {}",
                overlaps.join(", ")
            )));
        }

        if self.roster.key_candidates.is_empty() {
            return Err(PipelineError::InvalidConfig("roster key candidates are empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn config_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.rolling.short_window, 7);
        assert_eq!(config.rolling.long_window, 30);
        assert_eq!(config.priors, PriorCounts { short: 10.0, long: 40.0, season: 200.0 });
        assert_eq!(config.season_mode, SeasonMode::CalendarTotal);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn invalid_prior(#[case] prior: f64) {
        let config = PipelineConfig {
            priors: PriorCounts { long: prior, ..PriorCounts::default() },
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PipelineError::Math(MathError::InvalidPriorCount(_)))
        ));
    }

    #[test]
    fn zero_prior_allowed() {
        let priors = PriorCounts { short: 0.0, long: 0.0, season: 0.0 };
        assert!(priors.smoothers().is_ok());
    }

    #[test]
    fn invalid_windows() {
        let config = PipelineConfig {
            rolling: RollingConfig { short_window: 30, long_window: 7 },
            ..PipelineConfig::default()
        };
        assert!(matches!(config.validate(), Err(PipelineError::Window(_))));
    }

    #[test]
    fn overlapping_taxonomy_rejected() {
        let mut config = PipelineConfig::default();
        config.reducer.taxonomy.strikeouts.push("walk".to_string());
        match config.validate() {
            Err(PipelineError::InvalidConfig(msg)) => assert!(msg.contains("walk")),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }
}
