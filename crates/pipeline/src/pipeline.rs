//! End-to-end feature construction.

use statline_events::{PlateAppearanceReducer, daily_rollup};
use statline_primitives::{MergedFeatureRow, RawEvent, Role};
use statline_traits::{EventReducer, WindowAggregator};
use statline_windows::{RollingAggregator, SeasonAggregator};
use tracing::{info, warn};

use crate::{
    FeatureTable, PipelineConfig, PipelineError, ShrinkageSmoother, merge_with_season, union_roles,
};

/// Builds smoothed rolling features from raw events.
///
/// Stages, per role: plate-appearance reduction, daily rollup, rolling
/// windows, season totals, merge. The role tables are then unioned and
/// smoothed together. The pipeline holds no state between runs, so the same
/// input always yields the same table.
#[derive(Debug, Clone)]
pub struct FeaturePipeline {
    config: PipelineConfig,
    reducer: PlateAppearanceReducer,
    rolling: RollingAggregator,
    season: SeasonAggregator,
    smoother: ShrinkageSmoother,
}

impl FeaturePipeline {
    /// Create a pipeline with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        Self {
            reducer: PlateAppearanceReducer::with_config(config.reducer.clone()),
            rolling: RollingAggregator::new(),
            season: SeasonAggregator::with_mode(config.season_mode),
            smoother: ShrinkageSmoother::new(),
            config,
        }
    }

    /// Create a pipeline with a custom configuration.
    ///
    /// # Errors
    /// Returns `PipelineError` if the configuration is invalid.
    pub fn with_config(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self {
            reducer: PlateAppearanceReducer::with_config(config.reducer.clone()),
            rolling: RollingAggregator::with_config(config.rolling)?,
            season: SeasonAggregator::with_mode(config.season_mode),
            smoother: ShrinkageSmoother::with_priors(config.priors)?,
            config,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Merged rolling and season rows for one role.
    ///
    /// A role without any usable event yields an empty table.
    ///
    /// # Errors
    /// Returns `PipelineError::Event` if reduction fails under the strict
    /// malformed-event policy.
    pub fn role_table(
        &self,
        events: &[RawEvent],
        role: Role,
    ) -> Result<Vec<MergedFeatureRow>, PipelineError> {
        let reduction = match self.reducer.reduce(events, role) {
            Ok(reduction) => reduction,
            Err(err) if err.is_recoverable() => {
                info!(
                    component = "pipeline",
                    event = "pipeline.role.empty",
                    role = %role,
                    reason = %err
                );
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let daily = daily_rollup(&reduction.appearances);
        let rolling = self.rolling.aggregate(&daily);
        let seasons = self.season.aggregate(&daily);

        info!(
            component = "pipeline",
            event = "pipeline.role.done",
            role = %role,
            appearances = reduction.len(),
            dropped = reduction.dropped,
            daily_rows = daily.len(),
            feature_rows = rolling.len(),
            seasons = seasons.len()
        );

        Ok(merge_with_season(rolling, &seasons))
    }

    /// Run the pipeline.
    ///
    /// # Arguments
    /// * `events` - Raw events in any order
    ///
    /// # Returns
    /// One smoothed record per (player, role, date) across each player's
    /// observed span; batter rows first, each role sorted by player and date.
    ///
    /// # Errors
    /// Returns `PipelineError` if reduction fails under the strict
    /// malformed-event policy.
    pub fn run(&self, events: &[RawEvent]) -> Result<FeatureTable, PipelineError> {
        info!(
            component = "pipeline",
            event = "pipeline.run.start",
            events = events.len(),
            short_window = self.config.rolling.short_window,
            long_window = self.config.rolling.long_window,
            season_mode = ?self.config.season_mode
        );

        let batters = self.role_table(events, Role::Batter)?;
        let pitchers = self.role_table(events, Role::Pitcher)?;
        let merged = union_roles(batters, pitchers);

        let smoothed = self.smoother.smooth(&merged)?;
        let table = FeatureTable::new(smoothed.records, smoothed.global, self.config.rolling);

        if table.is_empty() && !events.is_empty() {
            warn!(
                component = "pipeline",
                event = "pipeline.run.no_features",
                events = events.len(),
                "no feature rows produced from a non-empty input"
            );
        }
        info!(
            component = "pipeline",
            event = "pipeline.run.done",
            rows = table.len(),
            batter_rows = table.role(Role::Batter).count(),
            pitcher_rows = table.role(Role::Pitcher).count()
        );

        Ok(table)
    }
}

impl Default for FeaturePipeline {
    fn default() -> Self {
        Self::new()
    }
}
