//! Rolling window aggregation.

use std::collections::BTreeMap;

use rayon::prelude::*;
use statline_math::SlidingWindow;
use statline_primitives::{DailyStat, PlayerId, Role, RollingFeatureRow, WindowStats};
use statline_traits::WindowAggregator;
use tracing::debug;

use crate::{WindowError, dense_timeline};

const DEFAULT_SHORT: SlidingWindow = fixed_window(7);
const DEFAULT_LONG: SlidingWindow = fixed_window(30);

/// Compile-time window of a known non-zero width.
const fn fixed_window(width: usize) -> SlidingWindow {
    match SlidingWindow::new(width) {
        Ok(window) => window,
        Err(_) => panic!("window width must be non-zero"),
    }
}

/// Configuration for rolling window aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingConfig {
    /// Short trailing window in calendar days.
    pub short_window: usize,
    /// Long trailing window in calendar days.
    pub long_window: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { short_window: DEFAULT_SHORT.width(), long_window: DEFAULT_LONG.width() }
    }
}

impl RollingConfig {
    /// Check `1 <= short_window <= long_window`.
    ///
    /// The ordering keeps the long window a superset of the short one.
    ///
    /// # Errors
    /// Returns `WindowError` if a width is zero or the short window is the wider one.
    pub fn validate(&self) -> Result<(), WindowError> {
        SlidingWindow::new(self.short_window)?;
        SlidingWindow::new(self.long_window)?;
        if self.short_window > self.long_window {
            return Err(WindowError::InvalidConfig(format!(
                "short window {} exceeds long window {}",
                self.short_window, self.long_window
            )));
        }
        Ok(())
    }
}

/// Column views of a dense timeline, one entry per calendar day.
#[derive(Debug, Default)]
struct DenseSeries {
    exposures: Vec<u32>,
    hits: Vec<u32>,
    strikeouts: Vec<u32>,
    walks: Vec<u32>,
    velocity: Vec<f64>,
}

impl DenseSeries {
    fn from_timeline(timeline: &[DailyStat]) -> Self {
        let mut series = Self::default();
        for day in timeline {
            series.exposures.push(day.exposures);
            series.hits.push(day.hits);
            series.strikeouts.push(day.strikeouts);
            series.walks.push(day.walks);
            series.velocity.push(day.mean_velocity);
        }
        series
    }

    fn window_stats(&self, window: SlidingWindow) -> Vec<WindowStats> {
        let exposures = window.sums(&self.exposures);
        let hits = window.sums(&self.hits);
        let strikeouts = window.sums(&self.strikeouts);
        let walks = window.sums(&self.walks);
        let velocity = window.means(&self.velocity);

        (0..exposures.len())
            .map(|i| {
                WindowStats::from_sums(exposures[i], hits[i], strikeouts[i], walks[i], velocity[i])
            })
            .collect()
    }
}

/// Trailing short and long window aggregator.
///
/// Each player is expanded to a dense daily timeline first, so a window of
/// width N always covers N calendar days (fewer at the start of the span).
/// Windows are causal: a row never sees days after its own date.
#[derive(Debug, Clone)]
pub struct RollingAggregator {
    config: RollingConfig,
    short: SlidingWindow,
    long: SlidingWindow,
}

impl RollingAggregator {
    /// Create an aggregator with 7 and 30 day windows.
    #[must_use]
    pub fn new() -> Self {
        let config = RollingConfig::default();
        Self {
            config,
            short: DEFAULT_SHORT,
            long: DEFAULT_LONG,
        }
    }

    /// Create an aggregator with custom window widths.
    ///
    /// # Errors
    /// Returns `WindowError` if the widths are invalid.
    pub fn with_config(config: RollingConfig) -> Result<Self, WindowError> {
        config.validate()?;
        Ok(Self {
            config,
            short: SlidingWindow::new(config.short_window)?,
            long: SlidingWindow::new(config.long_window)?,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RollingConfig {
        &self.config
    }

    /// Rolling rows for a single player's daily rollups.
    ///
    /// # Returns
    /// One row per calendar day between the first and last observed date.
    #[must_use]
    pub fn aggregate_player(&self, days: &[DailyStat]) -> Vec<RollingFeatureRow> {
        let timeline = dense_timeline(days);
        let series = DenseSeries::from_timeline(&timeline);
        let short_stats = series.window_stats(self.short);
        let long_stats = series.window_stats(self.long);

        timeline
            .iter()
            .zip(short_stats.into_iter().zip(long_stats))
            .map(|(day, (short, long))| {
                debug_assert!(long.exposures >= short.exposures);
                RollingFeatureRow {
                    player_id: day.player_id,
                    role: day.role,
                    date: day.date,
                    short,
                    long,
                }
            })
            .collect()
    }
}

impl Default for RollingAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowAggregator for RollingAggregator {
    fn short_window(&self) -> usize {
        self.config.short_window
    }

    fn long_window(&self) -> usize {
        self.config.long_window
    }

    fn aggregate(&self, daily: &[DailyStat]) -> Vec<RollingFeatureRow> {
        let mut partitions: BTreeMap<(Role, PlayerId), Vec<DailyStat>> = BTreeMap::new();
        for day in daily {
            partitions.entry((day.role, day.player_id)).or_default().push(day.clone());
        }
        let players = partitions.len();
        let partitions: Vec<Vec<DailyStat>> = partitions.into_values().collect();

        // Each task owns one player's slice; order is restored by the indexed collect.
        let per_player: Vec<Vec<RollingFeatureRow>> =
            partitions.par_iter().map(|days| self.aggregate_player(days)).collect();
        let rows: Vec<RollingFeatureRow> = per_player.into_iter().flatten().collect();

        debug!(
            component = "windows",
            event = "windows.rolling.done",
            players,
            daily_rows = daily.len(),
            dense_rows = rows.len(),
            short_window = self.config.short_window,
            long_window = self.config.long_window
        );

        rows
    }
}
