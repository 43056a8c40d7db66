//! Shrinkage smoothing of window hit rates.

use ndarray::{Array1, Zip};
use statline_math::{MathError, population_rate};
use statline_primitives::{FeatureRecord, MergedFeatureRow, RateFeature};
use statline_traits::RateSmoother;
use tracing::{debug, info};

use crate::PriorCounts;

/// Population hit rate of each window over a whole table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalRates {
    /// Short window rate.
    pub short: f64,
    /// Long window rate.
    pub long: f64,
    /// Season rate.
    pub season: f64,
}

/// Output of [`ShrinkageSmoother::smooth`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Smoothed {
    /// One record per merged row, same order.
    pub records: Vec<FeatureRecord>,
    /// Rates each window was shrunk toward.
    pub global: GlobalRates,
}

/// Hits and exposures of one window as float columns.
struct WindowColumn {
    label: &'static str,
    hits: Array1<f64>,
    exposures: Array1<f64>,
}

impl WindowColumn {
    fn collect(
        label: &'static str,
        rows: &[MergedFeatureRow],
        pick: impl Fn(&MergedFeatureRow) -> (u32, u32),
    ) -> Self {
        let (hits, exposures): (Vec<f64>, Vec<f64>) =
            rows.iter().map(pick).map(|(h, e)| (f64::from(h), f64::from(e))).unzip();
        Self { label, hits: Array1::from_vec(hits), exposures: Array1::from_vec(exposures) }
    }

    /// Reduce pass: the pooled rate of the window.
    fn global_rate(&self, prior: f64) -> Result<f64, MathError> {
        let rate = population_rate(&self.hits, &self.exposures)?;
        info!(
            component = "pipeline",
            event = "pipeline.smooth.global_rate",
            window = self.label,
            total_hits = self.hits.sum(),
            total_exposures = self.exposures.sum(),
            global_rate = rate,
            prior,
        );
        Ok(rate)
    }

    /// Map pass: every row shrunk toward `rate`.
    fn shrink(&self, smoother: &impl RateSmoother, rate: f64) -> Array1<f64> {
        let fallbacks = self.exposures.iter().filter(|&&e| e <= 0.0).count();
        debug!(
            component = "pipeline",
            event = "pipeline.smooth.fallback",
            window = self.label,
            smoother = smoother.name(),
            fallbacks,
            "rows without exposure set to the global rate"
        );
        Zip::from(&self.hits)
            .and(&self.exposures)
            .map_collect(|&hits, &exposures| smoother.smooth(hits, exposures, rate))
    }
}

/// Pseudo-count shrinkage of the short, long and season hit rates.
///
/// Runs in two passes. The first computes each window's population rate
/// over every row of the table, batters and pitchers together; rows without
/// a season contribute nothing to the season rate. The second pass blends
/// each row's rate with it:
///
/// `smoothed = (hits + prior * p) / (exposures + prior)`, or exactly `p`
/// when the row has no exposure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShrinkageSmoother {
    priors: PriorCounts,
}

impl ShrinkageSmoother {
    /// Create a smoother with priors 10 / 40 / 200.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a smoother with custom priors.
    ///
    /// # Errors
    /// Returns `MathError::InvalidPriorCount` if a prior is negative or not finite.
    pub fn with_priors(priors: PriorCounts) -> Result<Self, MathError> {
        priors.smoothers()?;
        Ok(Self { priors })
    }

    /// Get the priors.
    #[must_use]
    pub const fn priors(&self) -> &PriorCounts {
        &self.priors
    }

    /// Smooth every row of a merged table.
    ///
    /// # Errors
    /// Returns `MathError` if a prior is invalid.
    pub fn smooth(&self, rows: &[MergedFeatureRow]) -> Result<Smoothed, MathError> {
        let smoothers = self.priors.smoothers()?;
        let columns = [
            WindowColumn::collect("short", rows, |r| {
                (r.rolling.short.hits, r.rolling.short.exposures)
            }),
            WindowColumn::collect("long", rows, |r| {
                (r.rolling.long.hits, r.rolling.long.exposures)
            }),
            WindowColumn::collect("season", rows, |r| {
                r.season.as_ref().map_or((0, 0), |s| (s.hits, s.exposures))
            }),
        ];

        let mut rates = [0.0; 3];
        for (i, column) in columns.iter().enumerate() {
            rates[i] = column.global_rate(smoothers[i].prior())?;
        }

        let [short, long, season] =
            [0, 1, 2].map(|i| columns[i].shrink(&smoothers[i], rates[i]));

        let records = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let r = &row.rolling;
                let (season_exposures, season_hits, season_raw) =
                    row.season.as_ref().map_or((0, 0, None), |s| (s.exposures, s.hits, s.hit_rate));

                FeatureRecord {
                    player_id: r.player_id,
                    role: r.role,
                    date: r.date,
                    short: RateFeature {
                        exposures: r.short.exposures,
                        hits: r.short.hits,
                        raw: r.short.hit_rate,
                        smoothed: short[i],
                    },
                    long: RateFeature {
                        exposures: r.long.exposures,
                        hits: r.long.hits,
                        raw: r.long.hit_rate,
                        smoothed: long[i],
                    },
                    season: RateFeature {
                        exposures: season_exposures,
                        hits: season_hits,
                        raw: season_raw,
                        smoothed: season[i],
                    },
                    has_season: row.season.is_some(),
                    strikeouts_short: r.short.strikeouts,
                    walks_short: r.short.walks,
                    strikeouts_long: r.long.strikeouts,
                    walks_long: r.long.walks,
                    velocity_short: r.short.mean_velocity,
                    velocity_long: r.long.mean_velocity,
                }
            })
            .collect();

        Ok(Smoothed {
            records,
            global: GlobalRates { short: rates[0], long: rates[1], season: rates[2] },
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use statline_math::PseudoCountSmoother;
    use statline_primitives::{Date, PlayerId, Role, RollingFeatureRow, SeasonStat, WindowStats};

    use super::*;

    /// Counts are `(exposures, hits)`.
    fn merged(
        player: u64,
        short: (u32, u32),
        long: (u32, u32),
        season: Option<(u32, u32)>,
    ) -> MergedFeatureRow {
        let date = Date::from_ymd_opt(2024, 7, 1).unwrap();
        let id = PlayerId::new(player);
        MergedFeatureRow {
            rolling: RollingFeatureRow {
                player_id: id,
                role: Role::Batter,
                date,
                short: WindowStats::from_sums(short.0, short.1, 0, 0, 0.0),
                long: WindowStats::from_sums(long.0, long.1, 0, 0, 0.0),
            },
            season: season.map(|(e, h)| SeasonStat::new(id, Role::Batter, 2024, e, h, None)),
        }
    }

    #[test]
    fn one_hit_in_two_with_global_point_three() {
        // Short window pools to 3 / 10 = 0.3 across the two rows.
        let rows =
            vec![merged(1, (2, 1), (2, 1), Some((2, 1))), merged(2, (8, 2), (8, 2), Some((8, 2)))];
        let out = ShrinkageSmoother::new().smooth(&rows).unwrap();

        assert_relative_eq!(out.global.short, 0.3, epsilon = 1e-12);
        assert_relative_eq!(out.records[0].short.smoothed, 4.0 / 12.0, epsilon = 1e-12);
        assert_eq!(out.records[0].short.raw, Some(0.5));
    }

    #[test]
    fn zero_exposure_gets_global_rate_exactly() {
        let rows =
            vec![merged(1, (0, 0), (4, 1), Some((4, 1))), merged(2, (5, 2), (5, 2), Some((5, 2)))];
        let out = ShrinkageSmoother::new().smooth(&rows).unwrap();

        assert_eq!(out.records[0].short.raw, None);
        assert_eq!(out.records[0].short.smoothed, out.global.short);
        assert_relative_eq!(out.global.short, 0.4, epsilon = 1e-12);
    }

    #[test]
    fn missing_season_contributes_nothing() {
        let rows = vec![merged(1, (1, 1), (1, 1), None), merged(2, (4, 1), (4, 1), Some((4, 1)))];
        let out = ShrinkageSmoother::new().smooth(&rows).unwrap();

        assert_relative_eq!(out.global.season, 0.25, epsilon = 1e-12);
        assert!(!out.records[0].has_season);
        assert_eq!(out.records[0].season.exposures, 0);
        assert_eq!(out.records[0].season.raw, None);
        assert_eq!(out.records[0].season.smoothed, 0.25);
        assert!(out.records[1].has_season);
    }

    #[test]
    fn smoothed_between_raw_and_global() {
        let rows: Vec<MergedFeatureRow> = (0..20u32)
            .map(|i| {
                let e = i % 7;
                let h = (i * 3) % (e + 1);
                merged(u64::from(i), (e, h), (e * 3, h * 2), Some((e * 10, h * 5)))
            })
            .collect();
        let out = ShrinkageSmoother::new().smooth(&rows).unwrap();

        for record in &out.records {
            for (feature, p) in [
                (record.short, out.global.short),
                (record.long, out.global.long),
                (record.season, out.global.season),
            ] {
                let raw = feature.raw.unwrap_or(p);
                assert!(feature.smoothed >= raw.min(p) - 1e-12);
                assert!(feature.smoothed <= raw.max(p) + 1e-12);
            }
        }
    }

    #[test]
    fn each_window_uses_its_own_pseudo_count() {
        let rows = vec![
            merged(1, (3, 2), (9, 4), Some((30, 9))),
            merged(2, (1, 0), (6, 1), Some((25, 6))),
        ];
        let out = ShrinkageSmoother::new().smooth(&rows).unwrap();
        let [short, long, season] = PriorCounts::default().smoothers().unwrap();

        for (record, row) in out.records.iter().zip(&rows) {
            let expected = |smoother: &PseudoCountSmoother, hits: u32, exposures: u32, p: f64| {
                smoother.smooth(f64::from(hits), f64::from(exposures), p)
            };
            let r = &row.rolling;
            let s = row.season.as_ref().unwrap();
            assert_eq!(
                record.short.smoothed,
                expected(&short, r.short.hits, r.short.exposures, out.global.short)
            );
            assert_eq!(
                record.long.smoothed,
                expected(&long, r.long.hits, r.long.exposures, out.global.long)
            );
            assert_eq!(
                record.season.smoothed,
                expected(&season, s.hits, s.exposures, out.global.season)
            );
        }
        assert_eq!(short.name(), "pseudo_count");
    }

    #[test]
    fn empty_table() {
        let out = ShrinkageSmoother::new().smooth(&[]).unwrap();
        assert!(out.records.is_empty());
        assert_eq!(out.global, GlobalRates::default());
    }

    #[test]
    fn custom_priors_validated() {
        let priors = PriorCounts { season: -5.0, ..PriorCounts::default() };
        assert!(ShrinkageSmoother::with_priors(priors).is_err());

        let zero = PriorCounts { short: 0.0, long: 0.0, season: 0.0 };
        let smoother = ShrinkageSmoother::with_priors(zero).unwrap();
        let out = smoother.smooth(&[merged(1, (4, 1), (4, 1), Some((4, 1)))]).unwrap();
        // Without a prior the smoothed rate is the raw rate.
        assert_eq!(out.records[0].short.smoothed, 0.25);
    }
}
