//! Window, season and feature record definitions.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::{Date, PlayerId, Role};

/// Hit rate with the zero-denominator guard applied.
///
/// Returns `None` when there is no exposure, so an undefined rate can never
/// be mistaken for a genuine 0% rate.
#[must_use]
pub fn guarded_rate(hits: u64, exposures: u64) -> Option<f64> {
    (exposures > 0).then(|| hits as f64 / exposures as f64)
}

/// Totals over one trailing window ending on a row's date.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowStats {
    /// Plate appearances in the window.
    pub exposures: u32,
    /// Hits in the window.
    pub hits: u32,
    /// Strikeouts in the window.
    pub strikeouts: u32,
    /// Walks in the window.
    pub walks: u32,
    /// `hits / exposures`, undefined when the window has no exposure.
    pub hit_rate: Option<f64>,
    /// Mean of the daily velocity means over the window days.
    pub mean_velocity: f64,
}

impl WindowStats {
    /// Build window stats from sums, deriving the guarded hit rate.
    #[must_use]
    pub fn from_sums(
        exposures: u32,
        hits: u32,
        strikeouts: u32,
        walks: u32,
        mean_velocity: f64,
    ) -> Self {
        debug_assert!(hits <= exposures, "hits {hits} exceed exposures {exposures}");
        Self {
            exposures,
            hits,
            strikeouts,
            walks,
            hit_rate: guarded_rate(u64::from(hits), u64::from(exposures)),
            mean_velocity,
        }
    }
}

/// Rolling short and long window features for one player on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingFeatureRow {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Side the features describe.
    pub role: Role,
    /// Date the windows end on (inclusive).
    pub date: Date,
    /// Short trailing window (7 days by default).
    pub short: WindowStats,
    /// Long trailing window (30 days by default).
    pub long: WindowStats,
}

/// Season totals for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStat {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Side the totals describe.
    pub role: Role,
    /// Calendar year of the season.
    pub year: i32,
    /// Plate appearances counted.
    pub exposures: u32,
    /// Hits counted.
    pub hits: u32,
    /// `hits / exposures`, undefined when there is no exposure.
    pub hit_rate: Option<f64>,
    /// Last date included for season-to-date values; `None` for whole-year totals.
    pub through: Option<Date>,
}

impl SeasonStat {
    /// Build a season stat, deriving the guarded hit rate.
    #[must_use]
    pub fn new(
        player_id: PlayerId,
        role: Role,
        year: i32,
        exposures: u32,
        hits: u32,
        through: Option<Date>,
    ) -> Self {
        Self {
            player_id,
            role,
            year,
            exposures,
            hits,
            hit_rate: guarded_rate(u64::from(hits), u64::from(exposures)),
            through,
        }
    }
}

/// Rolling row joined with its season aggregate, before smoothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedFeatureRow {
    /// Rolling window features.
    pub rolling: RollingFeatureRow,
    /// Matching season aggregate; `None` only when season aggregation missed the row.
    pub season: Option<SeasonStat>,
}

impl MergedFeatureRow {
    /// Calendar year of the row.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.rolling.date.year()
    }
}

/// Raw and shrinkage-smoothed hit rate for one window.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateFeature {
    /// Plate appearances behind the rate.
    pub exposures: u32,
    /// Hits behind the rate.
    pub hits: u32,
    /// Raw rate, undefined without exposure.
    pub raw: Option<f64>,
    /// Smoothed rate; equals the global rate when there is no exposure.
    pub smoothed: f64,
}

/// Terminal feature row: one per (player, role, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Side the features describe.
    pub role: Role,
    /// Feature date.
    pub date: Date,
    /// Short window hit rate.
    pub short: RateFeature,
    /// Long window hit rate.
    pub long: RateFeature,
    /// Season hit rate; counts are zero when `has_season` is false.
    pub season: RateFeature,
    /// Whether a season aggregate matched this row.
    pub has_season: bool,
    /// Strikeouts in the short window.
    pub strikeouts_short: u32,
    /// Walks in the short window.
    pub walks_short: u32,
    /// Strikeouts in the long window.
    pub strikeouts_long: u32,
    /// Walks in the long window.
    pub walks_long: u32,
    /// Mean velocity over the short window.
    pub velocity_short: f64,
    /// Mean velocity over the long window.
    pub velocity_long: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guarded_rate_undefined_without_exposure() {
        assert_eq!(guarded_rate(0, 0), None);
        assert_eq!(guarded_rate(1, 4), Some(0.25));
    }

    #[test]
    fn window_stats_from_sums() {
        let stats = WindowStats::from_sums(2, 1, 0, 1, 93.0);
        assert_eq!(stats.hit_rate, Some(0.5));

        let empty = WindowStats::from_sums(0, 0, 0, 0, 0.0);
        assert_eq!(empty.hit_rate, None);
    }

    #[test]
    fn season_stat_rate() {
        let stat = SeasonStat::new(PlayerId::new(1), Role::Batter, 2024, 10, 3, None);
        assert_eq!(stat.hit_rate, Some(0.3));
        assert_eq!(stat.through, None);
    }
}
