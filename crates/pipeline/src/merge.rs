//! Merging rolling and season aggregates.

use statline_primitives::{MergedFeatureRow, Role, RollingFeatureRow};
use statline_windows::SeasonTable;
use tracing::warn;

/// Left-join rolling rows with their season values.
///
/// Every rolling row is kept. A row whose player is unknown to `seasons`
/// keeps `season = None`; such rows indicate the two aggregates were built
/// from different inputs and are counted in a `warn` log.
#[must_use]
pub fn merge_with_season(
    rows: Vec<RollingFeatureRow>,
    seasons: &SeasonTable,
) -> Vec<MergedFeatureRow> {
    let mut unmatched = 0usize;

    let merged: Vec<MergedFeatureRow> = rows
        .into_iter()
        .map(|rolling| {
            let season = seasons.lookup(rolling.role, rolling.player_id, rolling.date);
            if season.is_none() {
                unmatched += 1;
            }
            MergedFeatureRow { rolling, season }
        })
        .collect();

    if unmatched > 0 {
        warn!(
            component = "pipeline",
            event = "pipeline.merge.unmatched",
            unmatched,
            rows = merged.len(),
            "rolling rows without a season aggregate"
        );
    }

    merged
}

/// Union batter and pitcher tables into one role-tagged table.
///
/// Batter rows come first. Within a role the input order is kept.
#[must_use]
pub fn union_roles(
    batters: Vec<MergedFeatureRow>,
    pitchers: Vec<MergedFeatureRow>,
) -> Vec<MergedFeatureRow> {
    debug_assert!(batters.iter().all(|r| r.rolling.role == Role::Batter));
    debug_assert!(pitchers.iter().all(|r| r.rolling.role == Role::Pitcher));

    let mut rows = batters;
    rows.extend(pitchers);
    rows
}

#[cfg(test)]
mod tests {
    use statline_primitives::{DailyStat, Date, PlayerId};
    use statline_traits::WindowAggregator;
    use statline_windows::{RollingAggregator, SeasonAggregator, SeasonMode};

    use super::*;

    fn day(player: u64, role: Role, d: u32, exposures: u32, hits: u32) -> DailyStat {
        DailyStat {
            exposures,
            hits,
            ..DailyStat::empty(PlayerId::new(player), role, Date::from_ymd_opt(2024, 6, d).unwrap())
        }
    }

    #[test]
    fn every_rolling_row_gets_its_season() {
        let daily = vec![day(1, Role::Batter, 1, 4, 2), day(1, Role::Batter, 5, 4, 0)];
        let rolling = RollingAggregator::new().aggregate(&daily);
        let seasons = SeasonAggregator::new().aggregate(&daily);

        let merged = merge_with_season(rolling, &seasons);
        assert_eq!(merged.len(), 5);
        for row in &merged {
            let season = row.season.as_ref().unwrap();
            assert_eq!(season.exposures, 8);
            assert_eq!(season.hits, 2);
            assert_eq!(season.year, row.year());
        }
    }

    #[test]
    fn season_to_date_follows_row_date() {
        let daily = vec![day(1, Role::Batter, 1, 4, 2), day(1, Role::Batter, 3, 2, 2)];
        let rolling = RollingAggregator::new().aggregate(&daily);
        let seasons = SeasonAggregator::with_mode(SeasonMode::ToDate).aggregate(&daily);

        let merged = merge_with_season(rolling, &seasons);
        let exposures: Vec<u32> =
            merged.iter().map(|r| r.season.as_ref().unwrap().exposures).collect();
        assert_eq!(exposures, vec![4, 4, 6]);
    }

    #[test]
    fn unmatched_rows_are_kept() {
        let batters = vec![day(1, Role::Batter, 1, 1, 1)];
        let rolling = RollingAggregator::new().aggregate(&batters);
        let seasons = SeasonAggregator::new().aggregate(&[day(2, Role::Batter, 1, 1, 0)]);

        let merged = merge_with_season(rolling, &seasons);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].season.is_none());
    }

    #[test]
    fn union_keeps_batters_first() {
        let batters = vec![day(9, Role::Batter, 1, 1, 0)];
        let pitchers = vec![day(1, Role::Pitcher, 1, 3, 1)];
        let merge = |daily: &[DailyStat]| {
            merge_with_season(
                RollingAggregator::new().aggregate(daily),
                &SeasonAggregator::new().aggregate(daily),
            )
        };

        let rows = union_roles(merge(&batters), merge(&pitchers));
        let roles: Vec<Role> = rows.iter().map(|r| r.rolling.role).collect();
        assert_eq!(roles, vec![Role::Batter, Role::Pitcher]);
    }
}
