//! Terminal feature table.

use polars::prelude::*;
use statline_primitives::{Date, FeatureRecord, Role};
use statline_windows::RollingConfig;

use crate::{GlobalRates, PipelineError};

/// Smoothed features for every (player, role, date), batters first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    records: Vec<FeatureRecord>,
    global: GlobalRates,
    windows: RollingConfig,
}

impl FeatureTable {
    /// Create a table.
    #[must_use]
    pub const fn new(
        records: Vec<FeatureRecord>,
        global: GlobalRates,
        windows: RollingConfig,
    ) -> Self {
        Self { records, global, windows }
    }

    /// All records.
    #[must_use]
    pub fn records(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Rates each window was shrunk toward.
    #[must_use]
    pub const fn global_rates(&self) -> &GlobalRates {
        &self.global
    }

    /// Window widths the table was built with.
    #[must_use]
    pub const fn windows(&self) -> &RollingConfig {
        &self.windows
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one role.
    pub fn role(&self, role: Role) -> impl Iterator<Item = &FeatureRecord> {
        self.records.iter().filter(move |r| r.role == role)
    }

    /// Render the table as a `DataFrame`.
    ///
    /// Window columns are suffixed with the window width in days, so the
    /// default configuration yields `pa_7d`, `hit_rate_30d_smooth` and so on.
    /// Undefined raw rates are null. Season counts are null on rows without
    /// a season aggregate.
    ///
    /// # Errors
    /// Returns `PipelineError::Polars` if the frame cannot be assembled.
    pub fn to_frame(&self) -> Result<DataFrame, PipelineError> {
        let records = &self.records;
        let short = format!("{}d", self.windows.short_window);
        let long = format!("{}d", self.windows.long_window);

        let u32_column = |name: String, pick: fn(&FeatureRecord) -> u32| {
            Column::new(name.into(), records.iter().map(pick).collect::<Vec<u32>>())
        };
        let f64_column = |name: String, pick: fn(&FeatureRecord) -> f64| {
            Column::new(name.into(), records.iter().map(pick).collect::<Vec<f64>>())
        };
        let rate_column = |name: String, pick: fn(&FeatureRecord) -> Option<f64>| {
            Column::new(name.into(), records.iter().map(pick).collect::<Vec<Option<f64>>>())
        };
        let season_count = |name: String, pick: fn(&FeatureRecord) -> u32| {
            let values: Vec<Option<u32>> =
                records.iter().map(|r| r.has_season.then(|| pick(r))).collect();
            Column::new(name.into(), values)
        };

        let player_ids: Vec<u64> = records.iter().map(|r| r.player_id.get()).collect();
        let roles: Vec<&str> = records.iter().map(|r| r.role.as_str()).collect();
        let dates: Vec<Date> = records.iter().map(|r| r.date).collect();

        let columns = vec![
            Column::new("player_id".into(), player_ids),
            Column::new("role".into(), roles),
            Column::new("date".into(), dates),
            u32_column(format!("pa_{short}"), |r| r.short.exposures),
            u32_column(format!("hits_{short}"), |r| r.short.hits),
            rate_column(format!("hit_rate_{short}"), |r| r.short.raw),
            f64_column(format!("hit_rate_{short}_smooth"), |r| r.short.smoothed),
            u32_column(format!("so_{short}"), |r| r.strikeouts_short),
            u32_column(format!("bb_{short}"), |r| r.walks_short),
            f64_column(format!("velo_{short}"), |r| r.velocity_short),
            u32_column(format!("pa_{long}"), |r| r.long.exposures),
            u32_column(format!("hits_{long}"), |r| r.long.hits),
            rate_column(format!("hit_rate_{long}"), |r| r.long.raw),
            f64_column(format!("hit_rate_{long}_smooth"), |r| r.long.smoothed),
            u32_column(format!("so_{long}"), |r| r.strikeouts_long),
            u32_column(format!("bb_{long}"), |r| r.walks_long),
            f64_column(format!("velo_{long}"), |r| r.velocity_long),
            season_count("pa_season".to_string(), |r| r.season.exposures),
            season_count("hits_season".to_string(), |r| r.season.hits),
            rate_column("hit_rate_season".to_string(), |r| r.season.raw),
            f64_column("hit_rate_season_smooth".to_string(), |r| r.season.smoothed),
        ];

        Ok(DataFrame::new(columns)?)
    }
}

#[cfg(test)]
mod tests {
    use statline_primitives::{PlayerId, RateFeature};

    use super::*;

    fn record(player: u64, role: Role, has_season: bool) -> FeatureRecord {
        let rate = |exposures: u32, hits: u32, smoothed: f64| RateFeature {
            exposures,
            hits,
            raw: (exposures > 0).then(|| f64::from(hits) / f64::from(exposures)),
            smoothed,
        };
        FeatureRecord {
            player_id: PlayerId::new(player),
            role,
            date: Date::from_ymd_opt(2024, 5, 10).unwrap(),
            short: rate(0, 0, 0.25),
            long: rate(4, 1, 0.26),
            season: if has_season { rate(40, 11, 0.27) } else { rate(0, 0, 0.24) },
            has_season,
            strikeouts_short: 0,
            walks_short: 0,
            strikeouts_long: 1,
            walks_long: 1,
            velocity_short: 0.0,
            velocity_long: 93.2,
        }
    }

    fn table() -> FeatureTable {
        FeatureTable::new(
            vec![record(1, Role::Batter, true), record(50, Role::Pitcher, false)],
            GlobalRates { short: 0.25, long: 0.26, season: 0.24 },
            RollingConfig::default(),
        )
    }

    #[test]
    fn stable_column_set() {
        let df = table().to_frame().unwrap();
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            [
                "player_id",
                "role",
                "date",
                "pa_7d",
                "hits_7d",
                "hit_rate_7d",
                "hit_rate_7d_smooth",
                "so_7d",
                "bb_7d",
                "velo_7d",
                "pa_30d",
                "hits_30d",
                "hit_rate_30d",
                "hit_rate_30d_smooth",
                "so_30d",
                "bb_30d",
                "velo_30d",
                "pa_season",
                "hits_season",
                "hit_rate_season",
                "hit_rate_season_smooth",
            ]
        );
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn undefined_values_are_null() {
        let df = table().to_frame().unwrap();

        let short_rate = df.column("hit_rate_7d").unwrap().f64().unwrap();
        assert_eq!(short_rate.get(0), None);
        assert_eq!(df.column("hit_rate_7d_smooth").unwrap().f64().unwrap().get(0), Some(0.25));

        let pa_season = df.column("pa_season").unwrap().u32().unwrap();
        assert_eq!(pa_season.get(0), Some(40));
        assert_eq!(pa_season.get(1), None);
        assert_eq!(df.column("hit_rate_season").unwrap().f64().unwrap().get(1), None);
    }

    #[test]
    fn custom_window_suffixes() {
        let table = FeatureTable::new(
            vec![record(1, Role::Batter, true)],
            GlobalRates::default(),
            RollingConfig { short_window: 3, long_window: 14 },
        );
        let df = table.to_frame().unwrap();
        assert!(df.column("pa_3d").is_ok());
        assert!(df.column("velo_14d").is_ok());
    }

    #[test]
    fn role_filter() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.role(Role::Pitcher).count(), 1);
        assert_eq!(table.role(Role::Batter).next().unwrap().player_id, PlayerId::new(1));
    }

    #[test]
    fn empty_table_renders_empty_frame() {
        let df = FeatureTable::default().to_frame().unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 21);
    }
}
