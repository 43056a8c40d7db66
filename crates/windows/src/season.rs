//! Season aggregation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use statline_primitives::{DailyStat, Date, PlayerId, Role, SeasonStat};
use tracing::debug;

/// How season values relate to a row's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeasonMode {
    /// Whole calendar year totals, attached to every date of the year.
    ///
    /// Not causal: rows early in the year see later results.
    #[default]
    CalendarTotal,
    /// Cumulative totals from January 1 through the row's date, inclusive.
    ToDate,
}

/// One observed day in a season's running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Checkpoint {
    date: Date,
    exposures: u32,
    hits: u32,
}

/// Season values for every (role, player, year) seen in the input.
#[derive(Debug, Clone, Default)]
pub struct SeasonTable {
    mode: SeasonMode,
    /// Running totals per season, in date order.
    seasons: BTreeMap<(Role, PlayerId, i32), Vec<Checkpoint>>,
    players: BTreeSet<(Role, PlayerId)>,
}

impl SeasonTable {
    /// Mode the table answers lookups in.
    #[must_use]
    pub const fn mode(&self) -> SeasonMode {
        self.mode
    }

    /// Number of (role, player, year) seasons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    /// Whether the table holds no season.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Season value for a player on a date.
    ///
    /// A player seen in other years but not in the date's year gets a
    /// zero-exposure stat. Returns `None` only for a player the table has
    /// never seen in this role.
    #[must_use]
    pub fn lookup(&self, role: Role, player_id: PlayerId, date: Date) -> Option<SeasonStat> {
        let year = date.year();
        let Some(checkpoints) = self.seasons.get(&(role, player_id, year)) else {
            return self
                .players
                .contains(&(role, player_id))
                .then(|| SeasonStat::new(player_id, role, year, 0, 0, self.through(date)));
        };

        let reached = match self.mode {
            SeasonMode::CalendarTotal => checkpoints.last(),
            SeasonMode::ToDate => {
                let end = checkpoints.partition_point(|c| c.date <= date);
                end.checked_sub(1).map(|i| &checkpoints[i])
            }
        };
        let (exposures, hits) = reached.map_or((0, 0), |c| (c.exposures, c.hits));

        Some(SeasonStat::new(player_id, role, year, exposures, hits, self.through(date)))
    }

    /// Whole-year totals for every season, ordered by role, player, year.
    pub fn totals(&self) -> impl Iterator<Item = SeasonStat> + '_ {
        self.seasons.iter().map(|(&(role, player_id, year), checkpoints)| {
            let (exposures, hits) = checkpoints.last().map_or((0, 0), |c| (c.exposures, c.hits));
            SeasonStat::new(player_id, role, year, exposures, hits, None)
        })
    }

    const fn through(&self, date: Date) -> Option<Date> {
        match self.mode {
            SeasonMode::CalendarTotal => None,
            SeasonMode::ToDate => Some(date),
        }
    }
}

/// Builds per-player season totals from daily rollups.
#[derive(Debug, Clone, Default)]
pub struct SeasonAggregator {
    mode: SeasonMode,
}

impl SeasonAggregator {
    /// Create an aggregator producing whole-year totals.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with the given mode.
    #[must_use]
    pub const fn with_mode(mode: SeasonMode) -> Self {
        Self { mode }
    }

    /// Get the mode.
    #[must_use]
    pub const fn mode(&self) -> SeasonMode {
        self.mode
    }

    /// Aggregate daily rollups into season values.
    ///
    /// Daily exposures already count distinct plate appearances, so season
    /// totals are plain sums of the days in the year.
    #[must_use]
    pub fn aggregate(&self, daily: &[DailyStat]) -> SeasonTable {
        let mut by_day: BTreeMap<(Role, PlayerId, i32), BTreeMap<Date, (u32, u32)>> =
            BTreeMap::new();
        let mut players = BTreeSet::new();

        for day in daily {
            players.insert((day.role, day.player_id));
            let totals = by_day
                .entry((day.role, day.player_id, day.date.year()))
                .or_default()
                .entry(day.date)
                .or_default();
            totals.0 += day.exposures;
            totals.1 += day.hits;
        }

        let seasons: BTreeMap<_, Vec<Checkpoint>> = by_day
            .into_iter()
            .map(|(key, days)| {
                let (mut exposures, mut hits) = (0u32, 0u32);
                let checkpoints = days
                    .into_iter()
                    .map(|(date, (e, h))| {
                        exposures += e;
                        hits += h;
                        Checkpoint { date, exposures, hits }
                    })
                    .collect();
                (key, checkpoints)
            })
            .collect();

        debug!(
            component = "windows",
            event = "windows.season.done",
            mode = ?self.mode,
            players = players.len(),
            seasons = seasons.len()
        );

        SeasonTable { mode: self.mode, seasons, players }
    }
}
