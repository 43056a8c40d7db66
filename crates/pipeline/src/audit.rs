//! Coverage and sample-size audit of a feature table.

use std::collections::{BTreeMap, BTreeSet};

use statline_primitives::{Date, PlayerId, Role};

use crate::{FeatureTable, GlobalRates};

/// Row count at or below which a player counts as a small sample.
pub const SMALL_SAMPLE_ROWS: usize = 30;

/// Per-role coverage counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleCoverage {
    /// Feature rows.
    pub rows: usize,
    /// Distinct players.
    pub players: usize,
    /// Players with at most [`SMALL_SAMPLE_ROWS`] rows.
    pub small_sample_players: usize,
}

/// Summary of a feature table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureAudit {
    /// Total rows.
    pub rows: usize,
    /// Coverage per role.
    pub roles: BTreeMap<Role, RoleCoverage>,
    /// Earliest feature date.
    pub first_date: Option<Date>,
    /// Latest feature date.
    pub last_date: Option<Date>,
    /// Rows with an undefined short window rate.
    pub undefined_short: usize,
    /// Rows with an undefined long window rate.
    pub undefined_long: usize,
    /// Rows with an undefined season rate.
    pub undefined_season: usize,
    /// Rows without a season aggregate.
    pub missing_season: usize,
    /// Population rates used for smoothing.
    pub global: GlobalRates,
}

impl FeatureAudit {
    /// Audit a table.
    #[must_use]
    pub fn from_table(table: &FeatureTable) -> Self {
        let records = table.records();
        let mut rows_per_player: BTreeMap<(Role, PlayerId), usize> = BTreeMap::new();
        for record in records {
            *rows_per_player.entry((record.role, record.player_id)).or_default() += 1;
        }

        let mut roles: BTreeMap<Role, RoleCoverage> = BTreeMap::new();
        for (&(role, _), &rows) in &rows_per_player {
            let coverage = roles.entry(role).or_default();
            coverage.rows += rows;
            coverage.players += 1;
            if rows <= SMALL_SAMPLE_ROWS {
                coverage.small_sample_players += 1;
            }
        }

        let dates: BTreeSet<Date> = records.iter().map(|r| r.date).collect();

        Self {
            rows: records.len(),
            roles,
            first_date: dates.first().copied(),
            last_date: dates.last().copied(),
            undefined_short: records.iter().filter(|r| r.short.raw.is_none()).count(),
            undefined_long: records.iter().filter(|r| r.long.raw.is_none()).count(),
            undefined_season: records.iter().filter(|r| r.season.raw.is_none()).count(),
            missing_season: records.iter().filter(|r| !r.has_season).count(),
            global: *table.global_rates(),
        }
    }

    /// Coverage of one role; zero when the role has no rows.
    #[must_use]
    pub fn role(&self, role: Role) -> RoleCoverage {
        self.roles.get(&role).copied().unwrap_or_default()
    }

    /// Players with at most [`SMALL_SAMPLE_ROWS`] rows, over both roles.
    #[must_use]
    pub fn small_sample_players(&self) -> usize {
        self.roles.values().map(|c| c.small_sample_players).sum()
    }

    /// Print a concise summary of the audit.
    pub fn print_summary(&self) {
        println!(
            "\n================================================================================"
        );
        println!("FEATURE AUDIT");
        println!(
            "================================================================================"
        );
        println!("Rows: {}", self.rows);
        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => println!("Dates: {first} to {last}"),
            _ => println!("Dates: none"),
        }
        println!(
            "--------------------------------------------------------------------------------"
        );
        println!("{:<10} {:>10} {:>10} {:>18}", "Role", "Rows", "Players", "<=30 rows");
        println!("{:-<10} {:-^10} {:-^10} {:-^18}", "", "", "", "");
        for role in Role::ALL {
            let coverage = self.role(role);
            println!(
                "{:<10} {:>10} {:>10} {:>18}",
                role.as_str(),
                coverage.rows,
                coverage.players,
                percent_of(coverage.small_sample_players, coverage.players)
            );
        }

        println!("\nUNDEFINED RATES:");
        println!("{:<10} {:>24} {:>14}", "Window", "Undefined", "Global Rate");
        println!("{:-<10} {:-^24} {:-^14}", "", "", "");
        for (window, undefined, global) in [
            ("short", self.undefined_short, self.global.short),
            ("long", self.undefined_long, self.global.long),
            ("season", self.undefined_season, self.global.season),
        ] {
            println!("{:<10} {:>24} {:>14.4}", window, percent_of(undefined, self.rows), global);
        }
        if self.missing_season > 0 {
            println!("\nRows without a season aggregate: {}", self.missing_season);
        }
        println!(
            "================================================================================\n"
        );
    }
}

fn percent_of(part: usize, total: usize) -> String {
    if total == 0 {
        return format!("{part} / 0");
    }
    format!("{part} / {total} ({:.1}%)", 100.0 * part as f64 / total as f64)
}
