//! Daily rollup of plate appearances.

use std::collections::BTreeMap;

use statline_primitives::{AtBatId, DailyStat, Date, GameId, PlateAppearance, PlayerId, Role};

#[derive(Debug, Default)]
struct DayAccumulator {
    /// Distinct plate appearances; duplicates of one at-bat are OR-ed together.
    at_bats: BTreeMap<(GameId, AtBatId), (bool, bool, bool)>,
    velocity_sum: f64,
    velocity_count: u32,
}

/// Aggregate plate appearances into one row per (player, date).
///
/// `exposures` counts distinct (game, at-bat) pairs, so `hits <= exposures`
/// holds even if the input repeats a plate appearance. `mean_velocity` is the
/// mean of the per-appearance means that are present and 0.0 when no
/// appearance on that day had a tracked pitch.
///
/// # Returns
/// Rows sorted by role, player, then date.
#[must_use]
pub fn daily_rollup(appearances: &[PlateAppearance]) -> Vec<DailyStat> {
    let mut days: BTreeMap<(Role, PlayerId, Date), DayAccumulator> = BTreeMap::new();

    for pa in appearances {
        let acc = days.entry((pa.role, pa.player_id, pa.event_date)).or_default();
        let flags = acc.at_bats.entry((pa.game_id, pa.at_bat_id)).or_insert((false, false, false));
        flags.0 |= pa.is_hit;
        flags.1 |= pa.is_strikeout;
        flags.2 |= pa.is_walk;

        if let Some(v) = pa.mean_velocity {
            acc.velocity_sum += v;
            acc.velocity_count += 1;
        }
    }

    days.into_iter()
        .map(|((role, player_id, date), acc)| {
            let count = |pick: fn(&(bool, bool, bool)) -> bool| {
                acc.at_bats.values().filter(|&flags| pick(flags)).count() as u32
            };
            let mean_velocity = if acc.velocity_count > 0 {
                acc.velocity_sum / f64::from(acc.velocity_count)
            } else {
                0.0
            };

            DailyStat {
                player_id,
                role,
                date,
                exposures: acc.at_bats.len() as u32,
                hits: count(|f| f.0),
                strikeouts: count(|f| f.1),
                walks: count(|f| f.2),
                mean_velocity,
            }
        })
        .collect()
}
