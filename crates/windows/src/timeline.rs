//! Dense daily timelines.

use statline_primitives::DailyStat;

/// Expand one player's daily rollups into one row per calendar day.
///
/// The span runs from the earliest to the latest observed date, inclusive.
/// Days without a rollup are zero-filled. Input may be in any order but must
/// belong to a single (player, role) and hold at most one row per date.
#[must_use]
pub fn dense_timeline(days: &[DailyStat]) -> Vec<DailyStat> {
    let mut sorted: Vec<&DailyStat> = days.iter().collect();
    sorted.sort_by_key(|d| d.date);

    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };
    debug_assert!(
        sorted.iter().all(|d| d.player_id == first.player_id && d.role == first.role),
        "dense_timeline expects a single player and role"
    );

    let span = (last.date - first.date).num_days() as usize + 1;
    let (start, player_id, role) = (first.date, first.player_id, first.role);

    let mut observed = sorted.into_iter().peekable();
    let mut out = Vec::with_capacity(span);

    for date in start.iter_days().take(span) {
        match observed.next_if(|d| d.date == date) {
            Some(day) => {
                debug_assert!(
                    observed.peek().is_none_or(|next| next.date != date),
                    "duplicate daily rollup for {player_id} on {date}"
                );
                out.push(day.clone());
            }
            None => out.push(DailyStat::empty(player_id, role, date)),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use statline_primitives::{Date, PlayerId, Role};

    use super::*;

    fn active(d: u32, exposures: u32, hits: u32) -> DailyStat {
        DailyStat {
            exposures,
            hits,
            mean_velocity: 92.0,
            ..DailyStat::empty(
                PlayerId::new(5),
                Role::Batter,
                Date::from_ymd_opt(2024, 7, d).unwrap(),
            )
        }
    }

    #[test]
    fn fills_gaps_with_zero_days() {
        let timeline = dense_timeline(&[active(7, 1, 0), active(1, 1, 1)]);
        assert_eq!(timeline.len(), 7);
        assert_eq!(timeline[0].hits, 1);
        assert!(timeline[1..6].iter().all(|d| !d.is_active() && d.mean_velocity == 0.0));
        assert_eq!(timeline[6].exposures, 1);
    }

    #[test]
    fn every_date_exactly_once() {
        let timeline = dense_timeline(&[active(3, 2, 1), active(20, 1, 0), active(11, 4, 2)]);
        let dates: Vec<Date> = timeline.iter().map(|d| d.date).collect();
        let expected: Vec<Date> =
            Date::from_ymd_opt(2024, 7, 3).unwrap().iter_days().take(18).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn single_day_span() {
        let timeline = dense_timeline(&[active(4, 3, 1)]);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].exposures, 3);
    }

    #[test]
    fn empty_input() {
        assert!(dense_timeline(&[]).is_empty());
    }

    #[test]
    fn spans_month_boundary() {
        let end = DailyStat {
            exposures: 1,
            ..DailyStat::empty(
                PlayerId::new(5),
                Role::Batter,
                Date::from_ymd_opt(2024, 8, 2).unwrap(),
            )
        };
        let timeline = dense_timeline(&[active(30, 1, 0), end]);
        assert_eq!(timeline.len(), 4);
    }
}
