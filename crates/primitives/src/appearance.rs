//! Plate-appearance and daily rollup records.

use serde::{Deserialize, Serialize};

use crate::{AtBatId, Date, GameId, PlayerId, Role};

/// One completed plate appearance seen from one side (batter or pitcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateAppearance {
    /// Player the record is keyed by.
    pub player_id: PlayerId,
    /// Side of the plate appearance.
    pub role: Role,
    /// Date of the plate appearance.
    pub event_date: Date,
    /// Game identifier.
    pub game_id: GameId,
    /// At-bat sequence number within the game.
    pub at_bat_id: AtBatId,
    /// Whether any event in the plate appearance was a hit.
    pub is_hit: bool,
    /// Whether any event in the plate appearance was a strikeout.
    pub is_strikeout: bool,
    /// Whether any event in the plate appearance was a walk.
    pub is_walk: bool,
    /// Mean pitch velocity over the plate appearance, if any pitch was tracked.
    pub mean_velocity: Option<f64>,
}

/// Per-player, per-date totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Side the totals were counted from.
    pub role: Role,
    /// Calendar date.
    pub date: Date,
    /// Distinct plate appearances on the date.
    pub exposures: u32,
    /// Plate appearances ending in a hit.
    pub hits: u32,
    /// Plate appearances ending in a strikeout.
    pub strikeouts: u32,
    /// Plate appearances ending in a walk.
    pub walks: u32,
    /// Mean of the per-appearance velocity means; 0.0 when none was tracked.
    pub mean_velocity: f64,
}

impl DailyStat {
    /// A zero-exposure day, used to fill gaps in a dense timeline.
    #[must_use]
    pub const fn empty(player_id: PlayerId, role: Role, date: Date) -> Self {
        Self {
            player_id,
            role,
            date,
            exposures: 0,
            hits: 0,
            strikeouts: 0,
            walks: 0,
            mean_velocity: 0.0,
        }
    }

    /// Whether the day had any plate appearance.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.exposures > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_day_has_no_activity() {
        let date = Date::from_ymd_opt(2024, 5, 2).unwrap();
        let day = DailyStat::empty(PlayerId::new(7), Role::Pitcher, date);
        assert!(!day.is_active());
        assert_eq!(day.hits, 0);
        assert_eq!(day.mean_velocity, 0.0);
    }
}
