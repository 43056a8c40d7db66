//! Raw event type definitions.

use serde::{Deserialize, Serialize};

use crate::{AtBatId, Date, GameId, PlayerId, Role};

/// One raw pitch-level or plate-appearance-level row from the event source.
///
/// Player ids are optional because upstream feeds occasionally omit them;
/// the reducers decide how such rows are treated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Calendar date of the game.
    pub event_date: Date,
    /// Game identifier.
    pub game_id: GameId,
    /// At-bat sequence number within the game.
    pub at_bat_id: AtBatId,
    /// Batter identifier.
    pub batter_id: Option<PlayerId>,
    /// Pitcher identifier.
    pub pitcher_id: Option<PlayerId>,
    /// Outcome code (e.g. `single`, `strikeout`); `None` for non-terminal pitches.
    pub outcome_code: Option<String>,
    /// Release velocity of the pitch, if tracked.
    pub velocity: Option<f64>,
}

impl RawEvent {
    /// Create an event with no outcome and no velocity.
    #[must_use]
    pub const fn new(
        event_date: Date,
        game_id: GameId,
        at_bat_id: AtBatId,
        batter_id: Option<PlayerId>,
        pitcher_id: Option<PlayerId>,
    ) -> Self {
        Self {
            event_date,
            game_id,
            at_bat_id,
            batter_id,
            pitcher_id,
            outcome_code: None,
            velocity: None,
        }
    }

    /// Set the outcome code.
    #[must_use]
    pub fn with_outcome(mut self, code: impl Into<String>) -> Self {
        self.outcome_code = Some(code.into());
        self
    }

    /// Set the pitch velocity.
    #[must_use]
    pub const fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// The player on the requested side of the event.
    #[must_use]
    pub const fn player_for(&self, role: Role) -> Option<PlayerId> {
        match role {
            Role::Batter => self.batter_id,
            Role::Pitcher => self.pitcher_id,
        }
    }
}
