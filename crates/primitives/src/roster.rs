//! Roster metadata records.

use serde::{Deserialize, Serialize};

use crate::PlayerId;

/// Descriptive attributes joined onto feature rows by player id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Player identifier.
    pub player_id: PlayerId,
    /// Display name.
    pub name: Option<String>,
    /// Batting side or throwing hand.
    pub handedness: Option<String>,
    /// Team abbreviation.
    pub team: Option<String>,
}

impl RosterEntry {
    /// Create an entry with only the id set.
    #[must_use]
    pub const fn bare(player_id: PlayerId) -> Self {
        Self { player_id, name: None, handedness: None, team: None }
    }
}
