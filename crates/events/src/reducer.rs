//! Plate-appearance reduction.

use std::collections::BTreeMap;

use statline_primitives::{AtBatId, Date, GameId, PlateAppearance, PlayerId, RawEvent, Role};
use statline_traits::{EventError, EventReducer, Reduction};
use tracing::{debug, warn};

use crate::{Outcome, OutcomeTaxonomy};

/// What to do with an event that lacks the player id of the reduced role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Exclude the event and count it.
    #[default]
    Drop,
    /// Abort the reduction with `EventError::MalformedEvent`.
    Fail,
}

/// Configuration for plate-appearance reduction.
#[derive(Debug, Clone, Default)]
pub struct ReducerConfig {
    /// Outcome code classification.
    pub taxonomy: OutcomeTaxonomy,
    /// Handling of events without a player id.
    pub malformed: MalformedPolicy,
}

/// Running state for one (player, game, at-bat) group.
#[derive(Debug)]
struct AtBatAccumulator {
    first_date: Date,
    is_hit: bool,
    is_strikeout: bool,
    is_walk: bool,
    velocity_sum: f64,
    velocity_count: u32,
}

impl AtBatAccumulator {
    const fn new(date: Date) -> Self {
        Self {
            first_date: date,
            is_hit: false,
            is_strikeout: false,
            is_walk: false,
            velocity_sum: 0.0,
            velocity_count: 0,
        }
    }

    fn push(&mut self, date: Date, outcome: Outcome, velocity: Option<f64>) {
        self.first_date = self.first_date.min(date);
        match outcome {
            Outcome::Hit => self.is_hit = true,
            Outcome::Strikeout => self.is_strikeout = true,
            Outcome::Walk => self.is_walk = true,
            Outcome::Other => {}
        }
        if let Some(v) = velocity.filter(|v| v.is_finite()) {
            self.velocity_sum += v;
            self.velocity_count += 1;
        }
    }

    fn mean_velocity(&self) -> Option<f64> {
        (self.velocity_count > 0).then(|| self.velocity_sum / f64::from(self.velocity_count))
    }
}

/// Collapses raw events into one plate appearance per (player, game, at-bat).
///
/// The same reducer serves both sides of the event stream: with
/// [`Role::Batter`] it groups by batter id, with [`Role::Pitcher`] by pitcher id.
#[derive(Debug, Clone, Default)]
pub struct PlateAppearanceReducer {
    config: ReducerConfig,
}

impl PlateAppearanceReducer {
    /// Create a reducer with the default taxonomy and drop policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ReducerConfig::default())
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReducerConfig {
        &self.config
    }
}

const fn player_field(role: Role) -> &'static str {
    match role {
        Role::Batter => "batter_id",
        Role::Pitcher => "pitcher_id",
    }
}

impl EventReducer for PlateAppearanceReducer {
    type Config = ReducerConfig;

    fn with_config(config: Self::Config) -> Self {
        Self { config }
    }

    fn reduce(&self, events: &[RawEvent], role: Role) -> Result<Reduction, EventError> {
        let mut groups: BTreeMap<(PlayerId, GameId, AtBatId), AtBatAccumulator> = BTreeMap::new();
        let mut dropped = 0usize;

        for (index, event) in events.iter().enumerate() {
            let Some(player_id) = event.player_for(role) else {
                match self.config.malformed {
                    MalformedPolicy::Drop => {
                        dropped += 1;
                        continue;
                    }
                    MalformedPolicy::Fail => {
                        return Err(EventError::MalformedEvent {
                            role,
                            index,
                            field: player_field(role),
                        });
                    }
                }
            };

            let outcome = self.config.taxonomy.classify(event.outcome_code.as_deref());
            groups
                .entry((player_id, event.game_id, event.at_bat_id))
                .or_insert_with(|| AtBatAccumulator::new(event.event_date))
                .push(event.event_date, outcome, event.velocity);
        }

        if dropped > 0 {
            warn!(
                component = "events",
                event = "events.reduce.dropped",
                role = %role,
                dropped,
                total = events.len(),
                "excluded events without a {}",
                player_field(role)
            );
        }

        if groups.is_empty() {
            return Err(EventError::EmptyInput { role });
        }

        let mut appearances: Vec<PlateAppearance> = groups
            .into_iter()
            .map(|((player_id, game_id, at_bat_id), acc)| PlateAppearance {
                player_id,
                role,
                event_date: acc.first_date,
                game_id,
                at_bat_id,
                is_hit: acc.is_hit,
                is_strikeout: acc.is_strikeout,
                is_walk: acc.is_walk,
                mean_velocity: acc.mean_velocity(),
            })
            .collect();

        appearances.sort_by_key(|pa| (pa.player_id, pa.event_date, pa.game_id, pa.at_bat_id));

        debug!(
            component = "events",
            event = "events.reduce.done",
            role = %role,
            events = events.len(),
            appearances = appearances.len()
        );

        Ok(Reduction { appearances, dropped })
    }
}
