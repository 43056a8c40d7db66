//! Event reduction trait definitions.

use statline_primitives::{PlateAppearance, RawEvent, Role};

/// Errors that can occur while reducing raw events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// An event lacks a field the reduction keys on.
    #[error("malformed {role} event at index {index}: missing {field}")]
    MalformedEvent {
        /// Role being reduced.
        role: Role,
        /// Position of the event in the input.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// No usable event for the requested role.
    #[error("no {role} events to reduce")]
    EmptyInput {
        /// Role being reduced.
        role: Role,
    },
}

impl EventError {
    /// Returns whether this error is recoverable.
    ///
    /// An empty input is a legitimate "no activity" result and maps to an empty table.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyInput { .. })
    }
}

/// Output of a reduction: the plate appearances plus the rows excluded on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reduction {
    /// One record per (player, game, at-bat).
    pub appearances: Vec<PlateAppearance>,
    /// Events excluded because they lacked the role's player id.
    pub dropped: usize,
}

impl Reduction {
    /// Number of plate appearances.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.appearances.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.appearances.is_empty()
    }
}

/// Trait for collapsing raw events into plate appearances for one role.
pub trait EventReducer: Send + Sync {
    /// Configuration type for this reducer.
    type Config: Default + Clone + Send + Sync;

    /// Create a new reducer with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Reduce events to one plate appearance per (player, game, at-bat).
    ///
    /// # Arguments
    /// * `events` - Raw events in any order
    /// * `role` - Side whose player id keys the grouping
    ///
    /// # Errors
    /// Returns `EventError::EmptyInput` if no event is usable for the role, and
    /// `EventError::MalformedEvent` if the reducer is configured to fail on bad rows.
    fn reduce(&self, events: &[RawEvent], role: Role) -> Result<Reduction, EventError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_error_is_recoverable() {
        let err = EventError::EmptyInput { role: Role::Pitcher };
        assert!(err.is_recoverable());

        let err = EventError::MalformedEvent { role: Role::Batter, index: 3, field: "batter_id" };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn event_error_display() {
        let err = EventError::MalformedEvent { role: Role::Batter, index: 3, field: "batter_id" };
        assert_eq!(err.to_string(), "malformed batter event at index 3: missing batter_id");

        let err = EventError::EmptyInput { role: Role::Pitcher };
        assert_eq!(err.to_string(), "no pitcher events to reduce");
    }
}
