//! Record-change events emitted by successful mutations.
//!
//! Every mutation produces a [`RecordEvent`] whose display form is the
//! human-readable audit description `"{actor} {verb} {entity} {id}"`.
//! The console session turns these into audit log entries.

pub mod action;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use action::RecordAction;

/// Description of one successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEvent {
    /// Who performed the mutation.
    pub actor: String,
    /// What was done.
    pub action: RecordAction,
    /// Entity type name (e.g. `"Incident"`).
    pub entity: String,
    /// The affected record's id.
    pub record_id: String,
    /// Entity-specific detail line.
    pub details: String,
    /// When the mutation happened.
    pub timestamp: DateTime<Utc>,
}

impl RecordEvent {
    /// Create a new event stamped with the current time.
    pub fn new(
        actor: impl Into<String>,
        action: RecordAction,
        entity: impl Into<String>,
        record_id: impl fmt::Display,
        details: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action,
            entity: entity.into(),
            record_id: record_id.to_string(),
            details: details.into(),
            timestamp: Utc::now(),
        }
    }

    /// Restamp the event with the time the mutation was requested.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The audit description line.
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.actor, self.action, self.entity, self.record_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_format() {
        let event = RecordEvent::new("Alice", RecordAction::Created, "Incident", "INC007", "");
        assert_eq!(event.description(), "Alice created Incident INC007");
    }

    #[test]
    fn test_escalation_verb() {
        let event = RecordEvent::new("System", RecordAction::Escalated, "Incident", "INC001", "");
        assert_eq!(event.to_string(), "System escalated Incident INC001");
    }
}
