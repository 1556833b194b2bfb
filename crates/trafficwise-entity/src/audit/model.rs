//! Audit log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trafficwise_core::events::RecordEvent;
use trafficwise_core::traits::Record;
use trafficwise_core::types::{AuditLogId, FieldValue};

/// Actor name used for actions not performed by a person.
pub const SYSTEM_ACTOR: &str = "System";

/// An immutable audit log entry recording a console action.
///
/// Entries are only ever appended; there is no draft or patch type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    /// Unique, time-ordered entry identifier.
    pub id: AuditLogId,
    /// When the action occurred.
    pub timestamp: DateTime<Utc>,
    /// Who performed the action (a user name or `"System"`).
    pub user: String,
    /// What was done.
    pub action: String,
    /// Additional free-text details.
    pub details: String,
}

impl AuditLogEntry {
    /// Create a new entry.
    pub fn new(
        timestamp: DateTime<Utc>,
        user: impl Into<String>,
        action: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditLogId::new(),
            timestamp,
            user: user.into(),
            action: action.into(),
            details: details.into(),
        }
    }

    /// Record a mutation event.
    pub fn from_event(event: &RecordEvent) -> Self {
        Self::new(
            event.timestamp,
            event.actor.clone(),
            event.description(),
            event.details.clone(),
        )
    }

    /// Whether the entry was written by the system rather than a person.
    pub fn is_system(&self) -> bool {
        self.user == SYSTEM_ACTOR
    }
}

impl Record for AuditLogEntry {
    type Id = AuditLogId;

    const ENTITY: &'static str = "AuditLogEntry";
    const SEARCH_FIELDS: &'static [&'static str] = &["user", "action", "details"];
    const DATE_FIELD: Option<&'static str> = Some("timestamp");

    fn id(&self) -> &AuditLogId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "timestamp" => Some(FieldValue::timestamp(self.timestamp)),
            "user" => Some(FieldValue::text(&self.user)),
            "action" => Some(FieldValue::text(&self.action)),
            "details" => Some(FieldValue::text(&self.details)),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        self.details.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficwise_core::events::RecordAction;

    #[test]
    fn test_from_event_uses_description() {
        let event = RecordEvent::new(
            "Alice Wonderland",
            RecordAction::Deleted,
            "User",
            "usr003",
            "Name: Charlie Brown",
        );
        let entry = AuditLogEntry::from_event(&event);
        assert_eq!(entry.user, "Alice Wonderland");
        assert_eq!(entry.action, "Alice Wonderland deleted User usr003");
        assert_eq!(entry.details, "Name: Charlie Brown");
        assert_eq!(entry.timestamp, event.timestamp);
        assert!(!entry.is_system());
    }
}
