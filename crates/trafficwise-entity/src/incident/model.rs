//! Incident entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use trafficwise_core::traits::{Draft, Managed, Patch, Record};
use trafficwise_core::types::{FieldValue, RecordId};
use trafficwise_core::{AppError, AppResult};

use super::severity::Severity;
use super::status::IncidentStatus;
use crate::validation::{is_blank, reject_blank, require, take};

/// A reported traffic incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique incident identifier.
    pub id: RecordId,
    /// Incident type (e.g. "Accident", "Road Closure").
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the incident happened.
    pub location: String,
    /// Severity level.
    pub severity: Severity,
    /// Handling status.
    pub status: IncidentStatus,
    /// When the incident was reported.
    pub reported_at: DateTime<Utc>,
    /// Last modification time; never earlier than `reported_at`.
    pub updated_at: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
    /// Team or operator handling the incident.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// Notes recorded on resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution_notes: Option<String>,
}

impl Incident {
    /// Move along one edge of the status state machine.
    pub fn transition_to(&mut self, next: IncidentStatus, now: DateTime<Utc>) -> AppResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::invalid_transition(format!(
                "Incident {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.touch(now);
        Ok(())
    }

    /// Mark the incident resolved, optionally recording notes.
    pub fn resolve(&mut self, notes: Option<String>, now: DateTime<Utc>) -> AppResult<()> {
        self.transition_to(IncidentStatus::Resolved, now)?;
        if let Some(notes) = notes.filter(|notes| !notes.trim().is_empty()) {
            self.resolution_notes = Some(notes.trim().to_string());
        }
        Ok(())
    }

    /// Force the incident to `Critical`/`Active` and hand it to `handler`.
    ///
    /// Escalation bypasses the forward-only progression; only a closed
    /// incident cannot be escalated.
    pub fn escalate(&mut self, handler: &str, now: DateTime<Utc>) -> AppResult<()> {
        if !self.status.can_escalate() {
            return Err(AppError::invalid_transition(format!(
                "Incident {} is {} and cannot be escalated",
                self.id, self.status
            )));
        }
        self.severity = Severity::Critical;
        self.status = IncidentStatus::Active;
        self.assigned_to = Some(handler.to_string());
        self.touch(now);
        Ok(())
    }

    /// Archive a resolved incident.
    pub fn close(&mut self, now: DateTime<Utc>) -> AppResult<()> {
        self.transition_to(IncidentStatus::Closed, now)
    }

    /// Whether resolution notes are present on an incident that is not resolved.
    pub fn has_premature_notes(&self) -> bool {
        self.resolution_notes.is_some()
            && !matches!(self.status, IncidentStatus::Resolved | IncidentStatus::Closed)
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.reported_at);
    }
}

impl Record for Incident {
    type Id = RecordId;

    const ENTITY: &'static str = "Incident";
    const SEARCH_FIELDS: &'static [&'static str] =
        &["id", "type", "location", "description", "assignedTo"];
    const DATE_FIELD: Option<&'static str> = Some("reportedAt");

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "type" => Some(FieldValue::text(&self.kind)),
            "location" => Some(FieldValue::text(&self.location)),
            "severity" => Some(self.severity.to_field()),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "reportedAt" => Some(FieldValue::timestamp(self.reported_at)),
            "updatedAt" => Some(FieldValue::timestamp(self.updated_at)),
            "description" => Some(FieldValue::text(&self.description)),
            "assignedTo" => self.assigned_to.as_deref().map(FieldValue::text),
            "resolutionNotes" => self.resolution_notes.as_deref().map(FieldValue::text),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        format!(
            "Type: {}, Location: {}, Severity: {}, Status: {}",
            self.kind, self.location, self.severity, self.status
        )
    }
}

/// Data required to report a new incident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDraft {
    /// Incident type (required).
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Location (required).
    pub location: Option<String>,
    /// Severity (required).
    pub severity: Option<Severity>,
    /// Description (required).
    pub description: Option<String>,
    /// Initial status; defaults to `Active`.
    pub status: Option<IncidentStatus>,
    /// Initial assignee.
    pub assigned_to: Option<String>,
    /// Report time; defaults to the creation time.
    pub reported_at: Option<DateTime<Utc>>,
}

impl Draft for IncidentDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require(&mut missing, "type", &self.kind);
        require(&mut missing, "location", &self.location);
        if self.severity.is_none() {
            missing.push("severity");
        }
        require(&mut missing, "description", &self.description);
        missing
    }

    fn check(&self) -> AppResult<()> {
        match self.status {
            Some(status) if !status.is_initial() => Err(AppError::invalid_fields(
                format!("A new incident cannot start as {status}"),
                ["status"],
            )),
            _ => Ok(()),
        }
    }
}

/// Partial update for an existing incident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentPatch {
    /// New incident type.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// New location.
    pub location: Option<String>,
    /// New severity.
    pub severity: Option<Severity>,
    /// Target status; must be reachable from the current one.
    pub status: Option<IncidentStatus>,
    /// New description.
    pub description: Option<String>,
    /// New assignee.
    pub assigned_to: Option<String>,
    /// Resolution notes.
    pub resolution_notes: Option<String>,
}

impl Patch for IncidentPatch {
    fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        reject_blank(&mut empty, "type", &self.kind);
        reject_blank(&mut empty, "location", &self.location);
        reject_blank(&mut empty, "description", &self.description);
        empty
    }

    fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("type", self.kind.is_some()),
            ("location", self.location.is_some()),
            ("severity", self.severity.is_some()),
            ("status", self.status.is_some()),
            ("description", self.description.is_some()),
            ("assignedTo", self.assigned_to.is_some()),
            ("resolutionNotes", self.resolution_notes.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

impl Managed for Incident {
    type Draft = IncidentDraft;
    type Patch = IncidentPatch;

    fn sequenced_id(value: u64) -> RecordId {
        RecordId::sequenced("INC", value, 3)
    }

    fn from_draft(id: RecordId, draft: IncidentDraft, now: DateTime<Utc>) -> AppResult<Self> {
        let severity = draft
            .severity
            .ok_or_else(|| AppError::missing_fields(Self::ENTITY, &["severity"]))?;
        let reported_at = draft.reported_at.unwrap_or(now);
        Ok(Self {
            id,
            kind: take(draft.kind),
            location: take(draft.location),
            severity,
            status: draft.status.unwrap_or(IncidentStatus::Active),
            reported_at,
            updated_at: now.max(reported_at),
            description: take(draft.description),
            assigned_to: (!is_blank(&draft.assigned_to)).then(|| take(draft.assigned_to)),
            resolution_notes: None,
        })
    }

    fn apply_patch(&mut self, patch: &IncidentPatch, now: DateTime<Utc>) -> AppResult<()> {
        if let Some(status) = patch.status.filter(|status| *status != self.status) {
            self.transition_to(status, now)?;
        }
        if let Some(kind) = &patch.kind {
            self.kind = kind.trim().to_string();
        }
        if let Some(location) = &patch.location {
            self.location = location.trim().to_string();
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(description) = &patch.description {
            self.description = description.trim().to_string();
        }
        if let Some(assigned_to) = &patch.assigned_to {
            let assigned_to = assigned_to.trim();
            self.assigned_to = (!assigned_to.is_empty()).then(|| assigned_to.to_string());
        }
        if let Some(notes) = &patch.resolution_notes {
            let notes = notes.trim();
            self.resolution_notes = (!notes.is_empty()).then(|| notes.to_string());
        }
        self.touch(now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn reported() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 28, 10, 15, 0).unwrap()
    }

    fn incident(status: IncidentStatus, severity: Severity) -> Incident {
        Incident {
            id: RecordId::from("INC001"),
            kind: "Accident".to_string(),
            location: "Main St & 1st Ave".to_string(),
            severity,
            status,
            reported_at: reported(),
            updated_at: reported(),
            description: "Multi-vehicle collision".to_string(),
            assigned_to: None,
            resolution_notes: None,
        }
    }

    #[test]
    fn test_missing_description_is_named() {
        let draft = IncidentDraft {
            kind: Some("Accident".to_string()),
            location: Some("Main St".to_string()),
            severity: Some(Severity::High),
            ..IncidentDraft::default()
        };
        assert_eq!(draft.missing_fields(), vec!["description"]);
    }

    #[test]
    fn test_draft_cannot_start_resolved() {
        let draft = IncidentDraft {
            status: Some(IncidentStatus::Resolved),
            ..IncidentDraft::default()
        };
        let err = draft.check().unwrap_err();
        assert_eq!(err.fields, vec!["status".to_string()]);
    }

    #[test]
    fn test_escalate_resolved_incident() {
        let mut incident = incident(IncidentStatus::Resolved, Severity::Low);
        let now = reported() + Duration::hours(2);
        incident.escalate("Escalation Team", now).unwrap();
        assert_eq!(incident.status, IncidentStatus::Active);
        assert_eq!(incident.severity, Severity::Critical);
        assert_eq!(incident.assigned_to.as_deref(), Some("Escalation Team"));
        assert_eq!(incident.updated_at, now);
    }

    #[test]
    fn test_closed_incident_cannot_escalate() {
        let mut incident = incident(IncidentStatus::Closed, Severity::Low);
        let err = incident.escalate("Escalation Team", reported()).unwrap_err();
        assert!(err.is(trafficwise_core::error::ErrorKind::InvalidTransition));
        assert_eq!(incident.severity, Severity::Low);
    }

    #[test]
    fn test_invalid_transition_leaves_record_untouched() {
        let mut incident = incident(IncidentStatus::Monitoring, Severity::Medium);
        let before = incident.clone();
        assert!(incident
            .transition_to(IncidentStatus::Active, reported() + Duration::hours(1))
            .is_err());
        assert_eq!(incident, before);
    }

    #[test]
    fn test_updated_at_never_precedes_reported_at() {
        let mut incident = incident(IncidentStatus::Active, Severity::Medium);
        let earlier = reported() - Duration::days(1);
        incident
            .apply_patch(
                &IncidentPatch {
                    description: Some("Cleared one lane".to_string()),
                    ..IncidentPatch::default()
                },
                earlier,
            )
            .unwrap();
        assert_eq!(incident.updated_at, incident.reported_at);
    }

    #[test]
    fn test_resolve_records_notes() {
        let mut incident = incident(IncidentStatus::Investigating, Severity::High);
        incident
            .resolve(Some(" Towed ".to_string()), reported() + Duration::hours(3))
            .unwrap();
        assert_eq!(incident.status, IncidentStatus::Resolved);
        assert_eq!(incident.resolution_notes.as_deref(), Some("Towed"));
        incident.close(reported() + Duration::hours(4)).unwrap();
        assert_eq!(incident.status, IncidentStatus::Closed);
    }

    #[test]
    fn test_severity_field_is_ranked() {
        let incident = incident(IncidentStatus::Active, Severity::Critical);
        assert_eq!(incident.field("severity"), Some(FieldValue::rank(4, "Critical")));
        assert_eq!(incident.field("assignedTo"), None);
    }
}
