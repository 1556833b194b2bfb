//! Incident status workflow: transitions, resolution, escalation, archival.

use tracing::warn;

use trafficwise_core::AppResult;
use trafficwise_core::events::RecordAction;
use trafficwise_core::types::RecordId;
use trafficwise_entity::incident::{Incident, IncidentStatus};

use crate::mutation::{MutationGateway, MutationOutcome};
use crate::store::RecordStore;

/// Drives incidents through their status state machine.
#[derive(Debug, Clone)]
pub struct IncidentWorkflow<'a> {
    gateway: &'a MutationGateway,
    escalation_handler: &'a str,
}

impl<'a> IncidentWorkflow<'a> {
    /// Creates a workflow that hands escalated incidents to `escalation_handler`.
    pub fn new(gateway: &'a MutationGateway, escalation_handler: &'a str) -> Self {
        Self {
            gateway,
            escalation_handler,
        }
    }

    /// Move an incident along one edge of the state machine.
    pub fn transition(
        &self,
        store: &RecordStore<Incident>,
        id: &RecordId,
        next: IncidentStatus,
    ) -> AppResult<MutationOutcome<Incident>> {
        let outcome = self.gateway.apply(store, id, RecordAction::Transitioned, |incident, ctx| {
            incident.transition_to(next, ctx.request_time)
        })?;
        if outcome.record.has_premature_notes() {
            warn!(
                id = %id,
                status = %outcome.record.status,
                "Incident carries resolution notes but is not resolved"
            );
        }
        Ok(outcome)
    }

    /// Resolve an incident, optionally recording notes.
    pub fn resolve(
        &self,
        store: &RecordStore<Incident>,
        id: &RecordId,
        notes: Option<String>,
    ) -> AppResult<MutationOutcome<Incident>> {
        self.gateway.apply(store, id, RecordAction::Resolved, |incident, ctx| {
            incident.resolve(notes, ctx.request_time)
        })
    }

    /// Escalate an incident to critical, active handling by the escalation handler.
    pub fn escalate(
        &self,
        store: &RecordStore<Incident>,
        id: &RecordId,
    ) -> AppResult<MutationOutcome<Incident>> {
        let handler = self.escalation_handler;
        self.gateway.apply(store, id, RecordAction::Escalated, |incident, ctx| {
            incident.escalate(handler, ctx.request_time)
        })
    }

    /// Archive a resolved incident.
    pub fn close(
        &self,
        store: &RecordStore<Incident>,
        id: &RecordId,
    ) -> AppResult<MutationOutcome<Incident>> {
        self.gateway.apply(store, id, RecordAction::Closed, |incident, ctx| {
            incident.close(ctx.request_time)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use trafficwise_core::error::ErrorKind;
    use trafficwise_entity::incident::Severity;

    use crate::context::ActorContext;

    fn store() -> RecordStore<Incident> {
        let reported = Utc.with_ymd_and_hms(2024, 7, 27, 8, 0, 0).unwrap();
        RecordStore::from_records(vec![Incident {
            id: RecordId::from("INC005"),
            kind: "Minor Accident".to_string(),
            location: "Industrial Park Gate 2".to_string(),
            severity: Severity::Medium,
            status: IncidentStatus::Resolved,
            reported_at: reported,
            updated_at: reported,
            description: "Minor fender bender".to_string(),
            assigned_to: None,
            resolution_notes: Some("Vehicles moved".to_string()),
        }])
        .unwrap()
    }

    fn gateway() -> MutationGateway {
        MutationGateway::new(ActorContext::at(
            "Bob The Builder",
            Utc.with_ymd_and_hms(2024, 7, 28, 9, 0, 0).unwrap(),
        ))
    }

    #[test]
    fn test_escalate_event_uses_escalated_verb() {
        let gateway = gateway();
        let workflow = IncidentWorkflow::new(&gateway, "Escalation Team");
        let outcome = workflow.escalate(&store(), &RecordId::from("INC005")).unwrap();
        assert_eq!(
            outcome.audit_description(),
            "Bob The Builder escalated Incident INC005"
        );
        assert_eq!(outcome.record.assigned_to.as_deref(), Some("Escalation Team"));
    }

    #[test]
    fn test_transition_back_from_resolved_rejected() {
        let gateway = gateway();
        let workflow = IncidentWorkflow::new(&gateway, "Escalation Team");
        let err = workflow
            .transition(&store(), &RecordId::from("INC005"), IncidentStatus::Active)
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidTransition));
    }

    #[test]
    fn test_close_resolved_incident() {
        let gateway = gateway();
        let workflow = IncidentWorkflow::new(&gateway, "Escalation Team");
        let outcome = workflow.close(&store(), &RecordId::from("INC005")).unwrap();
        assert_eq!(outcome.record.status, IncidentStatus::Closed);
        assert_eq!(outcome.event.action, RecordAction::Closed);
    }
}
