//! Mutation gateway.
//!
//! Validates a proposed change against entity rules and applies it to a
//! store snapshot. A successful call yields the new snapshot, the affected
//! record, and a [`RecordEvent`] describing what happened; the input store
//! is never modified.

use tracing::info;

use trafficwise_core::events::{RecordAction, RecordEvent};
use trafficwise_core::traits::{Draft, Managed, Patch, Record};
use trafficwise_core::types::IdSequence;
use trafficwise_core::{AppError, AppResult};

use crate::context::ActorContext;
use crate::store::RecordStore;

/// Result of a successful mutation.
#[derive(Debug, Clone)]
pub struct MutationOutcome<R: Record> {
    /// Store snapshot after the mutation.
    pub store: RecordStore<R>,
    /// The created, updated, or removed record.
    pub record: R,
    /// Audit event for the mutation.
    pub event: RecordEvent,
}

impl<R: Record> MutationOutcome<R> {
    /// The audit description line (`"{actor} {verb} {entity} {id}"`).
    pub fn audit_description(&self) -> String {
        self.event.description()
    }
}

/// Applies validated mutations on behalf of one actor.
#[derive(Debug, Clone)]
pub struct MutationGateway {
    ctx: ActorContext,
}

impl MutationGateway {
    /// Creates a gateway acting as `ctx`.
    pub fn new(ctx: ActorContext) -> Self {
        Self { ctx }
    }

    /// The acting context.
    pub fn context(&self) -> &ActorContext {
        &self.ctx
    }

    /// Validate `draft` and insert a new record with the next sequenced id.
    ///
    /// The sequence only advances once validation has passed.
    pub fn create<R: Managed>(
        &self,
        store: &RecordStore<R>,
        sequence: &mut IdSequence,
        draft: R::Draft,
    ) -> AppResult<MutationOutcome<R>> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::missing_fields(R::ENTITY, &missing));
        }
        draft.check()?;

        let mut next_sequence = *sequence;
        let id = R::sequenced_id(next_sequence.next_value());
        let record = R::from_draft(id, draft, self.ctx.request_time)?;
        let store = store.insert(record.clone())?;
        *sequence = next_sequence;

        info!(
            actor = %self.ctx.actor,
            entity = R::ENTITY,
            id = %record.id(),
            "Record created"
        );
        Ok(self.outcome(store, record, RecordAction::Created))
    }

    /// Validate `patch` and merge it into the record with `id`.
    pub fn update<R: Managed>(
        &self,
        store: &RecordStore<R>,
        id: &R::Id,
        patch: &R::Patch,
    ) -> AppResult<MutationOutcome<R>> {
        let empty = patch.empty_fields();
        if !empty.is_empty() {
            return Err(AppError::invalid_fields(
                format!("{} fields cannot be empty: {}", R::ENTITY, empty.join(", ")),
                empty,
            ));
        }
        patch.check()?;

        let now = self.ctx.request_time;
        let (store, record) = store.update(id, |record| record.apply_patch(patch, now))?;

        info!(
            actor = %self.ctx.actor,
            entity = R::ENTITY,
            id = %id,
            fields = ?patch.changed_fields(),
            "Record updated"
        );
        Ok(self.outcome(store, record, RecordAction::Updated))
    }

    /// Remove the record with `id`.
    pub fn delete<R: Record>(
        &self,
        store: &RecordStore<R>,
        id: &R::Id,
    ) -> AppResult<MutationOutcome<R>> {
        let record = store.require(id)?.clone();
        let store = store.delete(id);

        info!(
            actor = %self.ctx.actor,
            entity = R::ENTITY,
            id = %id,
            "Record deleted"
        );
        Ok(self.outcome(store, record, RecordAction::Deleted))
    }

    /// Apply a domain operation (a status transition, a signal override)
    /// to the record with `id` and describe it as `action`.
    pub fn apply<R, F>(
        &self,
        store: &RecordStore<R>,
        id: &R::Id,
        action: RecordAction,
        operation: F,
    ) -> AppResult<MutationOutcome<R>>
    where
        R: Record,
        F: FnOnce(&mut R, &ActorContext) -> AppResult<()>,
    {
        let (store, record) = store.update(id, |record| operation(record, &self.ctx))?;

        info!(
            actor = %self.ctx.actor,
            entity = R::ENTITY,
            id = %id,
            action = action.verb(),
            "Record changed"
        );
        Ok(self.outcome(store, record, action))
    }

    fn outcome<R: Record>(
        &self,
        store: RecordStore<R>,
        record: R,
        action: RecordAction,
    ) -> MutationOutcome<R> {
        let event = RecordEvent::new(
            self.ctx.actor.clone(),
            action,
            R::ENTITY,
            record.id(),
            record.audit_details(),
        )
        .at(self.ctx.request_time);
        MutationOutcome {
            store,
            record,
            event,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use trafficwise_core::error::ErrorKind;
    use trafficwise_entity::incident::{Incident, IncidentDraft, IncidentPatch, Severity};

    fn gateway() -> MutationGateway {
        MutationGateway::new(ActorContext::at(
            "Alice Wonderland",
            Utc.with_ymd_and_hms(2024, 7, 28, 12, 0, 0).unwrap(),
        ))
    }

    fn draft() -> IncidentDraft {
        IncidentDraft {
            kind: Some("Accident".to_string()),
            location: Some("Main St".to_string()),
            severity: Some(Severity::High),
            description: Some("Two cars blocking the left lane".to_string()),
            ..IncidentDraft::default()
        }
    }

    #[test]
    fn test_create_assigns_sequenced_id_and_describes_event() {
        let store = RecordStore::<Incident>::new();
        let mut sequence = IdSequence::starting_after(6);
        let outcome = gateway().create(&store, &mut sequence, draft()).unwrap();
        assert_eq!(outcome.record.id.as_str(), "INC007");
        assert_eq!(
            outcome.audit_description(),
            "Alice Wonderland created Incident INC007"
        );
        assert_eq!(outcome.store.len(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_invalid_create_does_not_consume_an_id() {
        let store = RecordStore::<Incident>::new();
        let mut sequence = IdSequence::new();
        let bad = IncidentDraft {
            description: None,
            ..draft()
        };
        let err = gateway().create(&store, &mut sequence, bad).unwrap_err();
        assert_eq!(err.fields, vec!["description".to_string()]);
        assert_eq!(sequence.last(), 0);
    }

    #[test]
    fn test_update_rejects_blank_fields() {
        let mut sequence = IdSequence::new();
        let created = gateway()
            .create(&RecordStore::<Incident>::new(), &mut sequence, draft())
            .unwrap();
        let patch = IncidentPatch {
            location: Some("   ".to_string()),
            ..IncidentPatch::default()
        };
        let err = gateway()
            .update(&created.store, &created.record.id, &patch)
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
        assert_eq!(err.fields, vec!["location".to_string()]);
    }

    #[test]
    fn test_delete_unknown_id_is_not_found() {
        let store = RecordStore::<Incident>::new();
        let err = gateway()
            .delete(&store, &Incident::sequenced_id(404))
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
}
