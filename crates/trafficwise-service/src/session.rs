//! Console session: the single owner of every record store.
//!
//! All mutations go through the session so that each store, its id
//! sequence, and the audit log move forward together. Reads hand out
//! snapshots that stay valid after later mutations.

use tracing::{info, warn};

use trafficwise_core::AppResult;
use trafficwise_core::config::console::ConsoleConfig;
use trafficwise_core::traits::Record;
use trafficwise_core::types::{CameraId, IdSequence, Page, RecordId};
use trafficwise_entity::audit::AuditLogEntry;
use trafficwise_entity::camera::{CameraDraft, CameraLocation, CameraPatch};
use trafficwise_entity::incident::{Incident, IncidentDraft, IncidentPatch, IncidentStatus};
use trafficwise_entity::role::{Role, RoleDraft, RolePatch};
use trafficwise_entity::signal::{Intersection, PriorityKind};
use trafficwise_entity::user::{User, UserDraft, UserPatch};

use crate::context::ActorContext;
use crate::dashboard::DashboardSummary;
use crate::mutation::{MutationGateway, MutationOutcome};
use crate::query::ListView;
use crate::seed::SeedData;
use crate::store::RecordStore;
use crate::workflow::{IncidentWorkflow, SignalControl};

/// In-memory state of one console session.
#[derive(Debug, Clone)]
pub struct ConsoleSession {
    config: ConsoleConfig,
    users: RecordStore<User>,
    roles: RecordStore<Role>,
    incidents: RecordStore<Incident>,
    cameras: RecordStore<CameraLocation>,
    intersections: RecordStore<Intersection>,
    audit_log: RecordStore<AuditLogEntry>,
    user_ids: IdSequence,
    role_ids: IdSequence,
    incident_ids: IdSequence,
    camera_ids: IdSequence,
}

impl ConsoleSession {
    /// A session with empty stores.
    pub fn new(config: ConsoleConfig) -> Self {
        Self {
            config,
            users: RecordStore::new(),
            roles: RecordStore::new(),
            incidents: RecordStore::new(),
            cameras: RecordStore::new(),
            intersections: RecordStore::new(),
            audit_log: RecordStore::new(),
            user_ids: IdSequence::new(),
            role_ids: IdSequence::new(),
            incident_ids: IdSequence::new(),
            camera_ids: IdSequence::new(),
        }
    }

    /// A session pre-loaded with the demonstration data set.
    ///
    /// Id sequences start after the highest seeded id.
    pub fn seeded(config: ConsoleConfig) -> AppResult<Self> {
        let seed = SeedData::load()?;
        let session = Self {
            config,
            user_ids: sequence_after(&seed.users, |user| numeric_suffix(user.id.as_str())),
            role_ids: sequence_after(&seed.roles, |role| numeric_suffix(role.id.as_str())),
            incident_ids: sequence_after(&seed.incidents, |incident| {
                numeric_suffix(incident.id.as_str())
            }),
            camera_ids: sequence_after(&seed.cameras, |camera| Some(u64::from(camera.id.0))),
            users: RecordStore::from_records(seed.users)?,
            roles: RecordStore::from_records(seed.roles)?,
            incidents: RecordStore::from_records(seed.incidents)?,
            cameras: RecordStore::from_records(seed.cameras)?,
            intersections: RecordStore::from_records(seed.intersections)?,
            audit_log: RecordStore::from_records(seed.audit_log)?,
        };
        info!(
            users = session.users.len(),
            incidents = session.incidents.len(),
            cameras = session.cameras.len(),
            "Console session seeded"
        );
        Ok(session)
    }

    /// Session settings.
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Context for the configured default actor.
    pub fn default_actor(&self) -> ActorContext {
        ActorContext::new(self.config.default_actor.clone())
    }

    /// Current user snapshot.
    pub fn users(&self) -> &RecordStore<User> {
        &self.users
    }

    /// Current role snapshot.
    pub fn roles(&self) -> &RecordStore<Role> {
        &self.roles
    }

    /// Current incident snapshot.
    pub fn incidents(&self) -> &RecordStore<Incident> {
        &self.incidents
    }

    /// Current camera snapshot.
    pub fn cameras(&self) -> &RecordStore<CameraLocation> {
        &self.cameras
    }

    /// Current intersection snapshot.
    pub fn intersections(&self) -> &RecordStore<Intersection> {
        &self.intersections
    }

    /// Current audit log snapshot, newest first.
    pub fn audit_log(&self) -> &RecordStore<AuditLogEntry> {
        &self.audit_log
    }

    /// Render a list view with its page size clamped to the configured maximum.
    pub fn list<R: Record>(&self, store: &RecordStore<R>, view: &ListView) -> Page<R> {
        let mut view = view.clone();
        let page = view.page();
        view.set_page_size(self.config.clamp_page_size(view.page_size()));
        view.go_to(page);
        view.render(store)
    }

    /// Dashboard counts over the current snapshots.
    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary::compute(&self.incidents, &self.cameras, &self.intersections)
    }

    /// Register a user.
    pub fn create_user(&mut self, ctx: &ActorContext, draft: UserDraft) -> AppResult<User> {
        let outcome = MutationGateway::new(ctx.clone()).create(&self.users, &mut self.user_ids, draft)?;
        self.warn_on_unknown_role(&outcome.record);
        Ok(self.commit(outcome, |session, store| session.users = store))
    }

    /// Patch a user.
    pub fn update_user(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        patch: &UserPatch,
    ) -> AppResult<User> {
        let outcome = MutationGateway::new(ctx.clone()).update(&self.users, id, patch)?;
        if patch.role.is_some() {
            self.warn_on_unknown_role(&outcome.record);
        }
        Ok(self.commit(outcome, |session, store| session.users = store))
    }

    /// Remove a user.
    pub fn delete_user(&mut self, ctx: &ActorContext, id: &RecordId) -> AppResult<User> {
        let outcome = MutationGateway::new(ctx.clone()).delete(&self.users, id)?;
        Ok(self.commit(outcome, |session, store| session.users = store))
    }

    /// Define a role.
    pub fn create_role(&mut self, ctx: &ActorContext, draft: RoleDraft) -> AppResult<Role> {
        let outcome = MutationGateway::new(ctx.clone()).create(&self.roles, &mut self.role_ids, draft)?;
        Ok(self.commit(outcome, |session, store| session.roles = store))
    }

    /// Patch a role.
    pub fn update_role(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        patch: &RolePatch,
    ) -> AppResult<Role> {
        let outcome = MutationGateway::new(ctx.clone()).update(&self.roles, id, patch)?;
        Ok(self.commit(outcome, |session, store| session.roles = store))
    }

    /// Report an incident.
    pub fn create_incident(
        &mut self,
        ctx: &ActorContext,
        draft: IncidentDraft,
    ) -> AppResult<Incident> {
        let outcome = MutationGateway::new(ctx.clone()).create(
            &self.incidents,
            &mut self.incident_ids,
            draft,
        )?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Patch an incident. A status change must follow the state machine.
    pub fn update_incident(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        patch: &IncidentPatch,
    ) -> AppResult<Incident> {
        let outcome = MutationGateway::new(ctx.clone()).update(&self.incidents, id, patch)?;
        if outcome.record.has_premature_notes() {
            warn!(
                id = %id,
                status = %outcome.record.status,
                "Resolution notes recorded on an incident that is not resolved"
            );
        }
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Remove an incident.
    pub fn delete_incident(&mut self, ctx: &ActorContext, id: &RecordId) -> AppResult<Incident> {
        let outcome = MutationGateway::new(ctx.clone()).delete(&self.incidents, id)?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Move an incident along the status state machine.
    pub fn transition_incident(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        next: IncidentStatus,
    ) -> AppResult<Incident> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome = IncidentWorkflow::new(&gateway, &self.config.escalation_handler)
            .transition(&self.incidents, id, next)?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Resolve an incident.
    pub fn resolve_incident(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        notes: Option<String>,
    ) -> AppResult<Incident> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome = IncidentWorkflow::new(&gateway, &self.config.escalation_handler)
            .resolve(&self.incidents, id, notes)?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Escalate an incident to the configured escalation handler.
    pub fn escalate_incident(&mut self, ctx: &ActorContext, id: &RecordId) -> AppResult<Incident> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome = IncidentWorkflow::new(&gateway, &self.config.escalation_handler)
            .escalate(&self.incidents, id)?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Archive a resolved incident.
    pub fn close_incident(&mut self, ctx: &ActorContext, id: &RecordId) -> AppResult<Incident> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome = IncidentWorkflow::new(&gateway, &self.config.escalation_handler)
            .close(&self.incidents, id)?;
        Ok(self.commit(outcome, |session, store| session.incidents = store))
    }

    /// Register a camera.
    pub fn create_camera(
        &mut self,
        ctx: &ActorContext,
        draft: CameraDraft,
    ) -> AppResult<CameraLocation> {
        let outcome = MutationGateway::new(ctx.clone()).create(
            &self.cameras,
            &mut self.camera_ids,
            draft,
        )?;
        Ok(self.commit(outcome, |session, store| session.cameras = store))
    }

    /// Patch a camera.
    pub fn update_camera(
        &mut self,
        ctx: &ActorContext,
        id: &CameraId,
        patch: &CameraPatch,
    ) -> AppResult<CameraLocation> {
        let outcome = MutationGateway::new(ctx.clone()).update(&self.cameras, id, patch)?;
        Ok(self.commit(outcome, |session, store| session.cameras = store))
    }

    /// Override the signal plan at an intersection.
    pub fn override_signal(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        action: &str,
    ) -> AppResult<Intersection> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome = SignalControl::new(&gateway).apply_override(&self.intersections, id, action)?;
        Ok(self.commit(outcome, |session, store| session.intersections = store))
    }

    /// Switch a priority lane at an intersection.
    pub fn set_signal_priority(
        &mut self,
        ctx: &ActorContext,
        id: &RecordId,
        kind: PriorityKind,
        enabled: bool,
    ) -> AppResult<Intersection> {
        let gateway = MutationGateway::new(ctx.clone());
        let outcome =
            SignalControl::new(&gateway).set_priority(&self.intersections, id, kind, enabled)?;
        Ok(self.commit(outcome, |session, store| session.intersections = store))
    }

    /// Install the new snapshot and append the audit entry.
    fn commit<R, F>(&mut self, outcome: MutationOutcome<R>, install: F) -> R
    where
        R: Record,
        F: FnOnce(&mut Self, RecordStore<R>),
    {
        let entry = AuditLogEntry::from_event(&outcome.event);
        install(self, outcome.store);
        // Audit ids are fresh v7 uuids, so prepending cannot collide.
        self.audit_log = match self.audit_log.insert(entry) {
            Ok(log) => log,
            Err(err) => {
                warn!(error = %err, "Audit entry dropped");
                self.audit_log.clone()
            }
        };
        outcome.record
    }

    fn warn_on_unknown_role(&self, user: &User) {
        if !self.roles.iter().any(|role| role.name == user.role) {
            warn!(
                user = %user.id,
                role = %user.role,
                "User assigned a role that is not defined"
            );
        }
    }
}

fn numeric_suffix(id: &str) -> Option<u64> {
    let digits = id.trim_start_matches(|c: char| !c.is_ascii_digit());
    digits.parse().ok()
}

fn sequence_after<R>(records: &[R], number: impl Fn(&R) -> Option<u64>) -> IdSequence {
    IdSequence::starting_after(records.iter().filter_map(number).max().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficwise_core::error::ErrorKind;

    fn session() -> ConsoleSession {
        ConsoleSession::seeded(ConsoleConfig::default()).unwrap()
    }

    #[test]
    fn test_numeric_suffix() {
        assert_eq!(numeric_suffix("INC006"), Some(6));
        assert_eq!(numeric_suffix("usr012"), Some(12));
        assert_eq!(numeric_suffix("admin"), None);
    }

    #[test]
    fn test_mutation_appends_audit_entry() {
        let mut session = session();
        let before = session.audit_log().len();
        let ctx = ActorContext::new("Diana Prince");
        session
            .escalate_incident(&ctx, &RecordId::from("INC003"))
            .unwrap();
        assert_eq!(session.audit_log().len(), before + 1);
        let newest = &session.audit_log().as_slice()[0];
        assert_eq!(newest.user, "Diana Prince");
        assert_eq!(newest.action, "Diana Prince escalated Incident INC003");
    }

    #[test]
    fn test_failed_mutation_is_not_audited() {
        let mut session = session();
        let before = session.audit_log().len();
        let ctx = session.default_actor();
        let err = session
            .close_incident(&ctx, &RecordId::from("INC001"))
            .unwrap_err();
        assert!(err.is(ErrorKind::InvalidTransition));
        assert_eq!(session.audit_log().len(), before);
    }

    #[test]
    fn test_ids_continue_after_seed() {
        let mut session = session();
        let ctx = session.default_actor();
        let created = session
            .create_user(
                &ctx,
                UserDraft {
                    name: Some("Erin Operator".to_string()),
                    email: Some("erin@example.com".to_string()),
                    role: Some("Operator".to_string()),
                    status: None,
                },
            )
            .unwrap();
        assert_eq!(created.id.as_str(), "usr005");
    }
}
