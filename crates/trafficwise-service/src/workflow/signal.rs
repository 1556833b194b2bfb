//! Intersection signal control.

use tracing::warn;

use trafficwise_core::AppResult;
use trafficwise_core::events::RecordAction;
use trafficwise_core::types::RecordId;
use trafficwise_entity::signal::{Intersection, PriorityKind};

use crate::mutation::{MutationGateway, MutationOutcome};
use crate::store::RecordStore;

/// Manual overrides and priority lanes for intersections.
#[derive(Debug, Clone)]
pub struct SignalControl<'a> {
    gateway: &'a MutationGateway,
}

impl<'a> SignalControl<'a> {
    /// Creates a signal controller acting through `gateway`.
    pub fn new(gateway: &'a MutationGateway) -> Self {
        Self { gateway }
    }

    /// Override the signal plan at an intersection.
    pub fn apply_override(
        &self,
        store: &RecordStore<Intersection>,
        id: &RecordId,
        action: &str,
    ) -> AppResult<MutationOutcome<Intersection>> {
        let outcome = self.gateway.apply(store, id, RecordAction::Overridden, |intersection, _| {
            intersection.apply_override(action)
        })?;
        if outcome.record.emergency_vehicle_priority {
            warn!(
                id = %id,
                signal = %outcome.record.current_signal,
                "Emergency vehicle priority active after override"
            );
        }
        Ok(outcome)
    }

    /// Enable or disable a priority lane at an intersection.
    pub fn set_priority(
        &self,
        store: &RecordStore<Intersection>,
        id: &RecordId,
        kind: PriorityKind,
        enabled: bool,
    ) -> AppResult<MutationOutcome<Intersection>> {
        self.gateway
            .apply(store, id, RecordAction::Reprioritized, |intersection, _| {
                intersection.set_priority(kind, enabled);
                Ok(())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficwise_core::error::ErrorKind;
    use trafficwise_entity::signal::{SignalMode, NORMAL_CYCLE};

    use crate::context::ActorContext;

    fn store() -> RecordStore<Intersection> {
        RecordStore::from_records(vec![Intersection {
            id: RecordId::from("int1"),
            name: "Main St & 1st Ave".to_string(),
            current_signal: NORMAL_CYCLE.to_string(),
            mode: SignalMode::Normal,
            public_transport_priority: false,
            emergency_vehicle_priority: false,
        }])
        .unwrap()
    }

    #[test]
    fn test_override_unknown_intersection() {
        let gateway = MutationGateway::new(ActorContext::new("Alice Wonderland"));
        let err = SignalControl::new(&gateway)
            .apply_override(&store(), &RecordId::from("int9"), "All Red")
            .unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[test]
    fn test_priority_toggle_is_audited() {
        let gateway = MutationGateway::new(ActorContext::new("Alice Wonderland"));
        let outcome = SignalControl::new(&gateway)
            .set_priority(&store(), &RecordId::from("int1"), PriorityKind::PublicTransport, true)
            .unwrap();
        assert_eq!(outcome.record.mode, SignalMode::Priority);
        assert_eq!(
            outcome.audit_description(),
            "Alice Wonderland reprioritized Intersection int1"
        );
    }
}
