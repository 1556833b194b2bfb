//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use trafficwise_core::config::console::ConsoleConfig;
use trafficwise_core::types::RecordId;
use trafficwise_entity::incident::{Incident, IncidentStatus, Severity};
use trafficwise_entity::user::{User, UserStatus};
use trafficwise_service::{ActorContext, ConsoleSession, RecordStore};

/// Fixed reference instant.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 28, 8, 0, 0).unwrap()
}

/// `base_time()` plus `hours`.
pub fn hours(hours: i64) -> DateTime<Utc> {
    base_time() + Duration::hours(hours)
}

/// A context for `actor` at a fixed time.
pub fn actor(name: &str) -> ActorContext {
    ActorContext::at(name, hours(6))
}

/// A seeded session with default settings.
pub fn seeded_session() -> ConsoleSession {
    ConsoleSession::seeded(ConsoleConfig::default()).expect("seed data should load")
}

/// A user fixture.
pub fn user(id: &str, name: &str, role: &str) -> User {
    User {
        id: RecordId::from(id),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: role.to_string(),
        status: UserStatus::Active,
        last_login: None,
    }
}

/// An incident fixture reported `reported_hours` after `base_time()`.
pub fn incident(id: &str, severity: Severity, status: IncidentStatus, reported_hours: i64) -> Incident {
    Incident {
        id: RecordId::from(id),
        kind: "Accident".to_string(),
        location: format!("Location {id}"),
        severity,
        status,
        reported_at: hours(reported_hours),
        updated_at: hours(reported_hours),
        description: format!("Incident {id}"),
        assigned_to: None,
        resolution_notes: None,
    }
}

/// Twelve incidents with repeating severities and distinct report times.
pub fn incident_store() -> RecordStore<Incident> {
    let severities = [Severity::Low, Severity::High, Severity::Medium, Severity::Critical];
    let statuses = [
        IncidentStatus::Active,
        IncidentStatus::Investigating,
        IncidentStatus::Resolved,
    ];
    let incidents = (0..12)
        .map(|i| {
            incident(
                &format!("INC{:03}", i + 1),
                severities[i % severities.len()],
                statuses[i % statuses.len()],
                ((i * 7) % 12) as i64,
            )
        })
        .collect();
    RecordStore::from_records(incidents).expect("fixture ids are unique")
}

/// Ids of `records`, in order.
pub fn ids(records: &[Incident]) -> Vec<String> {
    records.iter().map(|record| record.id.to_string()).collect()
}
