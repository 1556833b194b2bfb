//! Demonstration data loaded into a fresh console session.

use chrono::{DateTime, NaiveDate, Utc};

use trafficwise_core::error::ErrorKind;
use trafficwise_core::types::{CameraId, RecordId, parse_timestamp};
use trafficwise_core::{AppError, AppResult};
use trafficwise_entity::audit::{AuditLogEntry, SYSTEM_ACTOR};
use trafficwise_entity::camera::{CameraLocation, CameraStatus};
use trafficwise_entity::incident::{Incident, IncidentStatus, Severity};
use trafficwise_entity::role::Role;
use trafficwise_entity::signal::{Intersection, NORMAL_CYCLE, SignalMode};
use trafficwise_entity::user::{User, UserStatus};

/// Seed collections, each in display order (newest first where it matters).
#[derive(Debug, Clone)]
pub struct SeedData {
    /// Operator accounts.
    pub users: Vec<User>,
    /// Permission roles.
    pub roles: Vec<Role>,
    /// Audit trail, newest first.
    pub audit_log: Vec<AuditLogEntry>,
    /// Reported incidents.
    pub incidents: Vec<Incident>,
    /// Camera locations.
    pub cameras: Vec<CameraLocation>,
    /// Managed intersections.
    pub intersections: Vec<Intersection>,
}

impl SeedData {
    /// Build the demonstration data set.
    pub fn load() -> AppResult<Self> {
        Ok(Self {
            users: users()?,
            roles: roles(),
            audit_log: audit_log()?,
            incidents: incidents()?,
            cameras: cameras()?,
            intersections: intersections(),
        })
    }
}

fn instant(raw: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| AppError::internal(format!("Bad seed timestamp: {raw}")))
}

fn day(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Bad seed date: {raw}"), e))
}

fn users() -> AppResult<Vec<User>> {
    let rows = [
        ("usr001", "Alice Wonderland", "alice@example.com", "Admin", UserStatus::Active, "2024-07-28 10:00 AM"),
        ("usr002", "Bob The Builder", "bob@example.com", "Operator", UserStatus::Active, "2024-07-28 11:30 AM"),
        ("usr003", "Charlie Brown", "charlie@example.com", "Viewer", UserStatus::Inactive, "2024-07-25 09:15 AM"),
        ("usr004", "Diana Prince", "diana@example.com", "Operator", UserStatus::Active, "2024-07-28 08:45 AM"),
    ];
    rows.into_iter()
        .map(|(id, name, email, role, status, last_login)| -> AppResult<User> {
            Ok(User {
                id: RecordId::from(id),
                name: name.to_string(),
                email: email.to_string(),
                role: role.to_string(),
                status,
                last_login: Some(instant(last_login)?),
            })
        })
        .collect()
}

fn roles() -> Vec<Role> {
    let rows: [(&str, &str, &[&str]); 3] = [
        (
            "role001",
            "Admin",
            &[
                "Manage Users",
                "Configure System",
                "View Audit Logs",
                "Full Control Access",
                "Define Roles",
            ],
        ),
        (
            "role002",
            "Operator",
            &[
                "Monitor Feeds",
                "Manage Incidents",
                "Control Signals (Limited)",
                "View Analytics",
            ],
        ),
        (
            "role003",
            "Viewer",
            &[
                "View Dashboard",
                "View Analytics (Read-only)",
                "View Camera Feeds",
            ],
        ),
    ];
    rows.into_iter()
        .map(|(id, name, permissions)| Role {
            id: RecordId::from(id),
            name: name.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}

fn audit_log() -> AppResult<Vec<AuditLogEntry>> {
    let rows = [
        (
            "2024-07-28 11:35 AM",
            "Alice Wonderland",
            "Signal override: Main St & 1st Ave",
            "Set to All Red due to accident reported (INC001).",
        ),
        (
            "2024-07-28 10:05 AM",
            SYSTEM_ACTOR,
            "New user created: Bob The Builder",
            "Role assigned: Operator",
        ),
        (
            "2024-07-27 03:20 PM",
            "Bob The Builder",
            "Incident resolved: INC005",
            "Marked as cleared. Notes: Fender bender, vehicles moved.",
        ),
        (
            "2024-07-27 09:00 AM",
            "Alice Wonderland",
            "Role permissions updated: Viewer",
            "Added permission: View Camera Feeds",
        ),
    ];
    rows.into_iter()
        .map(|(timestamp, user, action, details)| -> AppResult<AuditLogEntry> {
            Ok(AuditLogEntry::new(instant(timestamp)?, user, action, details))
        })
        .collect()
}

struct IncidentRow {
    id: &'static str,
    kind: &'static str,
    location: &'static str,
    severity: Severity,
    status: IncidentStatus,
    reported_at: &'static str,
    updated_at: &'static str,
    description: &'static str,
    assigned_to: Option<&'static str>,
    resolution_notes: Option<&'static str>,
}

fn incidents() -> AppResult<Vec<Incident>> {
    let rows = [
        IncidentRow {
            id: "INC001",
            kind: "Major Accident",
            location: "Main St & 1st Ave",
            severity: Severity::Critical,
            status: IncidentStatus::Active,
            reported_at: "2024-07-28 10:15",
            updated_at: "2024-07-28 11:30",
            description: "Multi-vehicle collision, emergency services on scene. Heavy traffic impact.",
            assigned_to: Some("Team Alpha"),
            resolution_notes: None,
        },
        IncidentRow {
            id: "INC002",
            kind: "Road Closure",
            location: "Oak Rd (btwn Pine & Elm)",
            severity: Severity::Medium,
            status: IncidentStatus::Scheduled,
            reported_at: "2024-07-28 09:00",
            updated_at: "2024-07-28 09:05",
            description: "Roadworks planned from 13:00 to 17:00.",
            assigned_to: None,
            resolution_notes: None,
        },
        IncidentRow {
            id: "INC003",
            kind: "Weather Alert",
            location: "City Wide",
            severity: Severity::Low,
            status: IncidentStatus::Monitoring,
            reported_at: "2024-07-28 11:00",
            updated_at: "2024-07-28 12:00",
            description: "Heavy rain advisory, expect slippery roads. No major disruptions yet.",
            assigned_to: None,
            resolution_notes: None,
        },
        IncidentRow {
            id: "INC004",
            kind: "Traffic Jam",
            location: "Highway 101 Northbound",
            severity: Severity::High,
            status: IncidentStatus::Active,
            reported_at: "2024-07-28 11:30",
            updated_at: "2024-07-28 12:15",
            description: "Congestion due to earlier incident INC001. Extended delays.",
            assigned_to: Some(SYSTEM_ACTOR),
            resolution_notes: None,
        },
        IncidentRow {
            id: "INC005",
            kind: "Minor Accident",
            location: "Industrial Park Gate 2",
            severity: Severity::Medium,
            status: IncidentStatus::Resolved,
            reported_at: "2024-07-27 08:00",
            updated_at: "2024-07-27 08:45",
            description: "Minor fender bender, cleared by operator.",
            assigned_to: None,
            resolution_notes: Some("Vehicles moved, traffic flowing normally."),
        },
        IncidentRow {
            id: "INC006",
            kind: "Signal Malfunction",
            location: "Park Ave & Lake Rd",
            severity: Severity::High,
            status: IncidentStatus::Investigating,
            reported_at: "2024-07-28 12:30",
            updated_at: "2024-07-28 12:35",
            description: "Traffic signals reported as offline. Technician dispatched.",
            assigned_to: Some("Team Bravo"),
            resolution_notes: None,
        },
    ];
    rows.into_iter()
        .map(|row| -> AppResult<Incident> {
            Ok(Incident {
                id: RecordId::from(row.id),
                kind: row.kind.to_string(),
                location: row.location.to_string(),
                severity: row.severity,
                status: row.status,
                reported_at: instant(row.reported_at)?,
                updated_at: instant(row.updated_at)?,
                description: row.description.to_string(),
                assigned_to: row.assigned_to.map(str::to_string),
                resolution_notes: row.resolution_notes.map(str::to_string),
            })
        })
        .collect()
}

fn cameras() -> AppResult<Vec<CameraLocation>> {
    let rows = [
        (1, "Main St & 1st Ave", "Downtown", CameraStatus::Online, 12, "1080p", "2024-07-15"),
        (2, "Oak Rd & Pine Ln", "Suburb", CameraStatus::Online, 7, "720p", "2024-06-20"),
        (3, "Highway 101 Exit 5", "Highway", CameraStatus::Online, 23, "4K", "2024-07-01"),
        (4, "Industrial Park Gate 2", "Industrial", CameraStatus::Offline, 0, "1080p", "2024-05-10"),
        (5, "City Center Plaza", "Downtown", CameraStatus::Online, 18, "1080p", "2024-07-22"),
        (6, "Residential Block A", "Suburb", CameraStatus::Maintenance, 0, "720p", "2024-07-28"),
    ];
    rows.into_iter()
        .map(|(id, name, area, status, vehicles, resolution, maintained)| -> AppResult<CameraLocation> {
            Ok(CameraLocation {
                id: CameraId(id),
                name: name.to_string(),
                area: area.to_string(),
                status,
                vehicles,
                resolution: resolution.to_string(),
                last_maintenance: day(maintained)?,
            })
        })
        .collect()
}

fn intersections() -> Vec<Intersection> {
    let rows = [
        ("int1", "Main St & 1st Ave", NORMAL_CYCLE, SignalMode::Normal, false, false),
        ("int2", "Oak Rd & Pine Ln", NORMAL_CYCLE, SignalMode::Normal, false, false),
        ("int3", "Highway 101 Exit 5", "Flashing Yellow", SignalMode::Override, false, true),
        ("int4", "City Center Plaza", "Bus Priority Cycle", SignalMode::Priority, true, false),
    ];
    rows.into_iter()
        .map(|(id, name, signal, mode, public_transport, emergency)| Intersection {
            id: RecordId::from(id),
            name: name.to_string(),
            current_signal: signal.to_string(),
            mode,
            public_transport_priority: public_transport,
            emergency_vehicle_priority: emergency,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data_loads() {
        let seed = SeedData::load().unwrap();
        assert_eq!(seed.users.len(), 4);
        assert_eq!(seed.roles.len(), 3);
        assert_eq!(seed.audit_log.len(), 4);
        assert_eq!(seed.incidents.len(), 6);
        assert_eq!(seed.cameras.len(), 6);
        assert_eq!(seed.intersections.len(), 4);
    }

    #[test]
    fn test_seed_incidents_respect_timestamps() {
        let seed = SeedData::load().unwrap();
        assert!(seed
            .incidents
            .iter()
            .all(|incident| incident.updated_at >= incident.reported_at));
    }

    #[test]
    fn test_seed_audit_marks_system_entries() {
        let seed = SeedData::load().unwrap();
        let system: Vec<&str> = seed
            .audit_log
            .iter()
            .filter(|entry| entry.is_system())
            .map(|entry| entry.action.as_str())
            .collect();
        assert_eq!(system, vec!["New user created: Bob The Builder"]);
    }
}
