//! Dashboard summary counts.

use serde::{Deserialize, Serialize};

use trafficwise_entity::camera::{CameraLocation, CameraStatus};
use trafficwise_entity::incident::{Incident, Severity};
use trafficwise_entity::signal::Intersection;

use crate::store::RecordStore;

/// Headline numbers shown on the console dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Incidents that are neither resolved nor closed.
    pub active_incidents: usize,
    /// Open incidents at `Critical` severity.
    pub critical_incidents: usize,
    /// Cameras streaming.
    pub cameras_online: usize,
    /// Cameras unreachable.
    pub cameras_offline: usize,
    /// Cameras under maintenance.
    pub cameras_in_maintenance: usize,
    /// Vehicles currently seen by online cameras.
    pub vehicles_in_view: u64,
    /// Intersections running an override or priority plan.
    pub intersections_not_normal: usize,
}

impl DashboardSummary {
    /// Compute the summary from store snapshots.
    pub fn compute(
        incidents: &RecordStore<Incident>,
        cameras: &RecordStore<CameraLocation>,
        intersections: &RecordStore<Intersection>,
    ) -> Self {
        let open: Vec<&Incident> = incidents
            .iter()
            .filter(|incident| incident.status.is_open())
            .collect();
        let cameras_with = |status: CameraStatus| {
            cameras
                .iter()
                .filter(|camera| camera.status == status)
                .count()
        };

        Self {
            active_incidents: open.len(),
            critical_incidents: open
                .iter()
                .filter(|incident| incident.severity == Severity::Critical)
                .count(),
            cameras_online: cameras_with(CameraStatus::Online),
            cameras_offline: cameras_with(CameraStatus::Offline),
            cameras_in_maintenance: cameras_with(CameraStatus::Maintenance),
            vehicles_in_view: cameras
                .iter()
                .filter_map(CameraLocation::live_vehicles)
                .map(u64::from)
                .sum(),
            intersections_not_normal: intersections
                .iter()
                .filter(|intersection| !intersection.is_normal())
                .count(),
        }
    }
}
