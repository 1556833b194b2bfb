//! Camera location model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use trafficwise_core::traits::{Draft, Managed, Patch, Record};
use trafficwise_core::types::{CameraId, FieldValue};
use trafficwise_core::AppResult;

use super::status::CameraStatus;
use crate::validation::{reject_blank, require, take};

/// A traffic camera and the spot it watches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraLocation {
    /// Unique camera identifier.
    pub id: CameraId,
    /// Location name.
    pub name: String,
    /// City area (e.g. "Downtown").
    pub area: String,
    /// Feed status.
    pub status: CameraStatus,
    /// Vehicles currently in view. Only meaningful while `Online`.
    pub vehicles: u32,
    /// Feed resolution (e.g. "1080p").
    pub resolution: String,
    /// Date of the last maintenance visit.
    pub last_maintenance: NaiveDate,
}

impl CameraLocation {
    /// Live vehicle count, if the feed is online.
    pub fn live_vehicles(&self) -> Option<u32> {
        self.status.reports_vehicles().then_some(self.vehicles)
    }

    fn set_status(&mut self, status: CameraStatus) {
        self.status = status;
        if !status.reports_vehicles() {
            self.vehicles = 0;
        }
    }
}

impl Record for CameraLocation {
    type Id = CameraId;

    const ENTITY: &'static str = "Camera";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "area"];
    const DATE_FIELD: Option<&'static str> = Some("lastMaintenance");

    fn id(&self) -> &CameraId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::Number(f64::from(self.id.0))),
            "name" => Some(FieldValue::text(&self.name)),
            "area" => Some(FieldValue::text(&self.area)),
            "status" => Some(FieldValue::text(self.status.as_str())),
            "vehicles" => self
                .live_vehicles()
                .map(|count| FieldValue::Number(f64::from(count))),
            "resolution" => Some(FieldValue::text(&self.resolution)),
            "lastMaintenance" => Some(FieldValue::Timestamp(
                self.last_maintenance
                    .and_hms_opt(0, 0, 0)
                    .map(|naive| naive.and_utc()),
            )),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        format!("Name: {}, Area: {}, Status: {}", self.name, self.area, self.status)
    }
}

/// Data required to register a camera.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraDraft {
    /// Location name (required).
    pub name: Option<String>,
    /// City area (required).
    pub area: Option<String>,
    /// Feed resolution (required).
    pub resolution: Option<String>,
    /// Initial status; new cameras start `Offline` until the feed connects.
    pub status: Option<CameraStatus>,
    /// Initial vehicle count.
    pub vehicles: Option<u32>,
    /// Last maintenance date; defaults to the registration day.
    pub last_maintenance: Option<NaiveDate>,
}

impl Draft for CameraDraft {
    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        require(&mut missing, "name", &self.name);
        require(&mut missing, "area", &self.area);
        require(&mut missing, "resolution", &self.resolution);
        missing
    }
}

/// Partial update for a camera.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPatch {
    /// New location name.
    pub name: Option<String>,
    /// New area.
    pub area: Option<String>,
    /// New feed status.
    pub status: Option<CameraStatus>,
    /// New vehicle count.
    pub vehicles: Option<u32>,
    /// New resolution.
    pub resolution: Option<String>,
    /// New maintenance date.
    pub last_maintenance: Option<NaiveDate>,
}

impl Patch for CameraPatch {
    fn empty_fields(&self) -> Vec<&'static str> {
        let mut empty = Vec::new();
        reject_blank(&mut empty, "name", &self.name);
        reject_blank(&mut empty, "area", &self.area);
        reject_blank(&mut empty, "resolution", &self.resolution);
        empty
    }

    fn changed_fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("area", self.area.is_some()),
            ("status", self.status.is_some()),
            ("vehicles", self.vehicles.is_some()),
            ("resolution", self.resolution.is_some()),
            ("lastMaintenance", self.last_maintenance.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }
}

impl Managed for CameraLocation {
    type Draft = CameraDraft;
    type Patch = CameraPatch;

    fn sequenced_id(value: u64) -> CameraId {
        CameraId(u32::try_from(value).unwrap_or(u32::MAX))
    }

    fn from_draft(id: CameraId, draft: CameraDraft, now: DateTime<Utc>) -> AppResult<Self> {
        let mut camera = Self {
            id,
            name: take(draft.name),
            area: take(draft.area),
            status: CameraStatus::Offline,
            vehicles: draft.vehicles.unwrap_or(0),
            resolution: take(draft.resolution),
            last_maintenance: draft.last_maintenance.unwrap_or_else(|| now.date_naive()),
        };
        camera.set_status(draft.status.unwrap_or(CameraStatus::Offline));
        Ok(camera)
    }

    fn apply_patch(&mut self, patch: &CameraPatch, _now: DateTime<Utc>) -> AppResult<()> {
        if let Some(name) = &patch.name {
            self.name = name.trim().to_string();
        }
        if let Some(area) = &patch.area {
            self.area = area.trim().to_string();
        }
        if let Some(resolution) = &patch.resolution {
            self.resolution = resolution.trim().to_string();
        }
        if let Some(vehicles) = patch.vehicles {
            self.vehicles = vehicles;
        }
        if let Some(date) = patch.last_maintenance {
            self.last_maintenance = date;
        }
        // Counts only stick while the camera reports them.
        self.set_status(patch.status.unwrap_or(self.status));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> CameraDraft {
        CameraDraft {
            name: Some("Harbor Bridge North".to_string()),
            area: Some("Waterfront".to_string()),
            resolution: Some("4K".to_string()),
            ..CameraDraft::default()
        }
    }

    #[test]
    fn test_new_camera_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 7, 30, 9, 0, 0).unwrap();
        let camera = CameraLocation::from_draft(CameraId(7), draft(), now).unwrap();
        assert_eq!(camera.status, CameraStatus::Offline);
        assert_eq!(camera.last_maintenance, now.date_naive());
        assert_eq!(camera.field("vehicles"), None);
    }

    #[test]
    fn test_going_offline_clears_vehicle_count() {
        let now = Utc::now();
        let mut camera = CameraLocation::from_draft(
            CameraId(1),
            CameraDraft {
                status: Some(CameraStatus::Online),
                vehicles: Some(12),
                ..draft()
            },
            now,
        )
        .unwrap();
        assert_eq!(camera.live_vehicles(), Some(12));

        let patch = CameraPatch {
            status: Some(CameraStatus::Maintenance),
            ..CameraPatch::default()
        };
        camera.apply_patch(&patch, now).unwrap();
        assert_eq!(camera.vehicles, 0);
        assert_eq!(camera.live_vehicles(), None);
    }

    #[test]
    fn test_vehicle_count_ignored_while_offline() {
        let now = Utc::now();
        let mut camera = CameraLocation::from_draft(CameraId(4), draft(), now).unwrap();
        let patch = CameraPatch {
            vehicles: Some(50),
            ..CameraPatch::default()
        };
        camera.apply_patch(&patch, now).unwrap();
        assert_eq!(camera.vehicles, 0);
        assert_eq!(camera.live_vehicles(), None);

        let patch = CameraPatch {
            status: Some(CameraStatus::Online),
            vehicles: Some(50),
            ..CameraPatch::default()
        };
        camera.apply_patch(&patch, now).unwrap();
        assert_eq!(camera.live_vehicles(), Some(50));
    }

    #[test]
    fn test_required_fields() {
        assert_eq!(
            CameraDraft::default().missing_fields(),
            vec!["name", "area", "resolution"]
        );
    }
}
