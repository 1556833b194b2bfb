//! Camera feed status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trafficwise_core::AppError;

/// Operational status of a camera feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraStatus {
    /// Streaming; vehicle counts are live.
    Online,
    /// Not reachable.
    Offline,
    /// Taken down for maintenance.
    Maintenance,
}

impl CameraStatus {
    /// Every status, in display order.
    pub const ALL: [CameraStatus; 3] = [Self::Online, Self::Offline, Self::Maintenance];

    /// Vehicle counts are only meaningful for a live feed.
    pub fn reports_vehicles(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::Maintenance => "Maintenance",
        }
    }
}

impl fmt::Display for CameraStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CameraStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(AppError::invalid_fields(
                format!("Invalid camera status: '{s}'. Expected one of: Online, Offline, Maintenance"),
                ["status"],
            )),
        }
    }
}
