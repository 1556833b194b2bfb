//! Intersection model and its signal control rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trafficwise_core::traits::Record;
use trafficwise_core::types::{FieldValue, RecordId};
use trafficwise_core::{AppError, AppResult};

/// Signal plan label for the default timing cycle.
pub const NORMAL_CYCLE: &str = "Normal Cycle";

/// How an intersection's signals are currently driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalMode {
    /// Default timing plan.
    Normal,
    /// Manually overridden by an operator.
    Override,
    /// A priority lane is active.
    Priority,
}

impl SignalMode {
    /// Return the mode label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Override => "Override",
            Self::Priority => "Priority",
        }
    }
}

impl fmt::Display for SignalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Priority lane kinds. At most one is active per intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityKind {
    /// Buses and trams.
    PublicTransport,
    /// Ambulances, fire engines, police.
    EmergencyVehicle,
}

impl PriorityKind {
    /// Return the priority label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PublicTransport => "Public Transport",
            Self::EmergencyVehicle => "Emergency Vehicle",
        }
    }

    fn active_signal(&self) -> &'static str {
        match self {
            Self::PublicTransport => "Public Transport Priority Active",
            Self::EmergencyVehicle => "Emergency Vehicle Priority Active",
        }
    }
}

impl fmt::Display for PriorityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriorityKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pt" | "public-transport" | "public_transport" => Ok(Self::PublicTransport),
            "ev" | "emergency" | "emergency-vehicle" | "emergency_vehicle" => {
                Ok(Self::EmergencyVehicle)
            }
            _ => Err(AppError::invalid_fields(
                format!("Invalid priority kind: '{s}'. Expected one of: pt, ev"),
                ["kind"],
            )),
        }
    }
}

/// A signalised intersection under console control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intersection {
    /// Unique intersection identifier.
    pub id: RecordId,
    /// Intersection name.
    pub name: String,
    /// Active signal plan.
    pub current_signal: String,
    /// Control mode.
    pub mode: SignalMode,
    /// Public transport priority lane enabled.
    pub public_transport_priority: bool,
    /// Emergency vehicle priority lane enabled.
    pub emergency_vehicle_priority: bool,
}

impl Intersection {
    /// Identifier for the `value`-th intersection.
    pub fn sequenced_id(value: u64) -> RecordId {
        RecordId::sequenced("int", value, 1)
    }

    /// Apply a manual override action.
    ///
    /// Returning to the normal cycle clears both priority lanes. Actions
    /// mentioning "emergency" or "all red" enable emergency priority.
    pub fn apply_override(&mut self, action: &str) -> AppResult<()> {
        let action = action.trim();
        if action.is_empty() {
            return Err(AppError::invalid_fields(
                "An override action is required",
                ["action"],
            ));
        }

        let lowered = action.to_lowercase();
        let is_normal = lowered.contains("normal cycle");
        let is_emergency = lowered.contains("emergency") || lowered.contains("all red");

        self.current_signal = action.to_string();
        self.mode = if is_normal {
            SignalMode::Normal
        } else {
            SignalMode::Override
        };
        if is_emergency {
            self.emergency_vehicle_priority = true;
        } else if is_normal {
            self.emergency_vehicle_priority = false;
        }
        if is_normal {
            self.public_transport_priority = false;
        }
        Ok(())
    }

    /// Toggle a priority lane. Enabling one kind disables the other.
    pub fn set_priority(&mut self, kind: PriorityKind, enabled: bool) {
        match kind {
            PriorityKind::PublicTransport => {
                self.public_transport_priority = enabled;
                if enabled {
                    self.emergency_vehicle_priority = false;
                }
            }
            PriorityKind::EmergencyVehicle => {
                self.emergency_vehicle_priority = enabled;
                if enabled {
                    self.public_transport_priority = false;
                }
            }
        }

        match self.active_priority() {
            Some(active) => {
                self.mode = SignalMode::Priority;
                self.current_signal = active.active_signal().to_string();
            }
            None => {
                self.mode = SignalMode::Normal;
                self.current_signal = NORMAL_CYCLE.to_string();
            }
        }
    }

    /// The priority lane in effect, emergency first.
    pub fn active_priority(&self) -> Option<PriorityKind> {
        if self.emergency_vehicle_priority {
            Some(PriorityKind::EmergencyVehicle)
        } else if self.public_transport_priority {
            Some(PriorityKind::PublicTransport)
        } else {
            None
        }
    }

    /// Check if the intersection runs its default plan.
    pub fn is_normal(&self) -> bool {
        self.mode == SignalMode::Normal
    }
}

impl Record for Intersection {
    type Id = RecordId;

    const ENTITY: &'static str = "Intersection";
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "currentSignal"];
    const DATE_FIELD: Option<&'static str> = None;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        let flag = |on: bool| FieldValue::text(if on { "On" } else { "Off" });
        match name {
            "id" => Some(FieldValue::text(self.id.as_str())),
            "name" => Some(FieldValue::text(&self.name)),
            "currentSignal" => Some(FieldValue::text(&self.current_signal)),
            "mode" => Some(FieldValue::text(self.mode.as_str())),
            "publicTransportPriority" => Some(flag(self.public_transport_priority)),
            "emergencyVehiclePriority" => Some(flag(self.emergency_vehicle_priority)),
            _ => None,
        }
    }

    fn audit_details(&self) -> String {
        format!(
            "Intersection: {}, Signal: {}, Mode: {}",
            self.name, self.current_signal, self.mode
        )
    }
}
