//! Incident severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trafficwise_core::AppError;
use trafficwise_core::types::FieldValue;

/// Severity of an incident, ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Minor impact.
    Low,
    /// Noticeable delays.
    Medium,
    /// Significant disruption.
    High,
    /// Emergency; maximum severity.
    Critical,
}

impl Severity {
    /// Return the numeric rank (higher = more severe).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Return the severity label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// The ranked field value used by filters and sorts.
    pub fn to_field(&self) -> FieldValue {
        FieldValue::rank(self.rank(), self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(AppError::invalid_fields(
                format!("Invalid severity: '{s}'. Expected one of: Low, Medium, High, Critical"),
                ["severity"],
            )),
        }
    }
}
