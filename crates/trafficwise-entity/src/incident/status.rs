//! Incident status and its state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use trafficwise_core::AppError;

/// Handling status of an incident.
///
/// Forward edges:
///
/// ```text
/// Active        -> Investigating | Monitoring | Resolved
/// Investigating -> Monitoring | Resolved
/// Monitoring    -> Resolved
/// Scheduled     -> Active | Resolved
/// Resolved      -> Closed
/// Closed        (terminal)
/// ```
///
/// Escalation is not an edge of this graph; see [`IncidentStatus::can_escalate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentStatus {
    /// Ongoing and being handled.
    Active,
    /// Cause under investigation.
    Investigating,
    /// Under observation, no action needed yet.
    Monitoring,
    /// Planned closure or maintenance that has not started.
    Scheduled,
    /// Cleared.
    Resolved,
    /// Archived.
    Closed,
}

impl IncidentStatus {
    /// Every status, in display order.
    pub const ALL: [IncidentStatus; 6] = [
        Self::Active,
        Self::Investigating,
        Self::Monitoring,
        Self::Scheduled,
        Self::Resolved,
        Self::Closed,
    ];

    /// Statuses reachable in one step.
    pub fn next_statuses(&self) -> &'static [IncidentStatus] {
        match self {
            Self::Active => &[Self::Investigating, Self::Monitoring, Self::Resolved],
            Self::Investigating => &[Self::Monitoring, Self::Resolved],
            Self::Monitoring => &[Self::Resolved],
            Self::Scheduled => &[Self::Active, Self::Resolved],
            Self::Resolved => &[Self::Closed],
            Self::Closed => &[],
        }
    }

    /// Whether `next` is reachable in one step.
    pub fn can_transition_to(&self, next: IncidentStatus) -> bool {
        self.next_statuses().contains(&next)
    }

    /// Check if the status has no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Check if the incident still needs attention.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved | Self::Closed)
    }

    /// Escalation may force any non-archived incident back to `Active`.
    pub fn can_escalate(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether an incident may be created directly in this status.
    pub fn is_initial(&self) -> bool {
        self.is_open()
    }

    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Investigating => "Investigating",
            Self::Monitoring => "Monitoring",
            Self::Scheduled => "Scheduled",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IncidentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                AppError::invalid_fields(
                    format!(
                        "Invalid incident status: '{s}'. Expected one of: Active, Investigating, \
                         Monitoring, Scheduled, Resolved, Closed"
                    ),
                    ["status"],
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_edges() {
        use IncidentStatus::*;
        assert!(Active.can_transition_to(Investigating));
        assert!(Active.can_transition_to(Resolved));
        assert!(Investigating.can_transition_to(Monitoring));
        assert!(Monitoring.can_transition_to(Resolved));
        assert!(Scheduled.can_transition_to(Active));
        assert!(Resolved.can_transition_to(Closed));
    }

    #[test]
    fn test_rejected_edges() {
        use IncidentStatus::*;
        assert!(!Monitoring.can_transition_to(Active));
        assert!(!Resolved.can_transition_to(Active));
        assert!(!Investigating.can_transition_to(Scheduled));
        assert!(!Active.can_transition_to(Active));
        for status in IncidentStatus::ALL {
            assert!(!Closed.can_transition_to(status));
        }
    }

    #[test]
    fn test_escalation_allowed_until_closed() {
        assert!(IncidentStatus::Resolved.can_escalate());
        assert!(IncidentStatus::Scheduled.can_escalate());
        assert!(!IncidentStatus::Closed.can_escalate());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "investigating".parse::<IncidentStatus>().unwrap(),
            IncidentStatus::Investigating
        );
        assert!("pending".parse::<IncidentStatus>().is_err());
    }
}
