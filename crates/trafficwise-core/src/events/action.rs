//! Kinds of record mutation recorded in the audit trail.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a successful mutation did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordAction {
    /// A record was created.
    Created,
    /// A record's fields were patched.
    Updated,
    /// A record was removed.
    Deleted,
    /// An incident moved along its status state machine.
    Transitioned,
    /// An incident was marked resolved.
    Resolved,
    /// An incident was escalated to critical, active handling.
    Escalated,
    /// A resolved incident was archived.
    Closed,
    /// An intersection's signal was manually overridden.
    Overridden,
    /// An intersection's priority lanes were switched.
    Reprioritized,
}

impl RecordAction {
    /// The past-tense verb used in audit descriptions.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Transitioned => "transitioned",
            Self::Resolved => "resolved",
            Self::Escalated => "escalated",
            Self::Closed => "closed",
            Self::Overridden => "overrode",
            Self::Reprioritized => "reprioritized",
        }
    }
}

impl fmt::Display for RecordAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.verb())
    }
}
