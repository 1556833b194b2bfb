//! Record identifiers and the sequence that assigns them.
//!
//! Ids are never derived from the current collection length: an
//! [`IdSequence`] only moves forward, so deleting a record and creating
//! another can never hand out the deleted id again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a newtype ID wrapper around a time-ordered `Uuid`.
macro_rules! define_uuid_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new time-ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner UUID value.
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_uuid_id!(
    /// Unique identifier for an audit log entry.
    AuditLogId
);

/// String identifier used by users, roles, incidents, and intersections.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from a prefix and a sequence number, zero-padded to `width`.
    pub fn sequenced(prefix: &str, value: u64, width: usize) -> Self {
        Self(format!("{prefix}{value:0width$}"))
    }

    /// Borrow the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Integer identifier used by camera locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CameraId(pub u32);

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CameraId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Monotonic counter scoped to one record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// A sequence whose first value is 1.
    pub fn new() -> Self {
        Self { last: 0 }
    }

    /// A sequence whose next value is `last + 1`.
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    /// Advance and return the next value.
    pub fn next_value(&mut self) -> u64 {
        self.last += 1;
        self.last
    }

    /// The most recently issued value (0 if none).
    pub fn last(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let mut seq = IdSequence::starting_after(6);
        assert_eq!(seq.next_value(), 7);
        assert_eq!(seq.next_value(), 8);
        assert_eq!(seq.last(), 8);
    }

    #[test]
    fn test_sequenced_record_id_is_padded() {
        assert_eq!(RecordId::sequenced("INC", 7, 3).as_str(), "INC007");
        assert_eq!(RecordId::sequenced("usr", 1234, 3).as_str(), "usr1234");
    }

    #[test]
    fn test_audit_ids_are_distinct() {
        assert_ne!(AuditLogId::new(), AuditLogId::new());
    }

    #[test]
    fn test_camera_id_from_str() {
        let id: CameraId = " 42".parse().expect("should parse");
        assert_eq!(id, CameraId(42));
    }
}
