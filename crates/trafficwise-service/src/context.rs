//! Actor context carrying who performs a mutation and when.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Context for the current console action.
///
/// Passed into every mutating call so that audit descriptions and
/// timestamps are consistent within one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// Display name of the acting operator.
    pub actor: String,
    /// When the action was requested.
    pub request_time: DateTime<Utc>,
}

impl ActorContext {
    /// Creates a context stamped with the current time.
    pub fn new(actor: impl Into<String>) -> Self {
        Self::at(actor, Utc::now())
    }

    /// Creates a context with a fixed request time.
    pub fn at(actor: impl Into<String>, request_time: DateTime<Utc>) -> Self {
        Self {
            actor: actor.into(),
            request_time,
        }
    }
}
