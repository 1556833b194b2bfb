//! Record traits shared by every entity list.
//!
//! The filter, sort, and paginate pipeline is written once against
//! [`Record`]; the mutation gateway is written once against [`Managed`].

use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::value::FieldValue;

/// An identified entity held in a record store.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier type, unique within a collection and never reassigned.
    type Id: Clone + Eq + Hash + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Entity name used in messages and audit descriptions (e.g. `"Incident"`).
    const ENTITY: &'static str;

    /// Fields consulted by free-text search.
    const SEARCH_FIELDS: &'static [&'static str];

    /// Timestamp field consulted by date-range filters, if the entity has one.
    const DATE_FIELD: Option<&'static str>;

    /// The record's identifier.
    fn id(&self) -> &Self::Id;

    /// Look up a field by its camelCase name.
    ///
    /// Returns `None` for unknown fields and for optional fields that are
    /// unset.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Detail line for the audit log entry describing a mutation of this record.
    fn audit_details(&self) -> String;

    /// Value of the designated date-range field.
    fn date_value(&self) -> Option<FieldValue> {
        Self::DATE_FIELD.and_then(|name| self.field(name))
    }
}

/// Creation input for a managed record.
pub trait Draft {
    /// Required fields that are absent or empty, in declaration order.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Format rules beyond presence (e.g. a well-formed email address).
    fn check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Partial update input for a managed record.
pub trait Patch {
    /// Fields present in the patch whose value is empty.
    fn empty_fields(&self) -> Vec<&'static str>;

    /// Names of the fields the patch sets.
    fn changed_fields(&self) -> Vec<&'static str>;

    /// Format rules beyond presence.
    fn check(&self) -> AppResult<()> {
        Ok(())
    }
}

/// A record that can be created, patched, and deleted through the
/// mutation gateway.
pub trait Managed: Record {
    /// Creation input.
    type Draft: Draft + fmt::Debug;
    /// Partial update input.
    type Patch: Patch + fmt::Debug;

    /// Identifier for the `value`-th record issued by the collection's sequence.
    fn sequenced_id(value: u64) -> Self::Id;

    /// Build a record from a draft that passed validation.
    fn from_draft(id: Self::Id, draft: Self::Draft, now: DateTime<Utc>) -> AppResult<Self>;

    /// Shallow-merge a validated patch into the record.
    fn apply_patch(&mut self, patch: &Self::Patch, now: DateTime<Utc>) -> AppResult<()>;
}
