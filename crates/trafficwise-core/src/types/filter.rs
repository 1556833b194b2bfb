//! Filter specification types for record lists.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Field-match values that disable the constraint for their field.
pub const MATCH_ANY_SENTINELS: [&str; 2] = ["all", "all_users"];

/// Inclusive calendar-date range applied to a record's designated
/// timestamp field. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day included.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    /// Last day included (the whole day).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Create a range from optional bounds.
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Whether neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Lower bound as an instant (inclusive).
    pub fn lower_bound(&self) -> Option<DateTime<Utc>> {
        self.start
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Upper bound as an instant (exclusive): midnight after `end`.
    pub fn upper_bound(&self) -> Option<DateTime<Utc>> {
        self.end
            .and_then(|day| day.checked_add_days(Days::new(1)))
            .and_then(|day| day.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Whether `instant` falls inside the range.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        if let Some(lower) = self.lower_bound() {
            if instant < lower {
                return false;
            }
        }
        if let Some(upper) = self.upper_bound() {
            if instant >= upper {
                return false;
            }
        }
        true
    }
}

/// A conjunction of free-text, field-equality, and date-range constraints.
///
/// The default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    /// Case-insensitive substring matched against the record's searchable fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
    /// Exact field values keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_matches: BTreeMap<String, String>,
    /// Range over the record's designated timestamp field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl FilterSpec {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text term.
    pub fn with_text(mut self, term: impl Into<String>) -> Self {
        self.free_text = Some(term.into());
        self
    }

    /// Add an exact field match.
    pub fn with_match(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_matches.insert(field.into(), value.into());
        self
    }

    /// Set the date range.
    pub fn with_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// The free-text term, if it constrains anything.
    pub fn text_term(&self) -> Option<&str> {
        self.free_text.as_deref().filter(|term| !term.is_empty())
    }

    /// Field matches that actually constrain (sentinels removed).
    pub fn active_matches(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_matches
            .iter()
            .filter(|(_, value)| !is_match_any(value))
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }

    /// The date range, if it constrains anything.
    pub fn active_range(&self) -> Option<&DateRange> {
        self.date_range.as_ref().filter(|range| !range.is_unbounded())
    }

    /// Whether the filter leaves every record in place.
    pub fn is_identity(&self) -> bool {
        self.text_term().is_none()
            && self.active_matches().next().is_none()
            && self.active_range().is_none()
    }
}

/// Whether a field-match value is a "no constraint" sentinel.
pub fn is_match_any(value: &str) -> bool {
    MATCH_ANY_SENTINELS.contains(&value)
}
