//! Typed field values exposed by records for filtering and sorting.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// The value of one named record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text.
    Text(String),
    /// A numeric quantity.
    Number(f64),
    /// A member of an ordered enumeration (e.g. severity). Compared by
    /// `rank`, matched and searched by `label`.
    Rank {
        /// Position in the enumeration's order (higher = greater).
        rank: u8,
        /// Display label.
        label: String,
    },
    /// An instant. `None` marks a sentinel or unparseable date such as
    /// a user's "Never" last login.
    Timestamp(Option<DateTime<Utc>>),
}

impl FieldValue {
    /// Build a text value.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a rank value.
    pub fn rank(rank: u8, label: impl Into<String>) -> Self {
        Self::Rank {
            rank,
            label: label.into(),
        }
    }

    /// Build a timestamp value.
    pub fn timestamp(instant: DateTime<Utc>) -> Self {
        Self::Timestamp(Some(instant))
    }

    /// The textual form used by free-text search and exact field matches.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// The instant held by a valid timestamp.
    pub fn as_instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Timestamp(instant) => *instant,
            _ => None,
        }
    }

    /// Type-aware comparison.
    ///
    /// Returns `None` when the values are not comparable: different
    /// kinds, or a timestamp that did not parse. Callers treat `None` as
    /// neither less nor greater.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(compare_text(a, b)),
            (Self::Number(a), Self::Number(b)) => Some(a.total_cmp(b)),
            (Self::Rank { rank: a, .. }, Self::Rank { rank: b, .. }) => Some(a.cmp(b)),
            (Self::Timestamp(Some(a)), Self::Timestamp(Some(b))) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Rank { label, .. } => f.write_str(label),
            Self::Timestamp(Some(instant)) => write!(f, "{}", instant.format("%Y-%m-%d %H:%M")),
            Self::Timestamp(None) => f.write_str("Never"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::timestamp(value)
    }
}

/// Parse the timestamp spellings the console accepts.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM`, `YYYY-MM-DD HH:MM AM`, and a bare
/// `YYYY-MM-DD` (midnight UTC). Anything else, including the `"Never"`
/// sentinel, yields `None`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M", "%Y-%m-%d %I:%M %p", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Case-folded lexical comparison, falling back to the raw strings so
/// that values differing only in case still order deterministically.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_text_comparison_ignores_case_first() {
        let a = FieldValue::text("alice");
        let b = FieldValue::text("Bob");
        assert_eq!(a.compare(&b), Some(Ordering::Less));
    }

    #[test]
    fn test_rank_compares_by_rank_not_label() {
        let critical = FieldValue::rank(4, "Critical");
        let low = FieldValue::rank(1, "Low");
        assert_eq!(critical.compare(&low), Some(Ordering::Greater));
    }

    #[test]
    fn test_invalid_timestamp_is_incomparable() {
        let valid = FieldValue::timestamp(Utc.with_ymd_and_hms(2024, 7, 28, 10, 0, 0).unwrap());
        let never = FieldValue::Timestamp(None);
        assert_eq!(valid.compare(&never), None);
        assert_eq!(never.compare(&never), None);
        assert_eq!(never.to_string(), "Never");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 28, 15, 20, 0).unwrap();
        assert_eq!(parse_timestamp("2024-07-28 15:20"), Some(expected));
        assert_eq!(parse_timestamp("2024-07-28 03:20 PM"), Some(expected));
        assert_eq!(parse_timestamp("2024-07-28T15:20:00Z"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-07-28"),
            Some(Utc.with_ymd_and_hms(2024, 7, 28, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("Never"), None);
    }
}
