//! Sorting types for record lists.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    /// Return the lowercase keyword for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Record field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// The sort that results from a user choosing `field` while `current`
    /// is active: the same field flips direction, a new field starts
    /// ascending.
    pub fn toggled(current: Option<&SortField>, field: &str) -> SortField {
        match current {
            Some(active) if active.field == field => {
                Self::new(field, active.direction.reversed())
            }
            _ => Self::asc(field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_field_flips() {
        let active = SortField::asc("severity");
        assert_eq!(
            SortField::toggled(Some(&active), "severity"),
            SortField::desc("severity")
        );
        let back = SortField::toggled(Some(&SortField::desc("severity")), "severity");
        assert_eq!(back.direction, SortDirection::Asc);
    }

    #[test]
    fn test_toggle_new_field_resets_to_ascending() {
        let active = SortField::desc("reportedAt");
        assert_eq!(
            SortField::toggled(Some(&active), "location"),
            SortField::asc("location")
        );
        assert_eq!(SortField::toggled(None, "id"), SortField::asc("id"));
    }
}
