//! Predicate filter.

use tracing::debug;

use trafficwise_core::traits::Record;
use trafficwise_core::types::{DateRange, FilterSpec};

/// Records matching every active predicate of `spec`, in their original order.
pub fn filter_records<R: Record>(records: &[R], spec: &FilterSpec) -> Vec<R> {
    if spec.is_identity() {
        return records.to_vec();
    }

    let filtered: Vec<R> = records
        .iter()
        .filter(|record| matches(*record, spec))
        .cloned()
        .collect();
    debug!(
        entity = R::ENTITY,
        total = records.len(),
        matched = filtered.len(),
        "Filtered records"
    );
    filtered
}

/// Whether a single record satisfies `spec`.
pub fn matches<R: Record>(record: &R, spec: &FilterSpec) -> bool {
    if let Some(term) = spec.text_term() {
        if !matches_text(record, term) {
            return false;
        }
    }
    if !spec
        .active_matches()
        .all(|(field, value)| matches_field(record, field, value))
    {
        return false;
    }
    match spec.active_range() {
        // Entities without a date column ignore the range.
        Some(range) if R::DATE_FIELD.is_some() => matches_range(record, range),
        _ => true,
    }
}

fn matches_text<R: Record>(record: &R, term: &str) -> bool {
    let needle = term.to_lowercase();
    R::SEARCH_FIELDS.iter().any(|name| {
        record
            .field(name)
            .is_some_and(|value| value.as_text().to_lowercase().contains(&needle))
    })
}

fn matches_field<R: Record>(record: &R, field: &str, expected: &str) -> bool {
    record
        .field(field)
        .is_some_and(|value| value.as_text() == expected)
}

// Records without a valid date never fall inside an active range.
fn matches_range<R: Record>(record: &R, range: &DateRange) -> bool {
    record
        .date_value()
        .and_then(|value| value.as_instant())
        .is_some_and(|instant| range.contains(instant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use trafficwise_core::types::{RecordId, parse_timestamp};
    use trafficwise_entity::role::Role;
    use trafficwise_entity::user::{User, UserStatus};

    fn user(id: &str, name: &str, role: &str, last_login: &str) -> User {
        User {
            id: RecordId::from(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.to_string(),
            status: UserStatus::Active,
            last_login: parse_timestamp(last_login),
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("u1", "Alice", "Admin", "2024-07-28 10:00"),
            user("u2", "Bob", "Operator", "2024-07-27 23:59"),
            user("u3", "Charlie", "Operator", "Never"),
        ]
    }

    fn day(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    #[test]
    fn test_free_text_is_case_insensitive() {
        let found = filter_records(&users(), &FilterSpec::new().with_text("ALI"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "u1");
    }

    #[test]
    fn test_free_text_searches_email() {
        let found = filter_records(&users(), &FilterSpec::new().with_text("bob@"));
        assert_eq!(found[0].id.as_str(), "u2");
    }

    #[test]
    fn test_sentinel_disables_match() {
        let all = filter_records(&users(), &FilterSpec::new().with_match("role", "all"));
        assert_eq!(all.len(), 3);
        let ops = filter_records(&users(), &FilterSpec::new().with_match("role", "Operator"));
        assert_eq!(ops.len(), 2);
    }

    #[test]
    fn test_field_match_is_exact() {
        let none = filter_records(&users(), &FilterSpec::new().with_match("role", "operator"));
        assert!(none.is_empty());
    }

    #[test]
    fn test_end_date_covers_whole_day() {
        let spec = FilterSpec::new().with_range(DateRange::new(day("2024-07-27"), day("2024-07-27")));
        let found = filter_records(&users(), &spec);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.as_str(), "u2");
    }

    #[test]
    fn test_invalid_date_fails_active_range() {
        let spec = FilterSpec::new().with_range(DateRange::new(None, day("2030-01-01")));
        let found = filter_records(&users(), &spec);
        assert!(found.iter().all(|user| user.id.as_str() != "u3"));
    }

    #[test]
    fn test_range_ignored_without_date_field() {
        let roles = vec![Role {
            id: RecordId::from("role001"),
            name: "Admin".to_string(),
            permissions: vec!["Manage Users".to_string()],
        }];
        let spec = FilterSpec::new()
            .with_text("adm")
            .with_range(DateRange::new(day("2024-07-27"), day("2024-07-27")));
        assert_eq!(filter_records(&roles, &spec), roles);
    }

    #[test]
    fn test_unbounded_range_is_identity() {
        let spec = FilterSpec::new().with_range(DateRange::default());
        assert_eq!(filter_records(&users(), &spec), users());
    }
}
