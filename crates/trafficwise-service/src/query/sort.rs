//! Stable, type-aware sort comparator.
//!
//! Values that cannot be compared (an unparseable date, a missing
//! optional field) form one group that sorts after every valid value in
//! both directions, keeping input order within the group.

use std::cmp::Ordering;

use tracing::debug;

use trafficwise_core::traits::Record;
use trafficwise_core::types::{FieldValue, SortDirection, SortField};

/// Sort `records` by one field. Stable in both directions.
pub fn sort_records<R: Record>(records: Vec<R>, sort: &SortField) -> Vec<R> {
    debug!(
        entity = R::ENTITY,
        field = %sort.field,
        direction = sort.direction.as_str(),
        count = records.len(),
        "Sorting records"
    );

    let mut keyed: Vec<(Option<FieldValue>, R)> = records
        .into_iter()
        .map(|record| (sort_key(record.field(&sort.field)), record))
        .collect();

    let direction = sort.direction;
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), direction));
    keyed.into_iter().map(|(_, record)| record).collect()
}

fn sort_key(value: Option<FieldValue>) -> Option<FieldValue> {
    value.filter(|value| !matches!(value, FieldValue::Timestamp(None)))
}

// Missing keys go last regardless of direction.
fn compare_keys(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.compare(b).unwrap_or(Ordering::Equal), direction),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
