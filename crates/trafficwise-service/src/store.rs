//! Copy-on-write record store.
//!
//! A [`RecordStore`] is an immutable snapshot of one entity collection.
//! Every mutating operation returns a new store and leaves the receiver
//! untouched, so views derived from an older snapshot stay valid.

use std::sync::Arc;

use trafficwise_core::traits::Record;
use trafficwise_core::{AppError, AppResult};

/// Ordered, newest-first collection of one record type.
#[derive(Debug, Clone)]
pub struct RecordStore<R: Record> {
    records: Arc<Vec<R>>,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(Vec::new()),
        }
    }

    /// A store holding `records` in the given order.
    ///
    /// Fails with a duplicate-id error if two records share an id.
    pub fn from_records(records: Vec<R>) -> AppResult<Self> {
        for (index, record) in records.iter().enumerate() {
            if records[..index].iter().any(|other| other.id() == record.id()) {
                return Err(AppError::duplicate_id(format!(
                    "{} {} appears more than once",
                    R::ENTITY,
                    record.id()
                )));
            }
        }
        Ok(Self {
            records: Arc::new(records),
        })
    }

    /// Borrow the records in store order.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Iterate over the records in store order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Whether a record with `id` is present.
    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    /// Look up a record by id, failing with a not-found error.
    pub fn require(&self, id: &R::Id) -> AppResult<&R> {
        self.get(id)
            .ok_or_else(|| AppError::not_found(format!("{} {} not found", R::ENTITY, id)))
    }

    /// A new store with `record` prepended.
    pub fn insert(&self, record: R) -> AppResult<Self> {
        if self.contains(record.id()) {
            return Err(AppError::duplicate_id(format!(
                "{} {} already exists",
                R::ENTITY,
                record.id()
            )));
        }
        let mut records = Vec::with_capacity(self.records.len() + 1);
        records.push(record);
        records.extend(self.records.iter().cloned());
        Ok(Self {
            records: Arc::new(records),
        })
    }

    /// A new store in which the record with `id` has been replaced by the
    /// result of `change`. Returns the store and the updated record.
    ///
    /// If `change` fails the receiver is unaffected and the error is
    /// returned as is.
    pub fn update<F>(&self, id: &R::Id, change: F) -> AppResult<(Self, R)>
    where
        F: FnOnce(&mut R) -> AppResult<()>,
    {
        let index = self
            .records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| AppError::not_found(format!("{} {} not found", R::ENTITY, id)))?;

        let mut updated = self.records[index].clone();
        change(&mut updated)?;
        if updated.id() != id {
            return Err(AppError::internal(format!(
                "{} {} changed its id during an update",
                R::ENTITY,
                id
            )));
        }

        let mut records = (*self.records).clone();
        records[index] = updated.clone();
        Ok((
            Self {
                records: Arc::new(records),
            },
            updated,
        ))
    }

    /// A new store without the record with `id`. Absent ids are ignored.
    pub fn delete(&self, id: &R::Id) -> Self {
        if !self.contains(id) {
            return self.clone();
        }
        Self {
            records: Arc::new(
                self.records
                    .iter()
                    .filter(|record| record.id() != id)
                    .cloned()
                    .collect(),
            ),
        }
    }
}

impl<R: Record + PartialEq> PartialEq for RecordStore<R> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl<'a, R: Record> IntoIterator for &'a RecordStore<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trafficwise_core::error::ErrorKind;
    use trafficwise_core::types::{RecordId, parse_timestamp};
    use trafficwise_entity::user::{User, UserStatus};

    fn user(id: &str, name: &str) -> User {
        User {
            id: RecordId::from(id),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: "Operator".to_string(),
            status: UserStatus::Active,
            last_login: parse_timestamp("2024-07-28 10:00"),
        }
    }

    #[test]
    fn test_insert_prepends_and_keeps_original() {
        let store = RecordStore::from_records(vec![user("u1", "Alice")]).unwrap();
        let next = store.insert(user("u2", "Bob")).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(next.as_slice()[0].name, "Bob");
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let store = RecordStore::from_records(vec![user("u1", "Alice")]).unwrap();
        let err = store.insert(user("u1", "Alias")).unwrap_err();
        assert!(err.is(ErrorKind::DuplicateId));
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = RecordStore::<User>::new();
        let err = store.update(&RecordId::from("u9"), |_| Ok(())).unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[test]
    fn test_failed_update_leaves_store_untouched() {
        let store = RecordStore::from_records(vec![user("u1", "Alice")]).unwrap();
        let result = store.update(&RecordId::from("u1"), |record| {
            record.name = "Mallory".to_string();
            Err(AppError::validation("rejected"))
        });
        assert!(result.is_err());
        assert_eq!(store.as_slice()[0].name, "Alice");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = RecordStore::from_records(vec![user("u1", "Alice")]).unwrap();
        let once = store.delete(&RecordId::from("u1"));
        let twice = once.delete(&RecordId::from("u1"));
        assert!(twice.is_empty());
        assert_eq!(once, twice);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let err = RecordStore::from_records(vec![user("u1", "Alice"), user("u1", "Bob")])
            .unwrap_err();
        assert!(err.is(ErrorKind::DuplicateId));
    }
}
