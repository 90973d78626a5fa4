use std::collections::HashMap;
use std::sync::RwLock;

use crate::analytics::domain::{PropertyId, PropertyRecord, ValidationError};

/// Storage abstraction so the portfolio service can be exercised in isolation.
pub trait PropertyStore: Send + Sync {
    fn insert(&self, record: PropertyRecord) -> Result<PropertyRecord, StoreError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, StoreError>;
    /// Replaces the record with the same id in place. `None` when the id is
    /// unknown.
    fn update(&self, record: PropertyRecord) -> Result<Option<PropertyRecord>, StoreError>;
    fn remove(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, StoreError>;
    /// Every record, in insertion order.
    fn all(&self) -> Result<Vec<PropertyRecord>, StoreError>;
    fn len(&self) -> Result<usize, StoreError>;

    fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("property '{0}' already exists")]
    Conflict(PropertyId),
    #[error("invalid property: {0}")]
    Invalid(#[from] ValidationError),
    #[error("property store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Entries {
    records: Vec<PropertyRecord>,
    positions: HashMap<PropertyId, usize>,
}

/// Process-local store. Records are validated on the way in and kept in
/// the order they were inserted.
#[derive(Debug, Default)]
pub struct InMemoryPropertyStore {
    entries: RwLock<Entries>,
}

impl InMemoryPropertyStore {
    pub fn with_records<I>(records: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = PropertyRecord>,
    {
        let store = Self::default();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("property store lock poisoned".to_string())
}

impl PropertyStore for InMemoryPropertyStore {
    fn insert(&self, record: PropertyRecord) -> Result<PropertyRecord, StoreError> {
        record.validate()?;

        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        if guard.positions.contains_key(&record.id) {
            return Err(StoreError::Conflict(record.id));
        }

        let position = guard.records.len();
        guard.positions.insert(record.id.clone(), position);
        guard.records.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, StoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard
            .positions
            .get(id)
            .and_then(|&position| guard.records.get(position))
            .cloned())
    }

    fn update(&self, record: PropertyRecord) -> Result<Option<PropertyRecord>, StoreError> {
        record.validate()?;

        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        let Some(&position) = guard.positions.get(&record.id) else {
            return Ok(None);
        };
        guard.records[position] = record.clone();
        Ok(Some(record))
    }

    fn remove(&self, id: &PropertyId) -> Result<Option<PropertyRecord>, StoreError> {
        let mut guard = self.entries.write().map_err(|_| poisoned())?;
        let Some(position) = guard.positions.remove(id) else {
            return Ok(None);
        };

        let removed = guard.records.remove(position);
        for index in guard.positions.values_mut() {
            if *index > position {
                *index -= 1;
            }
        }
        Ok(Some(removed))
    }

    fn all(&self) -> Result<Vec<PropertyRecord>, StoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.records.clone())
    }

    fn len(&self) -> Result<usize, StoreError> {
        let guard = self.entries.read().map_err(|_| poisoned())?;
        Ok(guard.records.len())
    }
}
