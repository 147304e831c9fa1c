//! In-memory record store.
//!
//! Backs the API when no database is configured and serves as the reference
//! adapter in tests. All state lives behind a single `RwLock`, so each call
//! sees a consistent snapshot.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{Record, RecordId, Visibility};

/// `RecordRepository` adapter holding records in a map.
#[derive(Debug)]
pub struct InMemoryRecordStore<T> {
    records: RwLock<BTreeMap<RecordId, Record<T>>>,
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T> InMemoryRecordStore<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<G>(_: PoisonError<G>) -> RecordPersistenceError {
    RecordPersistenceError::query("in-memory store lock poisoned")
}

#[async_trait]
impl<T> RecordRepository<T> for InMemoryRecordStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn insert(&self, record: &Record<T>) -> Result<(), RecordPersistenceError> {
        let mut records = self.records.write().map_err(poisoned)?;
        if records.contains_key(&record.id()) {
            return Err(RecordPersistenceError::query(format!(
                "duplicate record id {}",
                record.id()
            )));
        }
        records.insert(record.id(), record.clone());
        Ok(())
    }

    async fn update_body(
        &self,
        record: &Record<T>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records
            .get_mut(&record.id())
            .filter(|slot| slot.is_active())
            .map(|slot| {
                slot.replace_body(record.body().clone(), record.updated_at());
                slot.clone()
            }))
    }

    async fn set_active(
        &self,
        id: &RecordId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        let mut records = self.records.write().map_err(poisoned)?;
        Ok(records.get_mut(id).map(|slot| {
            slot.set_active(active, updated_at);
            slot.clone()
        }))
    }

    async fn find(
        &self,
        id: &RecordId,
        scope: Visibility,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .get(id)
            .filter(|record| scope.includes(record.is_active()))
            .cloned())
    }

    async fn list(&self, scope: Visibility) -> Result<Vec<Record<T>>, RecordPersistenceError> {
        let records = self.records.read().map_err(poisoned)?;
        let mut visible: Vec<Record<T>> = records
            .values()
            .filter(|record| scope.includes(record.is_active()))
            .cloned()
            .collect();
        visible.sort_by_key(|record| (record.created_at(), record.id()));
        Ok(visible)
    }
}
