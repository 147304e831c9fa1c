//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`). Compiled for tests and behind the `test-support` feature.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{Record, RecordId, Visibility};

/// Clock whose current instant only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock pinned to a fixed, well-known instant.
    pub fn fixture() -> Arc<Self> {
        Arc::new(Self::new(fixture_timestamp()))
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed timestamp used by clock fixtures.
pub fn fixture_timestamp() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single() {
        Some(timestamp) => timestamp,
        None => panic!("valid fixture timestamp"),
    }
}

/// Repository that fails every call with the configured error.
pub struct FailingRecordStore(pub RecordPersistenceError);

#[async_trait]
impl<T> RecordRepository<T> for FailingRecordStore
where
    T: Send + Sync + 'static,
{
    async fn insert(&self, _record: &Record<T>) -> Result<(), RecordPersistenceError> {
        Err(self.0.clone())
    }

    async fn update_body(
        &self,
        _record: &Record<T>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        Err(self.0.clone())
    }

    async fn set_active(
        &self,
        _id: &RecordId,
        _active: bool,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        Err(self.0.clone())
    }

    async fn find(
        &self,
        _id: &RecordId,
        _scope: Visibility,
    ) -> Result<Option<Record<T>>, RecordPersistenceError> {
        Err(self.0.clone())
    }

    async fn list(&self, _scope: Visibility) -> Result<Vec<Record<T>>, RecordPersistenceError> {
        Err(self.0.clone())
    }
}
