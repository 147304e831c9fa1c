//! Active-flag transitions for stored records.
//!
//! The repository only reads and writes; flipping `is_active` happens here.
//! Deactivation is a soft delete: the record stays in storage and moves to
//! the inactive scope. Related records are not touched.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{RecordPersistenceError, RecordRepository};
use super::{Record, RecordId, Visibility};

/// Errors raised by [`RecordLifecycle`] transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// No record with this identifier exists in any scope.
    #[error("record {id} not found")]
    NotFound { id: RecordId },
    /// The underlying store failed.
    #[error(transparent)]
    Persistence(#[from] RecordPersistenceError),
}

/// Applies soft delete and restore to records of type `T`.
pub struct RecordLifecycle<T> {
    repository: Arc<dyn RecordRepository<T>>,
    clock: Arc<dyn Clock>,
}

impl<T> Clone for RecordLifecycle<T> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T> RecordLifecycle<T>
where
    T: Send + Sync + 'static,
{
    pub fn new(repository: Arc<dyn RecordRepository<T>>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Move a record to the inactive scope.
    ///
    /// Deactivating an already inactive record returns it unchanged.
    pub async fn deactivate(&self, id: &RecordId) -> Result<Record<T>, LifecycleError> {
        self.transition(id, false).await
    }

    /// Move a record back to the active scope.
    pub async fn reactivate(&self, id: &RecordId) -> Result<Record<T>, LifecycleError> {
        self.transition(id, true).await
    }

    async fn transition(&self, id: &RecordId, active: bool) -> Result<Record<T>, LifecycleError> {
        let mut record = self
            .repository
            .find(id, Visibility::All)
            .await?
            .ok_or(LifecycleError::NotFound { id: *id })?;

        if !record.set_active(active, self.clock.utc()) {
            return Ok(record);
        }

        let stored = self
            .repository
            .set_active(id, active, record.updated_at())
            .await?
            .ok_or(LifecycleError::NotFound { id: *id })?;
        info!(record_id = %id, is_active = active, "record visibility changed");
        Ok(stored)
    }
}
