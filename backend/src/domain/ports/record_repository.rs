//! Driven port for scoped record storage.
//!
//! Adapters implement [`RecordRepository::list`] and
//! [`RecordRepository::find`] once, applying the [`Visibility`] predicate; the
//! three named views are provided on top of them.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Record, RecordId, Visibility};

use super::define_port_error;

define_port_error! {
    /// Storage failures raised by record repository adapters.
    ///
    /// These are passed through unchanged; the store adds no error kinds of
    /// its own.
    pub enum RecordPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "record repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "record repository query failed: {message}",
    }
}

/// Storage for records of type `T` with active/inactive scoping.
///
/// Reads never mutate. `list` orders by `created_at`, then `id`. Body edits
/// and active-flag changes are separate writes, so neither can undo the other.
#[async_trait]
pub trait RecordRepository<T>: Send + Sync
where
    T: Send + Sync + 'static,
{
    /// Persist a freshly created record.
    async fn insert(&self, record: &Record<T>) -> Result<(), RecordPersistenceError>;

    /// Write a new body and `updated_at` for a record that is still active.
    ///
    /// The active flag is never written here. Returns the stored record, or
    /// `None` when no active record with that identifier exists.
    async fn update_body(
        &self,
        record: &Record<T>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError>;

    /// Set the active flag and `updated_at` of a record, leaving its body
    /// alone.
    ///
    /// Returns the stored record, or `None` when the identifier is unknown.
    async fn set_active(
        &self,
        id: &RecordId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Record<T>>, RecordPersistenceError>;

    /// Fetch one record if it exists and is visible in `scope`.
    async fn find(
        &self,
        id: &RecordId,
        scope: Visibility,
    ) -> Result<Option<Record<T>>, RecordPersistenceError>;

    /// Fetch every record visible in `scope`.
    async fn list(&self, scope: Visibility) -> Result<Vec<Record<T>>, RecordPersistenceError>;

    /// Default view: every record, no filter applied.
    async fn all(&self) -> Result<Vec<Record<T>>, RecordPersistenceError> {
        self.list(Visibility::All).await
    }

    /// Records with `is_active = true`.
    async fn active(&self) -> Result<Vec<Record<T>>, RecordPersistenceError> {
        self.list(Visibility::Active).await
    }

    /// Records with `is_active = false`.
    async fn inactive(&self) -> Result<Vec<Record<T>>, RecordPersistenceError> {
        self.list(Visibility::Inactive).await
    }
}
