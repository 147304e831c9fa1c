//! Base record shared by every persisted entity.
//!
//! A [`Record`] wraps an entity body with the metadata every stored type
//! carries: a generated identifier, the active flag and the audit timestamps.
//!
//! ## Invariants
//! - `id` is generated once at creation and never changes.
//! - New records start active.
//! - `created_at <= updated_at`, and every mutation moves `updated_at`
//!   strictly forward.
//! - Timestamps carry microsecond precision, the resolution PostgreSQL
//!   stores, so a record reads back exactly as it was written.
//! - `is_active` is only changed through [`Record::set_active`], which the
//!   lifecycle service drives; request payloads never carry it.

use std::fmt;

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Globally unique record identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier loaded from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Metadata loaded back from storage, used to rebuild a [`Record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredMeta {
    pub id: RecordId,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored entity of type `T` plus its base metadata.
///
/// # Examples
/// ```
/// use chrono::Utc;
/// use groundwork::domain::Record;
///
/// let record = Record::new("body", Utc::now());
/// assert!(record.is_active());
/// assert_eq!(record.created_at(), record.updated_at());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<T> {
    id: RecordId,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    body: T,
}

impl<T> Record<T> {
    /// Create a new active record stamped at `now`.
    pub fn new(body: T, now: DateTime<Utc>) -> Self {
        let now = stamp(now);
        Self {
            id: RecordId::random(),
            is_active: true,
            created_at: now,
            updated_at: now,
            body,
        }
    }

    /// Rebuild a record from stored metadata.
    ///
    /// Stored rows violating `created_at <= updated_at` are clamped so the
    /// invariant holds for every record in memory.
    pub fn restore(meta: StoredMeta, body: T) -> Self {
        Self {
            id: meta.id,
            is_active: meta.is_active,
            created_at: meta.created_at,
            updated_at: meta.updated_at.max(meta.created_at),
            body,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    /// Replace the entity body and refresh `updated_at`.
    pub fn replace_body(&mut self, body: T, now: DateTime<Utc>) {
        self.body = body;
        self.touch(now);
    }

    /// Set the active flag and refresh `updated_at`.
    ///
    /// Returns `false` without touching the record when the flag already
    /// holds `active`.
    pub fn set_active(&mut self, active: bool, now: DateTime<Utc>) -> bool {
        if self.is_active == active {
            return false;
        }
        self.is_active = active;
        self.touch(now);
        true
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        // One tick forward when the clock stalls.
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = stamp(now).max(floor);
    }
}

fn stamp(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(6)
}
