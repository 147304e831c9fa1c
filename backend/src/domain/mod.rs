//! Domain primitives, services and ports.
//!
//! Purpose: define the base record shared by every stored entity, the
//! visibility scopes over its active flag, and the use-cases built on them.
//! Nothing here depends on actix or Diesel.
//!
//! Public surface:
//! - `Record` / `RecordId`: base metadata (id, active flag, timestamps).
//! - `Visibility`: the all/active/inactive retrieval scopes.
//! - `RecordLifecycle`: soft delete and restore transitions.
//! - `Article` / `ArticleService`: the concrete record type and its use-cases.
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.

pub mod article;
mod article_service;
pub mod error;
pub mod ports;
pub mod record;
pub mod record_lifecycle;
pub mod trace_id;
pub mod visibility;

pub use self::article::{Article, ArticleRecord, ArticleValidationError};
pub use self::article_service::ArticleService;
pub use self::error::{Error, ErrorCode};
pub use self::record::{Record, RecordId, StoredMeta};
pub use self::record_lifecycle::{LifecycleError, RecordLifecycle};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::visibility::{UnknownVisibility, Visibility};
