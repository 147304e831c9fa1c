//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Articles, the concrete record type.
    ///
    /// Carries the base record columns (`id`, `is_active`, `created_at`,
    /// `updated_at`) alongside the article content.
    articles (id) {
        /// Primary key: UUID v4 generated by the application.
        id -> Uuid,
        /// Article title (max 200 characters).
        title -> Varchar,
        /// Article body.
        body -> Text,
        /// Visibility flag; `false` marks a soft-deleted row.
        is_active -> Bool,
        /// Creation timestamp, never updated.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
