//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local record store, used when no database is
//!   configured and throughout the tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//!
//! Adapters translate between domain types and storage representations and
//! hold no business logic.

pub mod memory;
pub mod persistence;
