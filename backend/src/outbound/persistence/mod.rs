//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain record repository port, backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records; scope semantics come from `Visibility`.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Query capture**: pooled connections report every statement to the
//!   request query log used by the SQL logging middleware.
//!
//! # Example
//!
//! ```ignore
//! use groundwork::outbound::persistence::{DbPool, DieselArticleRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/app")).await?;
//! let repo = DieselArticleRepository::new(pool);
//! ```

mod diesel_article_repository;
mod instrumentation;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_article_repository::DieselArticleRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
