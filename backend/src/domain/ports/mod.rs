//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (storage) expose strongly typed errors so adapters map their
//! failures into predictable variants; driving ports (use-cases) speak the
//! domain [`Error`](crate::domain::Error).

mod macros;
pub(crate) use macros::define_port_error;

mod articles_command;
mod articles_query;
mod record_repository;

#[cfg(test)]
pub use articles_command::MockArticlesCommand;
pub use articles_command::ArticlesCommand;
#[cfg(test)]
pub use articles_query::MockArticlesQuery;
pub use articles_query::ArticlesQuery;
pub use record_repository::{RecordPersistenceError, RecordRepository};
