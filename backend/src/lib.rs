//! Scoped-visibility record store exposed over a REST API.
//!
//! - [`domain`]: records, visibility scopes, lifecycle and ports
//! - [`outbound`]: in-memory and PostgreSQL adapters
//! - [`inbound`]: HTTP handlers
//! - [`middleware`]: request tracing and the debug observers

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod query_log;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
