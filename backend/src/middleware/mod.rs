//! Request middleware.
//!
//! `Trace` runs on every request. `ClientIp` and `SqlQueryLog` are debug
//! observers the server installs only when not running in production.

pub mod client_ip;
pub mod sql_log;
pub mod trace;

pub use client_ip::ClientIp;
pub use sql_log::SqlQueryLog;
pub use trace::Trace;
