//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use groundwork::doc::DocsInfo;
use groundwork::outbound::persistence::DbPool;
use groundwork::settings::Settings;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) debug: bool,
    pub(crate) max_upload_bytes: usize,
    pub(crate) docs: DocsInfo,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Derive the server shape from application settings.
    ///
    /// Storage is attached separately with [`Self::with_db_pool`]; without a
    /// pool the server keeps articles in memory.
    #[must_use]
    pub fn new(settings: &Settings, bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            debug: settings.debug(),
            max_upload_bytes: settings.max_upload_bytes(),
            docs: DocsInfo::from(settings),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the persistence adapter.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Whether the debug request observers are installed.
    #[must_use]
    pub fn debug(&self) -> bool {
        self.debug
    }
}
