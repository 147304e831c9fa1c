//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised against mocks without storage.

use std::sync::Arc;

use crate::domain::ports::{ArticlesCommand, ArticlesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<dyn ArticlesQuery>,
    pub articles_command: Arc<dyn ArticlesCommand>,
}

impl HttpState {
    /// Bundle the read and write ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use groundwork::domain::{Article, ArticleService};
    /// use groundwork::inbound::http::state::HttpState;
    /// use groundwork::outbound::memory::InMemoryRecordStore;
    /// use mockable::DefaultClock;
    ///
    /// let service = ArticleService::new(
    ///     Arc::new(InMemoryRecordStore::<Article>::new()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let state = HttpState::new(Arc::new(service.clone()), Arc::new(service));
    /// let _reads = state.articles.clone();
    /// ```
    pub fn new(articles: Arc<dyn ArticlesQuery>, articles_command: Arc<dyn ArticlesCommand>) -> Self {
        Self {
            articles,
            articles_command,
        }
    }

    /// Serve reads and writes from one service implementing both ports.
    pub fn from_service<S>(service: S) -> Self
    where
        S: ArticlesQuery + ArticlesCommand + 'static,
    {
        let service = Arc::new(service);
        Self {
            articles: service.clone(),
            articles_command: service,
        }
    }
}
