//! Driving port for article reads.

use async_trait::async_trait;

use crate::domain::{ArticleRecord, Error, RecordId, Visibility};

/// Read use-cases exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesQuery: Send + Sync {
    /// List articles visible in `scope`.
    async fn list(&self, scope: Visibility) -> Result<Vec<ArticleRecord>, Error>;

    /// Fetch one article visible in `scope`, or a not-found error.
    async fn get(&self, id: &RecordId, scope: Visibility) -> Result<ArticleRecord, Error>;
}
