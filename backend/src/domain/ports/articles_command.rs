//! Driving port for article mutations.

use async_trait::async_trait;

use crate::domain::{Article, ArticleRecord, Error, RecordId};

/// Write use-cases exposed to inbound adapters.
///
/// The active flag is never part of the input; only `deactivate` and
/// `reactivate` change it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticlesCommand: Send + Sync {
    /// Store a new, active article.
    async fn create(&self, article: Article) -> Result<ArticleRecord, Error>;

    /// Replace the content of an active article.
    async fn update(&self, id: &RecordId, article: Article) -> Result<ArticleRecord, Error>;

    /// Soft delete: move the article to the inactive scope.
    async fn deactivate(&self, id: &RecordId) -> Result<ArticleRecord, Error>;

    /// Restore a soft-deleted article to the active scope.
    async fn reactivate(&self, id: &RecordId) -> Result<ArticleRecord, Error>;
}
