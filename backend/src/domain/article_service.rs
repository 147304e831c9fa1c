//! Article use-cases backed by the scoped record store.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use super::ports::{ArticlesCommand, ArticlesQuery, RecordPersistenceError, RecordRepository};
use super::record_lifecycle::{LifecycleError, RecordLifecycle};
use super::{Article, ArticleRecord, Error, Record, RecordId, Visibility};

/// Implements [`ArticlesQuery`] and [`ArticlesCommand`] over a
/// [`RecordRepository`].
#[derive(Clone)]
pub struct ArticleService {
    repository: Arc<dyn RecordRepository<Article>>,
    lifecycle: RecordLifecycle<Article>,
    clock: Arc<dyn Clock>,
}

impl ArticleService {
    pub fn new(repository: Arc<dyn RecordRepository<Article>>, clock: Arc<dyn Clock>) -> Self {
        let lifecycle = RecordLifecycle::new(Arc::clone(&repository), Arc::clone(&clock));
        Self {
            repository,
            lifecycle,
            clock,
        }
    }

    async fn require(&self, id: &RecordId, scope: Visibility) -> Result<ArticleRecord, Error> {
        self.repository
            .find(id, scope)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found(id, scope))
    }
}

fn not_found(id: &RecordId, scope: Visibility) -> Error {
    Error::not_found(format!("article {id} not found"))
        .with_details(serde_json::json!({ "id": id.to_string(), "scope": scope.as_str() }))
}

fn map_persistence_error(err: RecordPersistenceError) -> Error {
    error!(error = %err, "article repository failure");
    match err {
        RecordPersistenceError::Connection { .. } => {
            Error::service_unavailable("article storage is unavailable")
        }
        RecordPersistenceError::Query { .. } => Error::internal("article storage query failed"),
    }
}

fn map_lifecycle_error(err: LifecycleError) -> Error {
    match err {
        LifecycleError::NotFound { id } => not_found(&id, Visibility::All),
        LifecycleError::Persistence(inner) => map_persistence_error(inner),
    }
}

#[async_trait]
impl ArticlesQuery for ArticleService {
    async fn list(&self, scope: Visibility) -> Result<Vec<ArticleRecord>, Error> {
        let records = self
            .repository
            .list(scope)
            .await
            .map_err(map_persistence_error)?;
        debug!(scope = %scope, count = records.len(), "listed articles");
        Ok(records)
    }

    async fn get(&self, id: &RecordId, scope: Visibility) -> Result<ArticleRecord, Error> {
        self.require(id, scope).await
    }
}

#[async_trait]
impl ArticlesCommand for ArticleService {
    async fn create(&self, article: Article) -> Result<ArticleRecord, Error> {
        let record = Record::new(article, self.clock.utc());
        self.repository
            .insert(&record)
            .await
            .map_err(map_persistence_error)?;
        debug!(record_id = %record.id(), "article created");
        Ok(record)
    }

    async fn update(&self, id: &RecordId, article: Article) -> Result<ArticleRecord, Error> {
        let mut record = self.require(id, Visibility::Active).await?;
        record.replace_body(article, self.clock.utc());
        // Only applies while the article is still active.
        self.repository
            .update_body(&record)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| not_found(id, Visibility::Active))
    }

    async fn deactivate(&self, id: &RecordId) -> Result<ArticleRecord, Error> {
        self.lifecycle
            .deactivate(id)
            .await
            .map_err(map_lifecycle_error)
    }

    async fn reactivate(&self, id: &RecordId) -> Result<ArticleRecord, Error> {
        self.lifecycle
            .reactivate(id)
            .await
            .map_err(map_lifecycle_error)
    }
}

#[cfg(test)]
#[path = "article_service_tests.rs"]
mod tests;
