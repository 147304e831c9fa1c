//! Builds the HTTP state from the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::info;

use groundwork::domain::ports::RecordRepository;
use groundwork::domain::{Article, ArticleService};
use groundwork::inbound::http::state::HttpState;
use groundwork::outbound::memory::InMemoryRecordStore;
use groundwork::outbound::persistence::DieselArticleRepository;

use super::ServerConfig;

/// Article repository for the configured backend: PostgreSQL when a pool is
/// attached, process memory otherwise.
pub fn build_article_repository(config: &ServerConfig) -> Arc<dyn RecordRepository<Article>> {
    match &config.db_pool {
        Some(pool) => {
            info!(storage = "postgres", "article repository configured");
            Arc::new(DieselArticleRepository::new(pool.clone()))
        }
        None => {
            info!(storage = "memory", "article repository configured");
            Arc::new(InMemoryRecordStore::<Article>::new())
        }
    }
}

/// Shared handler state wired to the configured repository.
pub fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let service = ArticleService::new(build_article_repository(config), Arc::new(DefaultClock));
    web::Data::new(HttpState::from_service(service))
}
