//! HTTP inbound adapter exposing REST endpoints.

pub mod articles;
pub mod error;
pub mod health;
pub mod index;
pub mod state;

pub use error::ApiResult;

use actix_web::web;

/// Mount the versioned article API under `/api/v1`.
///
/// The caller supplies `web::Data<HttpState>`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use groundwork::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(articles::list_articles)
        .service(articles::get_article)
        .service(articles::create_article)
        .service(articles::update_article)
        .service(articles::deactivate_article)
        .service(articles::reactivate_article);
}

/// Payload and query extractor settings routed through the domain error.
pub fn extractor_config(max_payload_bytes: usize) -> (web::JsonConfig, web::QueryConfig) {
    (
        web::JsonConfig::default()
            .limit(max_payload_bytes)
            .error_handler(error::json_error_handler),
        web::QueryConfig::default().error_handler(error::query_error_handler),
    )
}
