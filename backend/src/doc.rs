//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer together
//! with the request, response and error schemas. The document title,
//! description and version come from [`Settings`] via [`DocsInfo`].
//!
//! The document is served by Swagger UI and exported via
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Visibility};
use crate::inbound::http::articles::{ArticleRequest, ArticleResponse};
use crate::settings::Settings;

/// Overrides the document `info` block.
#[derive(Debug, Clone)]
pub struct DocsInfo {
    pub title: String,
    pub description: String,
    pub version: String,
}

impl From<&Settings> for DocsInfo {
    fn from(settings: &Settings) -> Self {
        Self {
            title: settings.docs_title().to_owned(),
            description: settings.docs_description().to_owned(),
            version: settings.docs_version().to_owned(),
        }
    }
}

impl Modify for DocsInfo {
    fn modify(&self, openapi: &mut OpenApiDocument) {
        openapi.info.title.clone_from(&self.title);
        openapi.info.description = Some(self.description.clone());
        openapi.info.version.clone_from(&self.version);
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API",
        description = "Scoped-visibility record store.",
        version = "1.0.0"
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::update_article,
        crate::inbound::http::articles::deactivate_article,
        crate::inbound::http::articles::reactivate_article,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ArticleResponse, ArticleRequest, Error, ErrorCode, Visibility)),
    tags(
        (name = "articles", description = "Articles with active, inactive and all scopes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

/// Generate the document with `info` taken from `settings`.
pub fn openapi_for(settings: &Settings) -> OpenApiDocument {
    let mut doc = ApiDoc::openapi();
    DocsInfo::from(settings).modify(&mut doc);
    doc
}
