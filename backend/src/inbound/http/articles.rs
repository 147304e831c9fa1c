//! Article API handlers.
//!
//! ```text
//! GET  /api/v1/articles?scope=active|inactive|all
//! GET  /api/v1/articles/{id}?scope=...
//! POST /api/v1/articles {"title":"Hello","body":"..."}
//! PUT  /api/v1/articles/{id} {"title":"Hello","body":"..."}
//! POST /api/v1/articles/{id}/deactivate
//! POST /api/v1/articles/{id}/reactivate
//! ```
//!
//! Reads default to the active scope, so soft-deleted articles disappear
//! from listings unless `scope=inactive` or `scope=all` is requested.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::{Article, ArticleRecord, ArticleValidationError, Error, RecordId, Visibility};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Article as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: Uuid,
    #[schema(example = "Hello")]
    pub title: String,
    pub body: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRecord> for ArticleResponse {
    fn from(record: ArticleRecord) -> Self {
        Self {
            id: *record.id().as_uuid(),
            title: record.body().title().to_owned(),
            body: record.body().body().to_owned(),
            is_active: record.is_active(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        }
    }
}

/// Payload for create and update.
///
/// Unknown fields are rejected, which keeps `isActive`, `id` and the
/// timestamps out of client control.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticleRequest {
    #[schema(example = "Hello")]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl TryFrom<ArticleRequest> for Article {
    type Error = ArticleValidationError;

    fn try_from(value: ArticleRequest) -> Result<Self, Self::Error> {
        Article::try_new(value.title, value.body)
    }
}

/// Optional scope selector; reads default to [`Visibility::Active`].
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScopeQuery {
    /// `active`, `inactive` or `all`.
    pub scope: Option<Visibility>,
}

impl ScopeQuery {
    fn resolve(&self) -> Visibility {
        self.scope.unwrap_or(Visibility::Active)
    }
}

fn map_validation_error(err: ArticleValidationError) -> Error {
    Error::invalid_request(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

fn parse_id(raw: &str) -> Result<RecordId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("article id must be a UUID")
            .with_details(json!({ "field": "id", "code": "invalid_id" }))
    })
}

/// List articles in the requested scope, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/articles",
    params(ScopeQuery),
    responses(
        (status = 200, description = "Articles", body = [ArticleResponse]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Storage unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "listArticles"
)]
#[get("/articles")]
pub async fn list_articles(
    state: web::Data<HttpState>,
    query: web::Query<ScopeQuery>,
) -> ApiResult<web::Json<Vec<ArticleResponse>>> {
    let records = state.articles.list(query.resolve()).await?;
    Ok(web::Json(
        records.into_iter().map(ArticleResponse::from).collect(),
    ))
}

/// Fetch a single article visible in the requested scope.
#[utoipa::path(
    get,
    path = "/api/v1/articles/{id}",
    params(("id" = Uuid, Path, description = "Article identifier"), ScopeQuery),
    responses(
        (status = 200, description = "Article", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found in scope", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "getArticle"
)]
#[get("/articles/{id}")]
pub async fn get_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ScopeQuery>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = parse_id(&path)?;
    let record = state.articles.get(&id, query.resolve()).await?;
    Ok(web::Json(record.into()))
}

/// Create an active article.
#[utoipa::path(
    post,
    path = "/api/v1/articles",
    request_body = ArticleRequest,
    responses(
        (status = 201, description = "Created", body = ArticleResponse,
            headers(("Location" = String, description = "Article URL"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 413, description = "Body exceeds the upload limit", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "createArticle"
)]
#[post("/articles")]
pub async fn create_article(
    state: web::Data<HttpState>,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<HttpResponse> {
    let article = Article::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let record = state.articles_command.create(article).await?;
    let location = format!("/api/v1/articles/{}", record.id());
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, location))
        .json(ArticleResponse::from(record)))
}

/// Replace the title and body of an active article.
#[utoipa::path(
    put,
    path = "/api/v1/articles/{id}",
    params(("id" = Uuid, Path, description = "Article identifier")),
    request_body = ArticleRequest,
    responses(
        (status = 200, description = "Updated", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 413, description = "Body exceeds the upload limit", body = Error),
        (status = 404, description = "No active article with this id", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "updateArticle"
)]
#[put("/articles/{id}")]
pub async fn update_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ArticleRequest>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = parse_id(&path)?;
    let article = Article::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let record = state.articles_command.update(&id, article).await?;
    Ok(web::Json(record.into()))
}

/// Soft delete: move an article to the inactive scope.
#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article is inactive", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "deactivateArticle"
)]
#[post("/articles/{id}/deactivate")]
pub async fn deactivate_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = parse_id(&path)?;
    let record = state.articles_command.deactivate(&id).await?;
    Ok(web::Json(record.into()))
}

/// Restore a soft-deleted article to the active scope.
#[utoipa::path(
    post,
    path = "/api/v1/articles/{id}/reactivate",
    params(("id" = Uuid, Path, description = "Article identifier")),
    responses(
        (status = 200, description = "Article is active", body = ArticleResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["articles"],
    operation_id = "reactivateArticle"
)]
#[post("/articles/{id}/reactivate")]
pub async fn reactivate_article(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ArticleResponse>> {
    let id = parse_id(&path)?;
    let record = state.articles_command.reactivate(&id).await?;
    Ok(web::Json(record.into()))
}

#[cfg(test)]
#[path = "articles_tests.rs"]
mod tests;
