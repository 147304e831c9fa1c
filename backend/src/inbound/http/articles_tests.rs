//! Handler tests against mocked driving ports.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockArticlesCommand, MockArticlesQuery};
use crate::domain::{ErrorCode, Record};
use crate::inbound::http::{configure_api, extractor_config};
use crate::test_support::fixture_timestamp;

const MISSING_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn stored() -> ArticleRecord {
    Record::new(
        Article::try_new("Hello", "World").expect("valid article"),
        fixture_timestamp(),
    )
}

fn state(query: MockArticlesQuery, command: MockArticlesCommand) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(Arc::new(query), Arc::new(command)))
}

async fn call(
    state: web::Data<HttpState>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let (json_cfg, query_cfg) = extractor_config(1024);
    let app = actix_test::init_service(
        App::new()
            .app_data(state)
            .app_data(json_cfg)
            .app_data(query_cfg)
            .service(web::scope("/api/v1").configure(configure_api)),
    )
    .await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[rstest]
#[case(None, Visibility::Active)]
#[case(Some("active"), Visibility::Active)]
#[case(Some("inactive"), Visibility::Inactive)]
#[case(Some("all"), Visibility::All)]
#[actix_web::test]
async fn list_passes_requested_scope(
    stored: ArticleRecord,
    #[case] scope: Option<&str>,
    #[case] expected: Visibility,
) {
    let mut query = MockArticlesQuery::new();
    let record = stored.clone();
    query
        .expect_list()
        .withf(move |requested| *requested == expected)
        .times(1)
        .returning(move |_| Ok(vec![record.clone()]));

    let uri = scope.map_or_else(
        || "/api/v1/articles".to_owned(),
        |scope| format!("/api/v1/articles?scope={scope}"),
    );
    let (status, body) = call(
        state(query, MockArticlesCommand::new()),
        actix_test::TestRequest::get().uri(&uri),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["id"], json!(stored.id().to_string()));
    assert_eq!(body[0]["isActive"], json!(true));
    assert!(body[0].get("createdAt").is_some());
    assert!(body[0].get("updatedAt").is_some());
}

#[rstest]
#[actix_web::test]
async fn unknown_scope_is_rejected() {
    let (status, body) = call(
        state(MockArticlesQuery::new(), MockArticlesCommand::new()),
        actix_test::TestRequest::get().uri("/api/v1/articles?scope=deleted"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn get_maps_not_found() {
    let mut query = MockArticlesQuery::new();
    query
        .expect_get()
        .times(1)
        .returning(|_, _| Err(Error::not_found("article missing")));

    let (status, body) = call(
        state(query, MockArticlesCommand::new()),
        actix_test::TestRequest::get().uri(&format!("/api/v1/articles/{MISSING_ID}")),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}

#[rstest]
#[actix_web::test]
async fn malformed_ids_are_invalid_requests() {
    let (status, body) = call(
        state(MockArticlesQuery::new(), MockArticlesCommand::new()),
        actix_test::TestRequest::post().uri("/api/v1/articles/not-a-uuid/deactivate"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], json!("invalid_id"));
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_record(stored: ArticleRecord) {
    let mut command = MockArticlesCommand::new();
    let record = stored.clone();
    command
        .expect_create()
        .withf(|article| article.title() == "Hello" && article.body() == "World")
        .times(1)
        .returning(move |_| Ok(record.clone()));

    let (status, body) = call(
        state(MockArticlesQuery::new(), command),
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .set_json(json!({ "title": "  Hello ", "body": "World" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], json!("Hello"));
    assert_eq!(body["isActive"], json!(true));
}

#[rstest]
#[case(json!({ "title": "x", "isActive": false }))]
#[case(json!({ "title": "x", "id": MISSING_ID }))]
#[case(json!({ "body": "no title" }))]
#[actix_web::test]
async fn create_rejects_malformed_payloads(#[case] payload: Value) {
    let (status, body) = call(
        state(MockArticlesQuery::new(), MockArticlesCommand::new()),
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[case(json!({ "title": "   " }), "title", "empty_title")]
#[case(json!({ "title": "a\u{0}b" }), "title", "control_character")]
#[case(json!({ "title": "ok", "body": "nul\u{0}" }), "body", "control_character")]
#[actix_web::test]
async fn create_reports_validation_details(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let (status, body) = call(
        state(MockArticlesQuery::new(), MockArticlesCommand::new()),
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"], json!({ "field": field, "code": code }));
}

#[rstest]
#[actix_web::test]
async fn oversized_payloads_are_rejected() {
    let (status, body) = call(
        state(MockArticlesQuery::new(), MockArticlesCommand::new()),
        actix_test::TestRequest::post()
            .uri("/api/v1/articles")
            .set_json(json!({ "title": "big", "body": "x".repeat(4096) })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], json!("payload_too_large"));
    assert_eq!(body["details"]["code"], json!("payload_too_large"));
}

#[rstest]
#[actix_web::test]
async fn deactivate_returns_inactive_record(stored: ArticleRecord) {
    let mut record = stored.clone();
    record.set_active(false, fixture_timestamp());
    let id = record.id();
    let mut command = MockArticlesCommand::new();
    command
        .expect_deactivate()
        .withf(move |requested| *requested == id)
        .times(1)
        .returning(move |_| Ok(record.clone()));

    let (status, body) = call(
        state(MockArticlesQuery::new(), command),
        actix_test::TestRequest::post().uri(&format!("/api/v1/articles/{id}/deactivate")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isActive"], json!(false));
}

#[rstest]
#[actix_web::test]
async fn update_surfaces_storage_outage(stored: ArticleRecord) {
    let id = stored.id();
    let mut command = MockArticlesCommand::new();
    command
        .expect_update()
        .times(1)
        .returning(|_, _| Err(Error::service_unavailable("article storage is unavailable")));

    let (status, body) = call(
        state(MockArticlesQuery::new(), command),
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/articles/{id}"))
            .set_json(json!({ "title": "Edited", "body": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: Error = serde_json::from_value(body).expect("error body");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
