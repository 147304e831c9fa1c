//! Landing page served at `/`.

use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, get};

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Groundwork</title>
  </head>
  <body>
    <h1>Groundwork</h1>
    <ul>
      <li><a href="/api/v1/articles">Articles</a></li>
      <li><a href="/api/swagger/">API documentation</a></li>
      <li><a href="/api/schema/">OpenAPI schema</a></li>
    </ul>
  </body>
</html>
"#;

/// Static HTML index linking the API and its documentation.
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(INDEX_HTML)
}
