//! Debug middleware logging the SQL executed while serving each request.
//!
//! A fresh [`QueryLog`] is scoped around the request; pooled Diesel
//! connections record every statement into it. Once the response is ready
//! the captured statements are emitted through `tracing`. Static files,
//! admin and health-check paths are skipped.

use std::task::{Context, Poll};
use std::time::Duration;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::info;

use crate::query_log::{ExecutedQuery, QueryLog};

/// Path prefixes whose requests are never logged.
pub const EXCLUDED_PATH_PREFIXES: [&str; 3] = ["/static/", "/admin/", "/health/"];

/// Whether SQL logging is skipped for `path`.
///
/// # Examples
/// ```
/// use groundwork::middleware::sql_log::should_skip_logging;
///
/// assert!(should_skip_logging("/health/ready"));
/// assert!(!should_skip_logging("/api/v1/articles"));
/// ```
#[must_use]
pub fn should_skip_logging(path: &str) -> bool {
    EXCLUDED_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Middleware factory for per-request SQL logging. Installed only outside
/// production.
#[derive(Debug, Clone, Copy)]
pub struct SqlQueryLog;

impl<S, B> Transform<S, ServiceRequest> for SqlQueryLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SqlQueryLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SqlQueryLogMiddleware { service }))
    }
}

/// Service wrapper produced by [`SqlQueryLog`].
pub struct SqlQueryLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for SqlQueryLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if should_skip_logging(req.path()) {
            return Box::pin(self.service.call(req));
        }

        let method = req.method().to_string();
        let path = req.path().to_owned();
        let log = QueryLog::default();
        let fut = self.service.call(req);
        Box::pin(QueryLog::scope(log.clone(), async move {
            let res = fut.await?;
            log_queries(&method, &path, &log.take());
            Ok(res)
        }))
    }
}

fn log_queries(method: &str, path: &str, queries: &[ExecutedQuery]) {
    if queries.is_empty() {
        return;
    }
    let total: Duration = queries.iter().map(|query| query.elapsed).sum();
    info!(
        method,
        path,
        count = queries.len(),
        total = ?total,
        "raw SQL queries"
    );
    for query in queries {
        info!(
            elapsed = ?query.elapsed,
            failed = query.failed,
            sql = %query.sql,
            "sql query"
        );
    }
}
