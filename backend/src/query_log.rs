//! Per-request capture of executed SQL statements.
//!
//! The `SqlQueryLog` middleware scopes a [`QueryLog`] around each request;
//! the persistence layer calls [`QueryLog::record`] for every statement it
//! runs. Outside a scope, recording is a no-op.
//!
//! Like the trace identifier, the log lives in task-local storage and does
//! not follow `tokio::spawn`.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task_local;

task_local! {
    static QUERY_LOG: QueryLog;
}

/// One statement executed while a log was in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedQuery {
    /// SQL text with bind parameters, as rendered by Diesel.
    pub sql: String,
    /// Wall time between query start and finish.
    pub elapsed: Duration,
    /// Whether the statement returned an error.
    pub failed: bool,
}

/// Shared, append-only list of statements for one request.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use groundwork::query_log::{ExecutedQuery, QueryLog};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let log = QueryLog::default();
/// QueryLog::scope(log.clone(), async {
///     QueryLog::record(ExecutedQuery {
///         sql: "SELECT 1".into(),
///         elapsed: Duration::from_millis(2),
///         failed: false,
///     });
/// })
/// .await;
/// assert_eq!(log.take().len(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryLog(Arc<Mutex<Vec<ExecutedQuery>>>);

impl QueryLog {
    /// Run `fut` with `log` receiving every recorded statement.
    pub async fn scope<Fut>(log: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        QUERY_LOG.scope(log, fut).await
    }

    /// Append a statement to the log in scope, if any.
    pub fn record(query: ExecutedQuery) {
        // Out of scope: nobody asked for the statement, so drop it.
        let _ = QUERY_LOG.try_with(|log| log.push(query));
    }

    /// Whether a log is in scope for the current task.
    #[must_use]
    pub fn is_active() -> bool {
        QUERY_LOG.try_with(|_| ()).is_ok()
    }

    /// Remove and return every captured statement.
    #[must_use]
    pub fn take(&self) -> Vec<ExecutedQuery> {
        let mut queries = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *queries)
    }

    fn push(&self, query: ExecutedQuery) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query);
    }
}
