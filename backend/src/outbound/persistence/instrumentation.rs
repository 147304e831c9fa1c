//! Diesel instrumentation feeding the request [`QueryLog`].

use std::time::Instant;

use diesel::connection::{Instrumentation, InstrumentationEvent};

use crate::query_log::{ExecutedQuery, QueryLog};

/// Times each statement and records it into the task's query log.
///
/// Attached to every pooled connection on checkout. Statements are rendered
/// to text only while a log is in scope.
#[derive(Debug, Default)]
pub(crate) struct QueryCapture {
    started: Option<Instant>,
}

impl Instrumentation for QueryCapture {
    fn on_connection_event(&mut self, event: InstrumentationEvent<'_>) {
        match event {
            InstrumentationEvent::StartQuery { .. } => {
                self.started = Some(Instant::now());
            }
            InstrumentationEvent::FinishQuery { query, error, .. } => {
                let elapsed = self
                    .started
                    .take()
                    .map(|started| started.elapsed())
                    .unwrap_or_default();
                if QueryLog::is_active() {
                    QueryLog::record(ExecutedQuery {
                        sql: query.to_string(),
                        elapsed,
                        failed: error.is_some(),
                    });
                }
            }
            _ => {}
        }
    }
}
