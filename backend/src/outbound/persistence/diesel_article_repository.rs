//! PostgreSQL-backed `RecordRepository<Article>` using Diesel ORM.
//!
//! Scope filtering is applied once, in [`scoped`], from
//! [`Visibility::is_active_filter`]; every read goes through it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RecordPersistenceError, RecordRepository};
use crate::domain::{Article, ArticleRecord, Record, RecordId, StoredMeta, Visibility};

use super::models::{ArticleActiveChange, ArticleBodyChange, ArticleRow, NewArticleRow};
use super::pool::{DbPool, PoolError};
use super::schema::articles;

/// Diesel-backed article store.
#[derive(Clone)]
pub struct DieselArticleRepository {
    pool: DbPool,
}

impl DieselArticleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RecordPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            RecordPersistenceError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> RecordPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => RecordPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordPersistenceError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordPersistenceError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RecordPersistenceError::query("duplicate record id")
        }
        _ => RecordPersistenceError::query("database error"),
    }
}

/// Base query for `scope`: the only place the active filter is built.
fn scoped(scope: Visibility) -> articles::BoxedQuery<'static, Pg> {
    let query = articles::table.into_boxed();
    match scope.is_active_filter() {
        Some(flag) => query.filter(articles::is_active.eq(flag)),
        None => query,
    }
}

fn row_to_record(row: ArticleRow) -> Result<ArticleRecord, RecordPersistenceError> {
    // Rows were validated on the way in; a failure here means the table was
    // edited out of band.
    let article = Article::try_new(&row.title, row.body).map_err(|err| {
        RecordPersistenceError::query(format!("stored article {} is invalid: {err}", row.id))
    })?;
    let meta = StoredMeta {
        id: RecordId::from_uuid(row.id),
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Record::restore(meta, article))
}

#[async_trait]
impl RecordRepository<Article> for DieselArticleRepository {
    async fn insert(&self, record: &ArticleRecord) -> Result<(), RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewArticleRow {
            id: *record.id().as_uuid(),
            title: record.body().title(),
            body: record.body().body(),
            is_active: record.is_active(),
            created_at: record.created_at(),
            updated_at: record.updated_at(),
        };

        diesel::insert_into(articles::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_body(
        &self,
        record: &ArticleRecord,
    ) -> Result<Option<ArticleRecord>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ArticleBodyChange {
            title: record.body().title(),
            body: record.body().body(),
            updated_at: record.updated_at(),
        };

        let row: Option<ArticleRow> = diesel::update(
            articles::table
                .find(*record.id().as_uuid())
                .filter(articles::is_active.eq(true)),
        )
        .set(&changes)
        .returning(ArticleRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn set_active(
        &self,
        id: &RecordId,
        active: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<ArticleRecord>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = ArticleActiveChange {
            is_active: active,
            updated_at,
        };

        let row: Option<ArticleRow> = diesel::update(articles::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(ArticleRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn find(
        &self,
        id: &RecordId,
        scope: Visibility,
    ) -> Result<Option<ArticleRecord>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ArticleRow> = scoped(scope)
            .filter(articles::id.eq(*id.as_uuid()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }

    async fn list(&self, scope: Visibility) -> Result<Vec<ArticleRecord>, RecordPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ArticleRow> = scoped(scope)
            .order((articles::created_at.asc(), articles::id.asc()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_record).collect()
    }
}
