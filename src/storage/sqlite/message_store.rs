//! SQLite MessageStore implementation.
//!
//! SQLite admits a single writer. Contention surfaces as `SQLITE_BUSY` or
//! `SQLITE_LOCKED`, which every storage step absorbs through
//! [`retry_on_locked`]. Writes are split into begin, statement and commit
//! steps, each retried on its own.

use std::num::NonZeroU32;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use sea_query::{Alias, Expr, Order, Query, SqliteQueryBuilder};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Row, Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::interfaces::message_store::{MessageStore, Result, StorageError, StoredMessage};
use crate::storage::schema::{Messages, CREATE_MESSAGES_INDEX, CREATE_MESSAGES_TABLE};
use crate::utils::retry::{retry_on_locked, RetryConfig};

/// SQLite implementation of MessageStore.
pub struct SqliteMessageStore {
    pool: SqlitePool,
    retry: RetryConfig,
}

impl SqliteMessageStore {
    /// Create a store with the default lock-retry policy.
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_retry(pool, RetryConfig::default())
    }

    pub fn with_retry(pool: SqlitePool, retry: RetryConfig) -> Self {
        Self { pool, retry }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Whether a table named `table` exists in the database.
    pub async fn check_table_exists(&self, table: &str) -> Result<bool> {
        let query = Query::select()
            .expr(Expr::val(1))
            .from(Alias::new("sqlite_master"))
            .and_where(Expr::col(Alias::new("type")).eq("table"))
            .and_where(Expr::col(Alias::new("name")).eq(table))
            .to_string(SqliteQueryBuilder);

        let mut conn = self.pool.acquire().await?;
        let row = retry_on_locked(&self.retry, "check_table_exists", &mut *conn, |c| {
            let sql = query.clone();
            async move { sqlx::query(&sql).fetch_optional(c).await }.boxed()
        })
        .await?;

        Ok(row.is_some())
    }

    /// Run one statement inside `BEGIN IMMEDIATE` / `COMMIT`.
    ///
    /// IMMEDIATE takes the write lock up front, so contention shows up at
    /// `BEGIN` instead of midway through the transaction. Any step that fails
    /// for good rolls the transaction back before the error is returned.
    async fn write(&self, operation: &str, sql: String) -> Result<SqliteQueryResult> {
        let mut conn = self.pool.acquire().await?;

        retry_on_locked(&self.retry, "begin", &mut *conn, |c| {
            async move { sqlx::query("BEGIN IMMEDIATE").execute(c).await }.boxed()
        })
        .await?;

        let executed = retry_on_locked(&self.retry, operation, &mut *conn, |c| {
            let sql = sql.clone();
            async move { sqlx::query(&sql).execute(c).await }.boxed()
        })
        .await;
        let result = match executed {
            Ok(result) => result,
            Err(e) => {
                Self::rollback(&mut conn).await;
                return Err(e.into());
            }
        };

        let committed = retry_on_locked(&self.retry, "commit", &mut *conn, |c| {
            async move { sqlx::query("COMMIT").execute(c).await }.boxed()
        })
        .await;
        if let Err(e) = committed {
            Self::rollback(&mut conn).await;
            return Err(e.into());
        }

        Ok(result)
    }

    async fn rollback(conn: &mut PoolConnection<Sqlite>) {
        if let Err(e) = sqlx::query("ROLLBACK").execute(&mut **conn).await {
            warn!(error = %e, "rollback failed, discarding connection");
            conn.close_on_drop();
        }
    }
}

fn row_to_message(row: &SqliteRow) -> Result<StoredMessage> {
    let id: i64 = row.try_get("id")?;
    let received_at: String = row.try_get("received_at")?;
    let received_at = DateTime::parse_from_rfc3339(&received_at)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|source| StorageError::InvalidTimestamp {
            id,
            value: received_at.clone(),
            source,
        })?;

    Ok(StoredMessage {
        id,
        event_type: row.try_get("event_type")?,
        payload: row
            .try_get::<Option<String>, _>("payload")?
            .unwrap_or_default(),
        received_at,
    })
}

#[async_trait]
impl MessageStore for SqliteMessageStore {
    async fn init(&self) -> Result<()> {
        let mut conn = self.pool.acquire().await?;
        for ddl in [CREATE_MESSAGES_TABLE, CREATE_MESSAGES_INDEX] {
            retry_on_locked(&self.retry, "init", &mut *conn, |c| {
                async move { sqlx::query(ddl).execute(c).await }.boxed()
            })
            .await?;
        }
        Ok(())
    }

    async fn append(&self, event_type: &str, payload: &str) -> Result<i64> {
        let query = Query::insert()
            .into_table(Messages::Table)
            .columns([Messages::EventType, Messages::Payload])
            .values_panic([event_type.into(), payload.into()])
            .to_string(SqliteQueryBuilder);

        let id = self.write("insert", query).await?.last_insert_rowid();
        debug!(id, %event_type, "message stored");
        Ok(id)
    }

    async fn recent(&self, limit: NonZeroU32) -> Result<Vec<StoredMessage>> {
        let query = Query::select()
            .columns([
                Messages::Id,
                Messages::EventType,
                Messages::Payload,
                Messages::ReceivedAt,
            ])
            .from(Messages::Table)
            .order_by(Messages::ReceivedAt, Order::Desc)
            .order_by(Messages::Id, Order::Desc)
            .limit(u64::from(limit.get()))
            .to_string(SqliteQueryBuilder);

        let mut conn = self.pool.acquire().await?;
        let rows = retry_on_locked(&self.retry, "fetch", &mut *conn, |c| {
            let sql = query.clone();
            async move { sqlx::query(&sql).fetch_all(c).await }.boxed()
        })
        .await?;

        rows.iter().map(row_to_message).collect()
    }

    async fn clear_all(&self) -> Result<u64> {
        let query = Query::delete()
            .from_table(Messages::Table)
            .to_string(SqliteQueryBuilder);

        let removed = self.write("delete", query).await?.rows_affected();
        debug!(removed, "messages cleared");
        Ok(removed)
    }
}
