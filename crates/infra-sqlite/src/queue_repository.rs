// SQLite QueueRepository Implementation

use crate::SqliteQueueTransaction;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::str::FromStr;
use totem_core::domain::{Position, QueueEntry, ServiceClass};
use totem_core::error::{AppError, Result};
use totem_core::port::{QueueRepository, QueueTransaction, TransactionalQueueRepository};

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite error codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => AppError::Database(format!(
                        "Unique constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "275" | "1811" => AppError::Database(format!(
                        "Check constraint violation: {} ({})",
                        db_err.message(),
                        code_str
                    )),
                    "5" => AppError::Database(format!(
                        "Database locked (SQLITE_BUSY): {}",
                        db_err.message()
                    )),
                    "13" => AppError::Database(format!("Database full: {}", db_err.message())),
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => AppError::Database(err.to_string()),
    }
}

pub struct SqliteQueueRepository {
    pool: SqlitePool,
}

impl SqliteQueueRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for SqliteQueueRepository {
    async fn list_active(&self) -> Result<Vec<QueueEntry>> {
        let rows: Vec<EntryRow> = sqlx::query_as(
            r#"
            SELECT * FROM queue_entries
            WHERE served = 0
            ORDER BY position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(|r| r.into_entry()).collect()
    }

    async fn find_active_by_position(&self, position: Position) -> Result<Option<QueueEntry>> {
        let row: Option<EntryRow> =
            sqlx::query_as("SELECT * FROM queue_entries WHERE served = 0 AND position = ?")
                .bind(position)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        row.map(|r| r.into_entry()).transpose()
    }

    async fn count_active(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM queue_entries WHERE served = 0")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(count)
    }

    async fn mark_all_served(&self) -> Result<u64> {
        // Flips every row, history included. Harmless and keeps reset
        // idempotent without a special case.
        let result = sqlx::query("UPDATE queue_entries SET served = 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[async_trait]
impl TransactionalQueueRepository for SqliteQueueRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteQueueTransaction::new(tx)))
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct EntryRow {
    pub id: i64,
    pub name: String,
    pub arrival_time: i64,
    pub position: i64,
    pub class: String,
    pub served: bool,
}

impl EntryRow {
    pub(crate) fn into_entry(self) -> Result<QueueEntry> {
        let class = ServiceClass::from_str(&self.class).map_err(|_| {
            AppError::Database(format!(
                "queue_entries row {} holds unknown class {:?}",
                self.id, self.class
            ))
        })?;

        Ok(QueueEntry {
            id: self.id,
            name: self.name,
            arrival_time: self.arrival_time,
            position: self.position,
            class,
            served: self.served,
        })
    }
}
