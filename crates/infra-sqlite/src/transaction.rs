// SQLite Transaction Implementation

use crate::queue_repository::{map_sqlx_error, EntryRow};
use async_trait::async_trait;
use sqlx::{Sqlite, Transaction as SqlxTransaction};
use totem_core::domain::{NewEntry, Position, QueueEntry, ServiceClass};
use totem_core::error::Result;
use totem_core::port::{QueueTransaction, Transaction};

pub struct SqliteQueueTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteQueueTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteQueueTransaction<'_> {
    async fn commit(mut self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl QueueTransaction for SqliteQueueTransaction<'_> {
    async fn max_position(&mut self) -> Result<Position> {
        let max: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) FROM queue_entries WHERE served = 0",
        )
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(max)
    }

    async fn max_position_for_class(&mut self, class: ServiceClass) -> Result<Position> {
        let max: i64 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) FROM queue_entries WHERE served = 0 AND class = ?",
        )
        .bind(class.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(max)
    }

    async fn shift_positions(&mut self, start: Position, delta: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE queue_entries
            SET position = position + ?
            WHERE served = 0 AND position >= ?
            "#,
        )
        .bind(delta)
        .bind(start)
        .execute(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }

    async fn insert(&mut self, entry: &NewEntry) -> Result<QueueEntry> {
        let row: EntryRow = sqlx::query_as(
            r#"
            INSERT INTO queue_entries (name, arrival_time, position, class, served)
            VALUES (?, ?, ?, ?, 0)
            RETURNING *
            "#,
        )
        .bind(&entry.name)
        .bind(entry.arrival_time)
        .bind(entry.position)
        .bind(entry.class.as_str())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(map_sqlx_error)?;

        row.into_entry()
    }

    async fn find_active_by_position(&mut self, position: Position) -> Result<Option<QueueEntry>> {
        let row: Option<EntryRow> =
            sqlx::query_as("SELECT * FROM queue_entries WHERE served = 0 AND position = ?")
                .bind(position)
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(map_sqlx_error)?;

        row.map(|r| r.into_entry()).transpose()
    }

    async fn mark_served(&mut self, id: i64) -> Result<()> {
        sqlx::query("UPDATE queue_entries SET served = 1 WHERE id = ?")
            .bind(id)
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}
