// Transaction port for atomic queue mutations

use crate::domain::{NewEntry, Position, QueueEntry, ServiceClass};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional queue repository operations
#[async_trait]
pub trait TransactionalQueueRepository: Send + Sync {
    /// Begin a new transaction
    async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>>;
}

/// Queue operations within a transaction.
///
/// The placement algorithm is a read (max scans) followed by a write
/// (shift + insert); running both inside one store transaction is what
/// closes the lost-update race between concurrent kiosks.
#[async_trait]
pub trait QueueTransaction: Transaction {
    /// Highest position among active entries, 0 if the queue is empty
    async fn max_position(&mut self) -> Result<Position>;

    /// Highest position among active entries of `class`, 0 if none
    async fn max_position_for_class(&mut self, class: ServiceClass) -> Result<Position>;

    /// Add `delta` to the position of every active entry with
    /// position >= start. Returns the number of shifted rows.
    async fn shift_positions(&mut self, start: Position, delta: i64) -> Result<u64>;

    /// Insert a new entry; the store assigns the id
    async fn insert(&mut self, entry: &NewEntry) -> Result<QueueEntry>;

    /// The unique active entry at `position`, if any
    async fn find_active_by_position(&mut self, position: Position) -> Result<Option<QueueEntry>>;

    /// Flip the served flag of one entry
    async fn mark_served(&mut self, id: i64) -> Result<()>;
}
