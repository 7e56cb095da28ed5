// Queue Repository Port (Interface)

use crate::domain::{Position, QueueEntry};
use crate::error::Result;
use async_trait::async_trait;

/// Read side and single-statement mutations of the queue store.
///
/// Every multi-step mutation (enqueue, serve, cancel) goes through
/// `TransactionalQueueRepository` instead, so the scan-shift-insert
/// sequence commits as one unit.
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// All active entries (served = false), ascending position.
    /// Re-evaluated fresh on every call; no cached view.
    async fn list_active(&self) -> Result<Vec<QueueEntry>>;

    /// The unique active entry at `position`, if any.
    async fn find_active_by_position(&self, position: Position) -> Result<Option<QueueEntry>>;

    /// Count of active entries.
    async fn count_active(&self) -> Result<i64>;

    /// Mark every entry (active or already served) as served.
    /// Returns the number of rows touched. Flipping history rows is a
    /// defined no-op that keeps reset idempotent.
    async fn mark_all_served(&self) -> Result<u64>;
}
