// Serve-Next Use Case - the counter pulls the front of the queue

use crate::domain::QueueEntry;
use crate::error::{AppError, Result};
use crate::port::{QueueTransaction as _, Transaction as _, TransactionalQueueRepository};
use tracing::info;

/// Serve the client at position 1 and compact the rest of the queue.
///
/// Returns the served entry's snapshot (final position 1, served flag
/// set). Fails with `EmptyQueue` when no one is waiting; by the
/// contiguity invariant an empty position 1 means an empty queue.
pub async fn execute(queue_repo: &dyn TransactionalQueueRepository) -> Result<QueueEntry> {
    let mut tx = queue_repo.begin_transaction().await?;

    let mut front = tx
        .find_active_by_position(1)
        .await?
        .ok_or(AppError::EmptyQueue)?;

    tx.mark_served(front.id).await?;
    // Close the gap left at position 1
    tx.shift_positions(2, -1).await?;
    tx.commit().await?;

    front.served = true;

    info!(id = front.id, name = %front.name, "client served");

    Ok(front)
}
