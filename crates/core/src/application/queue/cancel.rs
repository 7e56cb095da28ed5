// Cancel-by-Position Use Case - remove an arbitrary waiting entry

use crate::domain::{DomainError, Position, QueueEntry};
use crate::error::{AppError, Result};
use crate::port::{QueueTransaction as _, Transaction as _, TransactionalQueueRepository};
use tracing::info;

/// Remove the active entry at `position` and compact the suffix.
///
/// Cancellation reuses the served flag (the stored state does not
/// distinguish served from cancelled). Returns the removed entry's
/// pre-removal snapshot with the flag set.
pub async fn execute(
    queue_repo: &dyn TransactionalQueueRepository,
    position: Position,
) -> Result<QueueEntry> {
    if position < 1 {
        return Err(AppError::Domain(DomainError::InvalidPosition(position)));
    }

    let mut tx = queue_repo.begin_transaction().await?;

    let mut entry = tx
        .find_active_by_position(position)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no client at position {} of the queue", position)))?;

    tx.mark_served(entry.id).await?;
    // Everyone behind the removed entry moves up one slot
    tx.shift_positions(position + 1, -1).await?;
    tx.commit().await?;

    entry.served = true;

    info!(id = entry.id, position, "client removed from queue");

    Ok(entry)
}
