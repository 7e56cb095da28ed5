// Enqueue Use Case

use crate::domain::{self, compute_placement, NewEntry, QueueEntry, ServiceClass};
use crate::error::Result;
use crate::port::{QueueTransaction as _, TimeProvider, Transaction as _, TransactionalQueueRepository};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Enqueue request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnqueueRequest {
    pub name: String,

    #[serde(default = "default_class")]
    pub class: ServiceClass,
}

fn default_class() -> ServiceClass {
    ServiceClass::Normal
}

/// Execute enqueue use case (with transaction for atomicity).
///
/// Placement recomputes the class maxima fresh on every call instead
/// of caching a boundary field, so a lost shift or out-of-order commit
/// cannot poison later insertions. Two scans per insert is fine at
/// human-scale queue sizes.
pub async fn execute(
    queue_repo: &dyn TransactionalQueueRepository,
    time_provider: &dyn TimeProvider,
    req: EnqueueRequest,
) -> Result<QueueEntry> {
    // Reject malformed input before any store interaction
    let name = domain::validate_name(&req.name)?;

    let mut tx = queue_repo.begin_transaction().await?;

    let max_total = tx.max_position().await?;
    let max_priority = match req.class {
        ServiceClass::Priority => tx.max_position_for_class(ServiceClass::Priority).await?,
        ServiceClass::Normal => 0,
    };

    let placement = compute_placement(req.class, max_total, max_priority);

    // Open the slot before inserting so positions stay dense
    if let Some(start) = placement.shift_from {
        tx.shift_positions(start, 1).await?;
    }

    let new_entry = NewEntry {
        name,
        arrival_time: time_provider.now_millis(),
        position: placement.position,
        class: req.class,
    };

    let entry = tx.insert(&new_entry).await?;
    tx.commit().await?;

    info!(
        id = entry.id,
        position = entry.position,
        class = %entry.class,
        "client enqueued"
    );

    Ok(entry)
}
