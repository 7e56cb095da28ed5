// Domain Layer - Pure business logic and entities

pub mod entry;
pub mod error;
pub mod placement;

// Re-exports
pub use entry::{validate_name, EntryId, NewEntry, Position, QueueEntry, ServiceClass, MAX_NAME_LEN};
pub use error::DomainError;
pub use placement::{compute_placement, Placement};
