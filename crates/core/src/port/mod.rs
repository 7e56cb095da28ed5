// Port Layer - Interfaces for external dependencies

pub mod queue_repository;
pub mod time_provider;
pub mod transaction;

// Re-exports
pub use queue_repository::QueueRepository;
pub use time_provider::TimeProvider;
pub use transaction::{QueueTransaction, Transaction, TransactionalQueueRepository};
