// Queue Service - use cases for the attendance queue

pub mod cancel;
pub mod enqueue;
pub mod serve;

pub use enqueue::EnqueueRequest;

use crate::domain::{DomainError, Position, QueueEntry};
use crate::error::{AppError, Result};
use crate::port::{QueueRepository, TimeProvider, TransactionalQueueRepository};
use std::sync::Arc;

/// Facade over the queue use cases with injected ports.
pub struct QueueService {
    tx_repo: Arc<dyn TransactionalQueueRepository>,
    repo: Arc<dyn QueueRepository>,
    time_provider: Arc<dyn TimeProvider>,
}

impl QueueService {
    pub fn new(
        tx_repo: Arc<dyn TransactionalQueueRepository>,
        repo: Arc<dyn QueueRepository>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            tx_repo,
            repo,
            time_provider,
        }
    }

    /// Add a client to the queue with priority placement
    pub async fn enqueue(&self, req: EnqueueRequest) -> Result<QueueEntry> {
        enqueue::execute(self.tx_repo.as_ref(), self.time_provider.as_ref(), req).await
    }

    /// Serve the client at position 1 and compact the queue
    pub async fn serve_next(&self) -> Result<QueueEntry> {
        serve::execute(self.tx_repo.as_ref()).await
    }

    /// Cancel the client at the given position and compact the queue
    pub async fn cancel_by_position(&self, position: Position) -> Result<QueueEntry> {
        cancel::execute(self.tx_repo.as_ref(), position).await
    }

    /// All waiting clients, ascending position
    pub async fn list_active(&self) -> Result<Vec<QueueEntry>> {
        self.repo.list_active().await
    }

    /// The waiting client at `position`
    pub async fn peek_by_position(&self, position: Position) -> Result<QueueEntry> {
        if position < 1 {
            return Err(AppError::Domain(DomainError::InvalidPosition(position)));
        }
        self.repo
            .find_active_by_position(position)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("no client at position {} of the queue", position))
            })
    }

    /// Count of waiting clients
    pub async fn count_active(&self) -> Result<i64> {
        self.repo.count_active().await
    }

    /// Mark every entry as served, clearing the queue.
    /// Returns the number of rows touched (history included).
    pub async fn reset(&self) -> Result<u64> {
        self.repo.mark_all_served().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewEntry, ServiceClass};
    use crate::port::{QueueTransaction, Transaction};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    /// In-memory stand-in for the durable store. Transactions stage a
    /// full copy and write it back on commit, mirroring the atomic
    /// multi-row commit the engine assumes from the real store.
    struct MemStore {
        rows: Mutex<Vec<QueueEntry>>,
        next_id: AtomicI64,
    }

    impl MemStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                rows: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
            })
        }
    }

    struct MemTx {
        store: Arc<MemStore>,
        staged: Vec<QueueEntry>,
    }

    #[async_trait]
    impl Transaction for MemTx {
        async fn commit(self: Box<Self>) -> Result<()> {
            *self.store.rows.lock().unwrap() = self.staged;
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl QueueTransaction for MemTx {
        async fn max_position(&mut self) -> Result<Position> {
            Ok(self
                .staged
                .iter()
                .filter(|e| !e.served)
                .map(|e| e.position)
                .max()
                .unwrap_or(0))
        }

        async fn max_position_for_class(&mut self, class: ServiceClass) -> Result<Position> {
            Ok(self
                .staged
                .iter()
                .filter(|e| !e.served && e.class == class)
                .map(|e| e.position)
                .max()
                .unwrap_or(0))
        }

        async fn shift_positions(&mut self, start: Position, delta: i64) -> Result<u64> {
            let mut touched = 0;
            for e in self.staged.iter_mut() {
                if !e.served && e.position >= start {
                    e.position += delta;
                    touched += 1;
                }
            }
            Ok(touched)
        }

        async fn insert(&mut self, entry: &NewEntry) -> Result<QueueEntry> {
            let row = QueueEntry {
                id: self.store.next_id.fetch_add(1, Ordering::SeqCst),
                name: entry.name.clone(),
                arrival_time: entry.arrival_time,
                position: entry.position,
                class: entry.class,
                served: false,
            };
            self.staged.push(row.clone());
            Ok(row)
        }

        async fn find_active_by_position(
            &mut self,
            position: Position,
        ) -> Result<Option<QueueEntry>> {
            Ok(self
                .staged
                .iter()
                .find(|e| !e.served && e.position == position)
                .cloned())
        }

        async fn mark_served(&mut self, id: i64) -> Result<()> {
            for e in self.staged.iter_mut() {
                if e.id == id {
                    e.served = true;
                }
            }
            Ok(())
        }
    }

    /// Arc newtype so both repository traits can hand transactions a
    /// handle that outlives them.
    struct ArcStore(Arc<MemStore>);

    #[async_trait]
    impl TransactionalQueueRepository for ArcStore {
        async fn begin_transaction(&self) -> Result<Box<dyn QueueTransaction>> {
            Ok(Box::new(MemTx {
                store: Arc::clone(&self.0),
                staged: self.0.rows.lock().unwrap().clone(),
            }))
        }
    }

    #[async_trait]
    impl QueueRepository for ArcStore {
        async fn list_active(&self) -> Result<Vec<QueueEntry>> {
            let mut rows: Vec<_> = self
                .0
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|e| !e.served)
                .cloned()
                .collect();
            rows.sort_by_key(|e| e.position);
            Ok(rows)
        }

        async fn find_active_by_position(
            &self,
            position: Position,
        ) -> Result<Option<QueueEntry>> {
            Ok(self
                .0
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|e| !e.served && e.position == position)
                .cloned())
        }

        async fn count_active(&self) -> Result<i64> {
            Ok(self.0.rows.lock().unwrap().iter().filter(|e| !e.served).count() as i64)
        }

        async fn mark_all_served(&self) -> Result<u64> {
            let mut rows = self.0.rows.lock().unwrap();
            for e in rows.iter_mut() {
                e.served = true;
            }
            Ok(rows.len() as u64)
        }
    }

    struct FixedTime(AtomicI64);

    impl TimeProvider for FixedTime {
        fn now_millis(&self) -> i64 {
            self.0.fetch_add(1000, Ordering::SeqCst)
        }
    }

    fn service() -> QueueService {
        let store = MemStore::new();
        QueueService::new(
            Arc::new(ArcStore(Arc::clone(&store))),
            Arc::new(ArcStore(store)),
            Arc::new(FixedTime(AtomicI64::new(1000))),
        )
    }

    fn req(name: &str, class: ServiceClass) -> EnqueueRequest {
        EnqueueRequest {
            name: name.to_string(),
            class,
        }
    }

    async fn assert_invariants(svc: &QueueService) {
        let entries = svc.list_active().await.unwrap();
        // Contiguity: positions are exactly 1..=N
        for (i, e) in entries.iter().enumerate() {
            assert_eq!(e.position, (i + 1) as i64, "positions must be dense");
            assert!(!e.served);
        }
        // Class ordering: priority prefix, normal suffix
        let first_normal = entries
            .iter()
            .position(|e| e.class == ServiceClass::Normal)
            .unwrap_or(entries.len());
        for e in &entries[first_normal..] {
            assert_eq!(e.class, ServiceClass::Normal, "no priority behind a normal");
        }
    }

    #[tokio::test]
    async fn normal_into_empty_queue_lands_at_position_1() {
        let svc = service();
        let e = svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();
        assert_eq!(e.position, 1);
        assert!(!e.served);
        assert_invariants(&svc).await;
    }

    #[tokio::test]
    async fn priority_jumps_ahead_of_waiting_normal() {
        let svc = service();
        svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();
        let p = svc.enqueue(req("Bia", ServiceClass::Priority)).await.unwrap();

        assert_eq!(p.position, 1);
        let entries = svc.list_active().await.unwrap();
        assert_eq!(entries[0].name, "Bia");
        assert_eq!(entries[1].name, "Ana");
        assert_eq!(entries[1].position, 2);
        assert_invariants(&svc).await;
    }

    #[tokio::test]
    async fn priority_lands_behind_priority_tail() {
        // [P@1, N@2, N@3] + P => [P@1, P@2, N@3, N@4]
        let svc = service();
        svc.enqueue(req("P1", ServiceClass::Priority)).await.unwrap();
        svc.enqueue(req("N1", ServiceClass::Normal)).await.unwrap();
        svc.enqueue(req("N2", ServiceClass::Normal)).await.unwrap();

        let p = svc.enqueue(req("P2", ServiceClass::Priority)).await.unwrap();
        assert_eq!(p.position, 2);

        let names: Vec<_> = svc
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["P1", "P2", "N1", "N2"]);
        assert_invariants(&svc).await;
    }

    #[tokio::test]
    async fn serve_next_returns_front_and_compacts() {
        let svc = service();
        svc.enqueue(req("P1", ServiceClass::Priority)).await.unwrap();
        svc.enqueue(req("N1", ServiceClass::Normal)).await.unwrap();
        svc.enqueue(req("N2", ServiceClass::Normal)).await.unwrap();

        let served = svc.serve_next().await.unwrap();
        assert_eq!(served.name, "P1");
        assert_eq!(served.position, 1);
        assert!(served.served);

        let entries = svc.list_active().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "N1");
        assert_eq!(entries[0].position, 1);
        assert_invariants(&svc).await;
    }

    #[tokio::test]
    async fn cancel_middle_position_shifts_suffix_down() {
        let svc = service();
        svc.enqueue(req("P1", ServiceClass::Priority)).await.unwrap();
        svc.enqueue(req("N1", ServiceClass::Normal)).await.unwrap();
        svc.enqueue(req("N2", ServiceClass::Normal)).await.unwrap();

        let removed = svc.cancel_by_position(2).await.unwrap();
        assert_eq!(removed.name, "N1");
        assert!(removed.served);

        let entries = svc.list_active().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].name, "N2");
        assert_eq!(entries[1].position, 2);
        assert_invariants(&svc).await;
    }

    #[tokio::test]
    async fn serve_next_on_empty_queue_fails_without_state_change() {
        let svc = service();
        let err = svc.serve_next().await.unwrap_err();
        assert!(matches!(err, AppError::EmptyQueue));
        assert_eq!(svc.count_active().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cancel_unknown_position_is_not_found() {
        let svc = service();
        svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();

        let err = svc.cancel_by_position(7).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(svc.count_active().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn peek_finds_exact_position() {
        let svc = service();
        svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();
        svc.enqueue(req("Bia", ServiceClass::Normal)).await.unwrap();

        let e = svc.peek_by_position(2).await.unwrap();
        assert_eq!(e.name, "Bia");

        assert!(matches!(
            svc.peek_by_position(3).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            svc.peek_by_position(0).await.unwrap_err(),
            AppError::Domain(_)
        ));
    }

    #[tokio::test]
    async fn reset_clears_queue_and_is_idempotent() {
        let svc = service();
        svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();
        svc.enqueue(req("Bia", ServiceClass::Priority)).await.unwrap();

        svc.reset().await.unwrap();
        assert_eq!(svc.count_active().await.unwrap(), 0);

        // Second reset flips only history rows, same observable state
        svc.reset().await.unwrap();
        assert_eq!(svc.count_active().await.unwrap(), 0);
        assert!(svc.list_active().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_name_is_rejected_before_any_write() {
        let svc = service();
        assert!(svc.enqueue(req("   ", ServiceClass::Normal)).await.is_err());
        assert!(svc
            .enqueue(req(&"x".repeat(21), ServiceClass::Normal))
            .await
            .is_err());
        assert_eq!(svc.count_active().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn mixed_operations_keep_invariants() {
        let svc = service();
        for i in 0..5 {
            svc.enqueue(req(&format!("N{}", i), ServiceClass::Normal))
                .await
                .unwrap();
        }
        for i in 0..3 {
            svc.enqueue(req(&format!("P{}", i), ServiceClass::Priority))
                .await
                .unwrap();
        }
        svc.serve_next().await.unwrap();
        svc.cancel_by_position(4).await.unwrap();
        svc.enqueue(req("P3", ServiceClass::Priority)).await.unwrap();
        svc.serve_next().await.unwrap();

        assert_invariants(&svc).await;
        assert_eq!(svc.count_active().await.unwrap(), 6);
    }
}
