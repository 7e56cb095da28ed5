//! Queue invariant tests over the real SQLite store.
//!
//! Checks the structural properties that must hold after every
//! mutation: dense positions, priority-before-normal ordering, and
//! order preservation under serve/cancel.

use std::sync::Arc;

use totem_core::application::queue::EnqueueRequest;
use totem_core::application::QueueService;
use totem_core::domain::ServiceClass;
use totem_core::port::time_provider::SystemTimeProvider;
use totem_infra_sqlite::{create_pool, run_migrations, SqliteQueueRepository};

async fn service() -> QueueService {
    let pool = create_pool("sqlite::memory:").await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteQueueRepository::new(pool.clone()));
    let tx_repo = Arc::new(SqliteQueueRepository::new(pool));
    QueueService::new(tx_repo, repo, Arc::new(SystemTimeProvider))
}

fn req(name: &str, class: ServiceClass) -> EnqueueRequest {
    EnqueueRequest {
        name: name.to_string(),
        class,
    }
}

/// Positions of the active queue must be exactly {1..N}; priority
/// entries form a prefix, each class in arrival (id) order.
async fn assert_invariants(svc: &QueueService) {
    let entries = svc.list_active().await.unwrap();

    for (i, e) in entries.iter().enumerate() {
        assert_eq!(
            e.position,
            (i + 1) as i64,
            "active positions must be dense 1..N"
        );
        assert!(!e.served, "active view must not contain served entries");
    }

    let first_normal = entries
        .iter()
        .position(|e| e.class == ServiceClass::Normal)
        .unwrap_or(entries.len());
    for e in &entries[first_normal..] {
        assert_eq!(
            e.class,
            ServiceClass::Normal,
            "no priority entry may sit behind a normal one"
        );
    }

    // Within each class, arrival order == position order. Store ids are
    // monotonically assigned, so they stand in for arrival order.
    for class in [ServiceClass::Priority, ServiceClass::Normal] {
        let ids: Vec<_> = entries
            .iter()
            .filter(|e| e.class == class)
            .map(|e| e.id)
            .collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted, "class {:?} must keep arrival order", class);
    }
}

#[tokio::test]
async fn contiguity_holds_through_a_mixed_day() {
    let svc = service().await;

    for i in 0..6 {
        let class = if i % 2 == 0 {
            ServiceClass::Normal
        } else {
            ServiceClass::Priority
        };
        svc.enqueue(req(&format!("client{}", i), class)).await.unwrap();
        assert_invariants(&svc).await;
    }

    svc.serve_next().await.unwrap();
    assert_invariants(&svc).await;

    svc.cancel_by_position(3).await.unwrap();
    assert_invariants(&svc).await;

    svc.enqueue(req("late-priority", ServiceClass::Priority))
        .await
        .unwrap();
    assert_invariants(&svc).await;

    svc.serve_next().await.unwrap();
    svc.serve_next().await.unwrap();
    assert_invariants(&svc).await;
}

#[tokio::test]
async fn serve_promotes_the_second_entry_to_the_front() {
    let svc = service().await;
    svc.enqueue(req("first", ServiceClass::Normal)).await.unwrap();
    svc.enqueue(req("second", ServiceClass::Normal)).await.unwrap();
    svc.enqueue(req("third", ServiceClass::Normal)).await.unwrap();

    let before = svc.count_active().await.unwrap();
    svc.serve_next().await.unwrap();

    let entries = svc.list_active().await.unwrap();
    assert_eq!(svc.count_active().await.unwrap(), before - 1);
    assert_eq!(entries[0].name, "second");
    assert_eq!(entries[0].position, 1);
}

#[tokio::test]
async fn cancel_shifts_only_the_suffix_and_keeps_relative_order() {
    let svc = service().await;
    for name in ["a", "b", "c", "d", "e"] {
        svc.enqueue(req(name, ServiceClass::Normal)).await.unwrap();
    }

    let removed = svc.cancel_by_position(3).await.unwrap();
    assert_eq!(removed.name, "c");

    let entries = svc.list_active().await.unwrap();
    let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "d", "e"]);

    // a and b keep their positions; d and e move down by exactly 1
    let positions: Vec<_> = entries.iter().map(|e| e.position).collect();
    assert_eq!(positions, vec![1, 2, 3, 4]);
    assert_invariants(&svc).await;
}

#[tokio::test]
async fn reset_is_idempotent() {
    let svc = service().await;
    svc.enqueue(req("Ana", ServiceClass::Normal)).await.unwrap();
    svc.enqueue(req("Bia", ServiceClass::Priority)).await.unwrap();
    svc.serve_next().await.unwrap();

    svc.reset().await.unwrap();
    let after_first = svc.list_active().await.unwrap();

    svc.reset().await.unwrap();
    let after_second = svc.list_active().await.unwrap();

    assert!(after_first.is_empty());
    assert!(after_second.is_empty());
    assert_eq!(svc.count_active().await.unwrap(), 0);
}

#[tokio::test]
async fn queue_grows_correctly_after_reset() {
    let svc = service().await;
    svc.enqueue(req("old", ServiceClass::Normal)).await.unwrap();
    svc.reset().await.unwrap();

    // A fresh day starts from position 1 even with history rows around
    let e = svc.enqueue(req("new", ServiceClass::Normal)).await.unwrap();
    assert_eq!(e.position, 1);
    assert_invariants(&svc).await;
}
