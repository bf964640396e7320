//! Unit tests for the single-worker persistence queue.

#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use provctl::application::services::StoreQueue;
use serde_json::json;

use crate::mocks::{MemoryStore, StoreCall};

fn queue(store: MemoryStore) -> (StoreQueue, Arc<MemoryStore>) {
    let store = Arc::new(store);
    (StoreQueue::spawn(Arc::clone(&store) as _), store)
}

#[tokio::test]
async fn test_operations_apply_in_submission_order() {
    let (queue, store) = queue(MemoryStore::new().with_delays([
        Duration::from_millis(40),
        Duration::from_millis(10),
        Duration::ZERO,
    ]));

    queue.set("k", json!(1));
    queue.set("k", json!(2));
    queue.remove("k");
    queue.settle().await;

    assert_eq!(
        store.log(),
        vec![
            StoreCall::Set("k".to_string(), json!(1)),
            StoreCall::Set("k".to_string(), json!(2)),
            StoreCall::Remove("k".to_string()),
        ]
    );
    assert_eq!(store.value("k"), None);
    assert_eq!(store.max_in_flight(), 1);
}

#[tokio::test]
async fn test_get_observes_earlier_writes() {
    let (queue, _) = queue(MemoryStore::new().with_delays([Duration::from_millis(30)]));

    queue.set("k", json!("v"));

    assert_eq!(queue.get("k").await.expect("get"), Some(json!("v")));
    assert_eq!(queue.get("missing").await.expect("get"), None);
}

#[tokio::test]
async fn test_failures_are_counted_not_raised() {
    let (queue, store) = queue(MemoryStore::new().failing_at([0, 2]));

    queue.set("k", json!(1));
    queue.set("k", json!(2));
    queue.set("k", json!(3));
    queue.settle().await;

    assert_eq!(queue.failed_writes(), 2);
    assert_eq!(store.value("k"), Some(json!(2)));
}

#[tokio::test]
async fn test_settle_on_idle_queue_returns() {
    let (queue, store) = queue(MemoryStore::new());

    queue.settle().await;

    assert!(store.log().is_empty());
}

#[tokio::test]
async fn test_shutdown_waits_for_pending_writes() {
    let (queue, store) = queue(MemoryStore::new().with_delays([Duration::from_millis(50); 2]));

    queue.set("a", json!(true));
    queue.set("b", json!(true));
    queue.shutdown().await;

    assert_eq!(store.value("a"), Some(json!(true)));
    assert_eq!(store.value("b"), Some(json!(true)));
}

#[tokio::test]
async fn test_dropped_handle_still_drains_queue() {
    let (queue, store) = queue(MemoryStore::new().with_delays([Duration::from_millis(20)]));

    queue.set("k", json!("kept"));
    drop(queue);

    for _ in 0..100 {
        if store.value("k").is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(store.value("k"), Some(json!("kept")));
}
