//! Ordered persistence queue for key-value store mutations.
//!
//! One worker task owns the store and applies operations strictly in
//! submission order, each only after the previous one completed. Submitting
//! never waits for the write. Reads travel through the same queue so they
//! observe every mutation submitted before them.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::application::ports::KeyValueStore;

enum StoreOp {
    Set {
        key: String,
        value: Value,
    },
    Remove {
        key: String,
    },
    Get {
        key: String,
        reply: oneshot::Sender<Result<Option<Value>>>,
    },
    Barrier(oneshot::Sender<()>),
}

/// Handle to the single persistence worker.
///
/// The queue is unbounded and has no cancellation: once submitted, a
/// mutation runs even if the handle is dropped, because the worker drains
/// everything already queued before exiting.
pub struct StoreQueue {
    tx: mpsc::UnboundedSender<StoreOp>,
    worker: JoinHandle<()>,
    failures: Arc<AtomicUsize>,
}

impl StoreQueue {
    /// Spawn the worker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let failures = Arc::new(AtomicUsize::new(0));
        let worker = tokio::spawn(run_worker(store, rx, Arc::clone(&failures)));
        Self {
            tx,
            worker,
            failures,
        }
    }

    /// Queue a write of `value` under `key`.
    pub fn set(&self, key: &str, value: Value) {
        self.submit(StoreOp::Set {
            key: key.to_string(),
            value,
        });
    }

    /// Queue removal of `key`.
    pub fn remove(&self, key: &str) {
        self.submit(StoreOp::Remove {
            key: key.to_string(),
        });
    }

    /// Read `key` after every previously queued mutation has been applied.
    ///
    /// # Errors
    ///
    /// Returns the store's read error, or an error if the worker is gone.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(StoreOp::Get {
                key: key.to_string(),
                reply,
            })
            .map_err(|_| anyhow::anyhow!("store queue is closed"))?;
        rx.await.context("store worker dropped the read")?
    }

    /// Wait until every operation submitted before this call has run.
    pub async fn settle(&self) {
        let (done, rx) = oneshot::channel();
        if self.tx.send(StoreOp::Barrier(done)).is_ok() {
            let _ = rx.await;
        }
    }

    /// Number of store writes that have failed since the queue started.
    #[must_use]
    pub fn failed_writes(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    /// Close the queue and wait for the worker to drain it.
    pub async fn shutdown(self) {
        let Self { tx, worker, .. } = self;
        drop(tx);
        if let Err(err) = worker.await {
            tracing::error!(error = %err, "store worker terminated abnormally");
        }
    }

    fn submit(&self, op: StoreOp) {
        if self.tx.send(op).is_err() {
            tracing::warn!("store queue is closed; mutation dropped");
        }
    }
}

async fn run_worker(
    store: Arc<dyn KeyValueStore>,
    mut rx: mpsc::UnboundedReceiver<StoreOp>,
    failures: Arc<AtomicUsize>,
) {
    while let Some(op) = rx.recv().await {
        match op {
            StoreOp::Set { key, value } => {
                if let Err(err) = store.set(&key, value).await {
                    failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(key = %key, error = %format!("{err:#}"), "store write failed; persisted record is stale");
                }
            }
            StoreOp::Remove { key } => {
                if let Err(err) = store.remove(&key).await {
                    failures.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(key = %key, error = %format!("{err:#}"), "store remove failed; persisted record is stale");
                }
            }
            StoreOp::Get { key, reply } => {
                let _ = reply.send(store.get(&key).await);
            }
            StoreOp::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!("store queue drained");
}
