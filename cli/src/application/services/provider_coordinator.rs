//! Application service: provider lifecycle coordination.
//!
//! `ProviderCoordinator` is the single entry point for provider commands and
//! for the dangling-provider bookkeeping list. Gateway calls are forwarded
//! unchanged. Dangling-list mutations update the in-memory list synchronously
//! and hand the persisted copy to the ordered [`StoreQueue`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use provctl_common::{
    AddProviderConfig, CommandResult, ConfigureProviderConfig, DANGLING_PROVIDERS_KEY,
    ProviderId, ProviderOptions, Providers,
};

use crate::application::ports::{KeyValueStore, ProviderGateway};
use crate::application::services::store_queue::StoreQueue;

/// Owns the gateway, the in-memory dangling list, and the persistence queue.
pub struct ProviderCoordinator<G> {
    gateway: G,
    dangling: Mutex<Vec<ProviderId>>,
    store_queue: StoreQueue,
}

impl<G: ProviderGateway> ProviderCoordinator<G> {
    /// Create a coordinator and spawn its persistence worker.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn new(gateway: G, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            gateway,
            dangling: Mutex::new(Vec::new()),
            store_queue: StoreQueue::spawn(store),
        }
    }

    /// Borrow the underlying gateway. Test hook for inspecting mock gateways.
    #[doc(hidden)]
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Toggle verbose per-call logging in the gateway.
    pub fn set_debug(&self, enabled: bool) {
        self.gateway.set_debug(enabled);
    }

    // ── Delegating operations ────────────────────────────────────────────────

    pub async fn list_all(&self) -> CommandResult<Providers> {
        self.gateway.list_providers().await
    }

    pub async fn new_id(&self, raw_source: &str) -> CommandResult<ProviderId> {
        self.gateway.provider_id(raw_source).await
    }

    pub async fn add(&self, raw_source: &str, config: &AddProviderConfig) -> CommandResult {
        self.gateway.add_provider(raw_source, config).await
    }

    pub async fn remove(&self, id: &ProviderId) -> CommandResult {
        self.gateway.remove_provider(id).await
    }

    pub async fn get_options(&self, id: &ProviderId) -> CommandResult<ProviderOptions> {
        self.gateway.get_provider_options(id).await
    }

    pub async fn use_provider(&self, id: &ProviderId) -> CommandResult {
        self.gateway.use_provider(id).await
    }

    /// Apply options, then optionally make the provider the default.
    ///
    /// Not transactional: if the default-selection step fails, the options
    /// stay applied. An option-set failure returns before default selection.
    pub async fn configure(&self, id: &ProviderId, config: &ConfigureProviderConfig) -> CommandResult {
        self.gateway
            .set_provider_options(id, &config.options, config.reuse_machine)
            .await?;

        if config.use_as_default_provider {
            return self.gateway.use_provider(id).await;
        }

        Ok(())
    }

    // ── Dangling-provider bookkeeping ────────────────────────────────────────

    /// Record `id` as dangling and queue persistence of the full list.
    ///
    /// Returns without waiting for the write.
    pub fn set_dangling(&self, id: ProviderId) {
        let mut dangling = self.lock_dangling();
        tracing::debug!(provider = %id, "marking provider as dangling");
        dangling.push(id);
        // Enqueue while still holding the lock so persisted order matches call order.
        self.queue_snapshot(&dangling);
    }

    /// Merge the persisted dangling list into memory.
    ///
    /// Persisted ids come first, in record order, followed by in-memory ids the
    /// record does not hold yet. The merged list is queued for persistence when
    /// it differs from what memory held. Returns the ids found in the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be read or is malformed; memory
    /// and the record are left untouched.
    pub async fn restore_dangling(&self) -> Result<Vec<ProviderId>> {
        let persisted = self.persisted_dangling().await?;
        let mut dangling = self.lock_dangling();
        let mut merged = persisted.clone();
        merged.extend(
            dangling
                .iter()
                .filter(|id| !persisted.contains(id))
                .cloned(),
        );
        if merged != *dangling {
            *dangling = merged;
            self.queue_snapshot(&dangling);
        }
        if !persisted.is_empty() {
            tracing::debug!(count = persisted.len(), "restored dangling providers");
        }
        Ok(persisted)
    }

    /// Drop every occurrence of `id` from the dangling list, leaving other
    /// entries in place.
    ///
    /// Queues the remaining list, or removal of the record when nothing is
    /// left. Returns `false` when `id` was not in the list (nothing is queued).
    pub fn resolve_dangling(&self, id: &ProviderId) -> bool {
        let mut dangling = self.lock_dangling();
        let before = dangling.len();
        dangling.retain(|entry| entry != id);
        if dangling.len() == before {
            return false;
        }
        tracing::debug!(provider = %id, remaining = dangling.len(), "provider no longer dangling");
        if dangling.is_empty() {
            self.store_queue.remove(DANGLING_PROVIDERS_KEY);
        } else {
            self.queue_snapshot(&dangling);
        }
        true
    }

    /// Take and clear the dangling list, queueing removal of the persisted copy.
    ///
    /// The snapshot is returned before the removal reaches the store.
    pub fn pop_dangling(&self) -> Vec<ProviderId> {
        let mut dangling = self.lock_dangling();
        let snapshot = std::mem::take(&mut *dangling);
        self.store_queue.remove(DANGLING_PROVIDERS_KEY);
        tracing::debug!(count = snapshot.len(), "popped dangling providers");
        snapshot
    }

    /// Non-destructive copy of the in-memory dangling list.
    pub fn dangling(&self) -> Vec<ProviderId> {
        self.lock_dangling().clone()
    }

    /// Read the persisted dangling list once all earlier mutations have landed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or holds a malformed list.
    pub async fn persisted_dangling(&self) -> Result<Vec<ProviderId>> {
        match self.store_queue.get(DANGLING_PROVIDERS_KEY).await? {
            None => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value).context("parsing persisted dangling providers")
            }
        }
    }

    /// Wait until every dangling-list mutation issued so far has been applied.
    pub async fn settle(&self) {
        self.store_queue.settle().await;
    }

    /// Number of dangling-list writes the store has rejected.
    #[must_use]
    pub fn failed_writes(&self) -> usize {
        self.store_queue.failed_writes()
    }

    /// Drain the persistence queue and stop its worker.
    pub async fn shutdown(self) {
        self.store_queue.shutdown().await;
    }

    fn queue_snapshot(&self, dangling: &[ProviderId]) {
        match serde_json::to_value(dangling) {
            Ok(snapshot) => self.store_queue.set(DANGLING_PROVIDERS_KEY, snapshot),
            Err(err) => tracing::warn!(error = %err, "cannot serialize dangling providers"),
        }
    }

    fn lock_dangling(&self) -> MutexGuard<'_, Vec<ProviderId>> {
        self.dangling.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
