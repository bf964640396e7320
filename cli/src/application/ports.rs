//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and `provctl_common`, never
//! from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::PathBuf;
use std::process::Output;

use anyhow::Result;
use async_trait::async_trait;
use provctl_common::{
    AddProviderConfig, CommandResult, ProviderId, ProviderOptions, Providers,
};
use serde_json::Value;

use crate::domain::ClientConfig;

// ── Provider Command Gateway ──────────────────────────────────────────────────

/// Command-dispatch boundary to the native backend that owns provider state.
///
/// Every call returns the backend's result as-is; callers never see side
/// effects beyond the returned value.
#[allow(async_fn_in_trait)]
pub trait ProviderGateway {
    /// Toggle verbose per-call logging.
    fn set_debug(&self, enabled: bool);
    /// List every configured provider.
    async fn list_providers(&self) -> CommandResult<Providers>;
    /// Derive the canonical identifier for a raw provider source.
    async fn provider_id(&self, raw_source: &str) -> CommandResult<ProviderId>;
    /// Register a provider from a raw source.
    async fn add_provider(&self, raw_source: &str, config: &AddProviderConfig) -> CommandResult;
    /// Remove a provider.
    async fn remove_provider(&self, id: &ProviderId) -> CommandResult;
    /// Fetch a provider's option set.
    async fn get_provider_options(&self, id: &ProviderId) -> CommandResult<ProviderOptions>;
    /// Replace a provider's option set, optionally asking it to reuse a machine.
    async fn set_provider_options(
        &self,
        id: &ProviderId,
        options: &ProviderOptions,
        reuse_machine: bool,
    ) -> CommandResult;
    /// Mark a provider as the active default.
    async fn use_provider(&self, id: &ProviderId) -> CommandResult;
}

// ── Key-Value Store Port ──────────────────────────────────────────────────────

/// Durable keyed storage scoped to a single record.
///
/// Each individual `set`/`remove` must be atomic; nothing is assumed across
/// calls. Futures must be `Send` because writes run on the persistence worker.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a key, returning `None` when it is absent.
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    /// Write a key, replacing any previous value.
    async fn set(&self, key: &str, value: Value) -> Result<()>;
    /// Delete a key. Deleting an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so the backend gateway can be tested without
/// spawning real processes.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output, bounded by the runner's timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds the
    /// timeout. On timeout the child process must be killed.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading of the client configuration file.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// fails validation.
    fn load(&self) -> Result<ClientConfig>;
    /// Path of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
