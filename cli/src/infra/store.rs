//! Infrastructure implementation of the `KeyValueStore` port.
//!
//! `JsonFileStore` keeps one record as a JSON object file. Every mutation is
//! a read-modify-write finished by an atomic write (temp file + rename), so a
//! crash leaves either the old or the new record on disk, never a torn one.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use provctl_common::PROVIDERS_STORE_FILE_NAME;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::application::ports::KeyValueStore;

/// Single-record JSON file store.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles from this process.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Store for the provider record inside `data_dir` (`providers.json`).
    #[must_use]
    pub fn providers(data_dir: &Path) -> Self {
        Self::with_path(data_dir.join(format!("{PROVIDERS_STORE_FILE_NAME}.json")))
    }

    /// Store with an explicit file path (used in tests).
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn update<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>) -> bool + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let mut record = read_record(&path)?;
            if mutate(&mut record) {
                write_record(&path, &record)?;
            }
            Ok(())
        })
        .await
        .context("store write task panicked")?
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path.clone();
        let mut record = tokio::task::spawn_blocking(move || read_record(&path))
            .await
            .context("store read task panicked")??;
        Ok(record.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let key = key.to_string();
        self.update(move |record| {
            record.insert(key, value);
            true
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let key = key.to_string();
        self.update(move |record| record.remove(&key).is_some())
            .await
    }
}

/// Read the whole record. A missing file is an empty record.
fn read_record(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading store file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    serde_json::from_str(&content).with_context(|| format!("parsing store file {}", path.display()))
}

fn write_record(path: &Path, record: &Map<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(record).context("serializing store record")?;

    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, &content)
        .with_context(|| format!("writing temp file {}", temp_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))
            .with_context(|| format!("setting permissions on {}", temp_path.display()))?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("finalizing store file {}", path.display()))?;

    Ok(())
}
