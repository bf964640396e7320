//! Unit tests for the on-disk JSON record store.

#![allow(clippy::expect_used)]

use std::sync::Arc;

use provctl::application::ports::KeyValueStore;
use provctl::application::services::ProviderCoordinator;
use provctl::infra::JsonFileStore;
use provctl_common::{DANGLING_PROVIDERS_KEY, ProviderId};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::mocks::RecordingGateway;

fn store_in(dir: &TempDir) -> JsonFileStore {
    JsonFileStore::providers(dir.path())
}

fn read_file(store: &JsonFileStore) -> Value {
    let content = std::fs::read_to_string(store.path()).expect("read record");
    serde_json::from_str(&content).expect("parse record")
}

#[test]
fn test_providers_store_lives_in_data_dir() {
    let dir = TempDir::new().expect("tempdir");
    assert_eq!(store_in(&dir).path(), dir.path().join("providers.json"));
}

#[tokio::test]
async fn test_get_on_missing_file_is_none() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);

    assert_eq!(store.get("anything").await.expect("get"), None);
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_set_then_get_round_trips_value() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);

    store.set("danglingProviders", json!(["a", "b"])).await.expect("set");

    assert_eq!(
        store.get("danglingProviders").await.expect("get"),
        Some(json!(["a", "b"]))
    );
    assert_eq!(read_file(&store), json!({"danglingProviders": ["a", "b"]}));
}

#[tokio::test]
async fn test_set_preserves_other_keys() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), r#"{"lastUsed":"docker"}"#).expect("seed");

    store.set("danglingProviders", json!(["x"])).await.expect("set");

    assert_eq!(
        read_file(&store),
        json!({"lastUsed": "docker", "danglingProviders": ["x"]})
    );
}

#[tokio::test]
async fn test_remove_absent_key_succeeds_without_creating_file() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);

    store.remove("danglingProviders").await.expect("remove");

    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_remove_deletes_only_that_key() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.set("keep", json!(1)).await.expect("set");
    store.set("drop", json!(2)).await.expect("set");

    store.remove("drop").await.expect("remove");

    assert_eq!(read_file(&store), json!({"keep": 1}));
}

#[tokio::test]
async fn test_empty_file_reads_as_empty_record() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "  \n").expect("seed");

    assert_eq!(store.get("danglingProviders").await.expect("get"), None);
}

#[tokio::test]
async fn test_corrupt_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    std::fs::write(store.path(), "{not json").expect("seed");

    let err = store.get("danglingProviders").await.expect_err("should fail");
    assert!(format!("{err:#}").contains("parsing store file"), "{err:#}");
    assert!(store.set("k", json!(1)).await.is_err());
}

#[tokio::test]
async fn test_set_creates_missing_parent_directory() {
    let dir = TempDir::new().expect("tempdir");
    let store = JsonFileStore::providers(&dir.path().join("nested").join("data"));

    store.set("k", json!("v")).await.expect("set");

    assert!(store.path().exists());
    assert!(!store.path().with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn test_record_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().expect("tempdir");
    let store = store_in(&dir);
    store.set("k", json!("v")).await.expect("set");

    let mode = std::fs::metadata(store.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[tokio::test]
async fn test_coordinator_persists_dangling_list_to_disk() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("providers.json");
    let coordinator =
        ProviderCoordinator::new(RecordingGateway::new(), Arc::new(store_in(&dir)));

    coordinator.set_dangling(ProviderId::from("a"));
    coordinator.set_dangling(ProviderId::from("b"));
    coordinator.settle().await;

    let record: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(record[DANGLING_PROVIDERS_KEY], json!(["a", "b"]));

    assert_eq!(coordinator.pop_dangling().len(), 2);
    coordinator.shutdown().await;

    let record: Value =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(record, json!({}));
}

#[tokio::test]
async fn test_fresh_coordinator_sees_previous_session_record() {
    let dir = TempDir::new().expect("tempdir");
    let first = ProviderCoordinator::new(RecordingGateway::new(), Arc::new(store_in(&dir)));
    first.set_dangling(ProviderId::from("left-behind"));
    first.shutdown().await;

    let second = ProviderCoordinator::new(RecordingGateway::new(), Arc::new(store_in(&dir)));

    assert!(second.dangling().is_empty());
    assert_eq!(
        second.persisted_dangling().await.expect("read"),
        vec![ProviderId::from("left-behind")]
    );
}
