//! Unit tests for `BackendGateway`: argument construction and reply mapping.

#![allow(clippy::expect_used)]

use provctl::application::ports::ProviderGateway;
use provctl::infra::BackendGateway;
use provctl::infra::gateway::{CODE_BACKEND_OUTPUT, CODE_BACKEND_UNAVAILABLE};
use provctl_common::{AddProviderConfig, ProviderId, ProviderOptions};
use serde_json::{Map, json};

use crate::mocks::{ScriptedRunner, err_output, ok_output};

fn gateway(runner: ScriptedRunner) -> BackendGateway<ScriptedRunner> {
    BackendGateway::new(runner, "devpod")
}

fn runner_of(gateway: &BackendGateway<ScriptedRunner>) -> &ScriptedRunner {
    gateway.runner()
}

#[tokio::test]
async fn test_list_providers_parses_json_reply() {
    let gw = gateway(ScriptedRunner::replying(
        br#"{"docker":{"state":"ready"},"ssh":null}"#,
    ));

    let providers = gw.list_providers().await.expect("list");

    assert_eq!(providers.len(), 2);
    assert_eq!(providers[&ProviderId::from("docker")], json!({"state": "ready"}));
    assert_eq!(
        runner_of(&gw).single_args(),
        ["provider", "list", "--output", "json"]
    );
    assert_eq!(runner_of(&gw).calls()[0].0, "devpod");
}

#[tokio::test]
async fn test_list_providers_rejects_non_json_reply() {
    let gw = gateway(ScriptedRunner::replying(b"NAME  VERSION\ndocker v0.1\n"));

    let err = gw.list_providers().await.expect_err("should fail");

    assert_eq!(err.code.as_deref(), Some(CODE_BACKEND_OUTPUT));
    assert!(err.message.contains("unexpected reply"), "{}", err.message);
}

#[tokio::test]
async fn test_provider_id_trims_output() {
    let gw = gateway(ScriptedRunner::replying(b"kubernetes\n"));

    let id = gw
        .provider_id("github.com/loft-sh/devpod-provider-kubernetes")
        .await
        .expect("id");

    assert_eq!(id, ProviderId::from("kubernetes"));
    assert_eq!(
        runner_of(&gw).single_args(),
        ["provider", "id", "github.com/loft-sh/devpod-provider-kubernetes"]
    );
}

#[tokio::test]
async fn test_provider_id_rejects_empty_output() {
    let gw = gateway(ScriptedRunner::replying(b"  \n"));

    let err = gw.provider_id("x").await.expect_err("should fail");

    assert_eq!(err.code.as_deref(), Some(CODE_BACKEND_OUTPUT));
}

#[tokio::test]
async fn test_add_provider_builds_full_argument_list() {
    let gw = gateway(ScriptedRunner::replying(b""));
    let mut options = ProviderOptions::new();
    options.insert("REGION".to_string(), json!("eu-west-1"));
    let mut metadata = Map::new();
    metadata.insert("sourceKind".to_string(), json!("github"));
    let config = AddProviderConfig {
        name: Some(ProviderId::from("aws")),
        use_as_default_provider: false,
        reuse_machine: true,
        options,
        source_metadata: metadata,
    };

    gw.add_provider("github.com/org/aws", &config).await.expect("add");

    assert_eq!(
        runner_of(&gw).single_args(),
        [
            "provider",
            "add",
            "github.com/org/aws",
            "--name",
            "aws",
            "--use=false",
            "--single-machine",
            "-o",
            "REGION=eu-west-1",
            "--metadata",
            r#"{"sourceKind":"github"}"#,
        ]
    );
}

#[tokio::test]
async fn test_add_provider_as_default_omits_use_flag() {
    let gw = gateway(ScriptedRunner::replying(b""));
    let config = AddProviderConfig {
        use_as_default_provider: true,
        ..AddProviderConfig::default()
    };

    gw.add_provider("docker", &config).await.expect("add");

    assert_eq!(runner_of(&gw).single_args(), ["provider", "add", "docker"]);
}

#[tokio::test]
async fn test_remove_and_use_map_to_backend_verbs() {
    let gw = gateway(ScriptedRunner::new([Ok(ok_output(b"")), Ok(ok_output(b""))]));

    gw.remove_provider(&ProviderId::from("old")).await.expect("remove");
    gw.use_provider(&ProviderId::from("new")).await.expect("use");

    let calls = runner_of(&gw).calls();
    assert_eq!(calls[0].1, ["provider", "delete", "old"]);
    assert_eq!(calls[1].1, ["provider", "use", "new"]);
}

#[tokio::test]
async fn test_get_provider_options_parses_json_reply() {
    let gw = gateway(ScriptedRunner::replying(br#"{"NAMESPACE":{"value":"dev"}}"#));

    let options = gw
        .get_provider_options(&ProviderId::from("k8s"))
        .await
        .expect("options");

    assert_eq!(options["NAMESPACE"], json!({"value": "dev"}));
    assert_eq!(
        runner_of(&gw).single_args(),
        ["provider", "options", "k8s", "--output", "json"]
    );
}

#[tokio::test]
async fn test_set_provider_options_passes_reuse_flag_and_options() {
    let gw = gateway(ScriptedRunner::replying(b""));
    let mut options = ProviderOptions::new();
    options.insert("B".to_string(), json!(2));
    options.insert("A".to_string(), json!("x"));

    gw.set_provider_options(&ProviderId::from("p"), &options, true)
        .await
        .expect("set-options");

    assert_eq!(
        runner_of(&gw).single_args(),
        ["provider", "set-options", "p", "--single-machine", "-o", "A=x", "-o", "B=2"]
    );
}

#[tokio::test]
async fn test_nonzero_exit_maps_to_exit_code_and_stderr() {
    let gw = gateway(ScriptedRunner::new([Ok(err_output(
        3,
        b"provider docker not found\n",
    ))]));

    let err = gw
        .use_provider(&ProviderId::from("docker"))
        .await
        .expect_err("should fail");

    assert_eq!(err.code.as_deref(), Some("backend-exit-3"));
    assert_eq!(err.message, "provider docker not found");
}

#[tokio::test]
async fn test_nonzero_exit_without_stderr_names_the_command() {
    let gw = gateway(ScriptedRunner::new([Ok(err_output(1, b""))]));

    let err = gw
        .remove_provider(&ProviderId::from("x"))
        .await
        .expect_err("should fail");

    assert_eq!(err.message, "devpod provider delete x failed");
}

#[tokio::test]
async fn test_spawn_failure_maps_to_unavailable() {
    let gw = gateway(ScriptedRunner::new([Err(anyhow::anyhow!(
        "failed to spawn devpod"
    ))]));

    let err = gw.list_providers().await.expect_err("should fail");

    assert_eq!(err.code.as_deref(), Some(CODE_BACKEND_UNAVAILABLE));
    assert!(err.message.contains("failed to spawn devpod"));
}
