//! Infrastructure implementation of the `ProviderGateway` port.
//!
//! `BackendGateway<R>` routes every provider command to the native backend
//! binary through a `CommandRunner`, as `<backend> provider <verb> ...`.
//! Structured replies are requested with `--output json`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use provctl_common::{
    AddProviderConfig, CommandError, CommandResult, ProviderId, ProviderOptions, Providers,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::application::ports::{CommandRunner, ProviderGateway};
use crate::domain::ClientConfig;
use crate::infra::command_runner::TokioCommandRunner;

/// Error code for a backend that could not be spawned or timed out.
pub const CODE_BACKEND_UNAVAILABLE: &str = "backend-unavailable";
/// Error code for a backend reply that could not be parsed.
pub const CODE_BACKEND_OUTPUT: &str = "backend-output";

/// Gateway adapter that shells out to the native backend.
///
/// Generic over `R: CommandRunner` so that tests can inject a mock runner
/// without spawning real processes.
pub struct BackendGateway<R: CommandRunner> {
    runner: R,
    program: String,
    debug: AtomicBool,
}

impl<R: CommandRunner> BackendGateway<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
            debug: AtomicBool::new(false),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Run one backend command and return its stdout, mapping failures to
    /// `CommandError`s.
    async fn invoke(&self, args: &[String]) -> CommandResult<Vec<u8>> {
        let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let started = Instant::now();
        let output = self.runner.run(&self.program, &arg_refs).await.map_err(|err| {
            CommandError::new(format!("{err:#}")).with_code(CODE_BACKEND_UNAVAILABLE)
        })?;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if self.debug.load(Ordering::Relaxed) {
            tracing::info!(
                program = %self.program,
                args = ?args,
                status = ?output.status.code(),
                elapsed_ms,
                "provider command",
            );
        } else {
            tracing::debug!(
                program = %self.program,
                args = ?args,
                status = ?output.status.code(),
                elapsed_ms,
                "provider command",
            );
        }

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("{} {} failed", self.program, args.join(" "))
        } else {
            stderr
        };
        let code = output
            .status
            .code()
            .map_or_else(|| "backend-signal".to_string(), |c| format!("backend-exit-{c}"));
        Err(CommandError::new(message).with_code(code))
    }

    async fn invoke_json<T: DeserializeOwned>(&self, args: &[String]) -> CommandResult<T> {
        let stdout = self.invoke(args).await?;
        serde_json::from_slice(&stdout).map_err(|err| {
            CommandError::new(format!(
                "unexpected reply from {} {}: {err}",
                self.program,
                args.join(" ")
            ))
            .with_code(CODE_BACKEND_OUTPUT)
        })
    }
}

impl BackendGateway<TokioCommandRunner> {
    /// Convenience constructor for production use.
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        let gateway = Self::new(
            TokioCommandRunner::new(config.command_timeout()),
            config.backend.clone(),
        );
        gateway.set_debug(config.debug);
        gateway
    }
}

impl<R: CommandRunner> ProviderGateway for BackendGateway<R> {
    fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    async fn list_providers(&self) -> CommandResult<Providers> {
        self.invoke_json(&provider_args(&["list", "--output", "json"]))
            .await
    }

    async fn provider_id(&self, raw_source: &str) -> CommandResult<ProviderId> {
        let args = provider_args(&["id", raw_source]);
        let stdout = self.invoke(&args).await?;
        let id = String::from_utf8_lossy(&stdout).trim().to_string();
        if id.is_empty() {
            return Err(CommandError::new(format!(
                "{} returned an empty provider id for {raw_source}",
                self.program
            ))
            .with_code(CODE_BACKEND_OUTPUT));
        }
        Ok(ProviderId::from(id))
    }

    async fn add_provider(&self, raw_source: &str, config: &AddProviderConfig) -> CommandResult {
        let mut args = provider_args(&["add", raw_source]);
        if let Some(name) = &config.name {
            args.extend(["--name".to_string(), name.to_string()]);
        }
        if !config.use_as_default_provider {
            args.push("--use=false".to_string());
        }
        if config.reuse_machine {
            args.push("--single-machine".to_string());
        }
        push_option_args(&mut args, &config.options);
        if !config.source_metadata.is_empty() {
            let metadata = Value::Object(config.source_metadata.clone());
            args.extend(["--metadata".to_string(), metadata.to_string()]);
        }
        self.invoke(&args).await.map(drop)
    }

    async fn remove_provider(&self, id: &ProviderId) -> CommandResult {
        self.invoke(&provider_args(&["delete", id.as_str()]))
            .await
            .map(drop)
    }

    async fn get_provider_options(&self, id: &ProviderId) -> CommandResult<ProviderOptions> {
        self.invoke_json(&provider_args(&["options", id.as_str(), "--output", "json"]))
            .await
    }

    async fn set_provider_options(
        &self,
        id: &ProviderId,
        options: &ProviderOptions,
        reuse_machine: bool,
    ) -> CommandResult {
        let mut args = provider_args(&["set-options", id.as_str()]);
        if reuse_machine {
            args.push("--single-machine".to_string());
        }
        push_option_args(&mut args, options);
        self.invoke(&args).await.map(drop)
    }

    async fn use_provider(&self, id: &ProviderId) -> CommandResult {
        self.invoke(&provider_args(&["use", id.as_str()]))
            .await
            .map(drop)
    }
}

fn provider_args(rest: &[&str]) -> Vec<String> {
    std::iter::once("provider")
        .chain(rest.iter().copied())
        .map(str::to_string)
        .collect()
}

fn push_option_args(args: &mut Vec<String>, options: &ProviderOptions) {
    for (name, value) in options {
        args.push("-o".to_string());
        args.push(format!("{name}={}", option_value_text(value)));
    }
}

/// Render an opaque option value for the command line. Strings pass through
/// unquoted; everything else is sent as JSON text.
fn option_value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
