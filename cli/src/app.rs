//! Application context: unified state passed to every command handler.
//!
//! `AppContext` is constructed once in `Cli::run()` and owns the output
//! context, the rendering mode, and the provider coordinator wired to the
//! production gateway and the on-disk provider record.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use provctl_common::CommandResult;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::application::services::ProviderCoordinator;
use crate::domain::ClientConfig;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::data_dir;
use crate::infra::{BackendGateway, JsonFileStore};
use crate::output::{OutputContext, json};

/// Coordinator type used by the binary.
pub type Coordinator = ProviderCoordinator<BackendGateway<TokioCommandRunner>>;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Provider lifecycle coordinator.
    pub coordinator: Coordinator,
    /// Location of the persisted provider record.
    pub store_path: PathBuf,
}

impl AppContext {
    /// Construct an `AppContext` from CLI flags and the loaded configuration.
    ///
    /// Must be called from inside the tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be resolved.
    pub fn new(flags: &AppFlags, config: &ClientConfig) -> Result<Self> {
        let mode = if flags.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let store = JsonFileStore::providers(&data_dir(config)?);
        let store_path = store.path().to_path_buf();
        let coordinator =
            ProviderCoordinator::new(BackendGateway::from_config(config), Arc::new(store));

        Ok(Self {
            output: OutputContext::new(flags.no_color, flags.quiet),
            mode,
            coordinator,
            store_path,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Render a command result in the active mode.
    ///
    /// JSON mode prints the response wrapper for both outcomes; human mode
    /// renders only successes. A failure is always returned as an error so
    /// the process exits non-zero.
    ///
    /// # Errors
    ///
    /// Returns the command's error, or a serialization error in JSON mode.
    pub fn report<T, F>(&self, result: CommandResult<T>, human: F) -> Result<()>
    where
        T: Serialize + Clone,
        F: FnOnce(&OutputContext, &T),
    {
        if self.is_json() {
            println!("{}", json::format_response(&result)?);
        } else if let Ok(data) = &result {
            human(&self.output, data);
        }
        result.map(drop).map_err(anyhow::Error::new)
    }

    /// Flush queued record writes before the process exits.
    pub async fn finish(self) {
        self.coordinator.shutdown().await;
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `debug` enables debug-level events.
pub fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
