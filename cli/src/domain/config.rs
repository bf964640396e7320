//! Client configuration schema and validation.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Defaults ─────────────────────────────────────────────────────────────────

pub const DEFAULT_BACKEND: &str = "devpod";
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.provctl/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Native backend binary that implements the provider commands.
    pub backend: String,
    /// Directory holding the persisted provider record. Defaults to `~/.provctl`.
    pub data_dir: Option<PathBuf>,
    /// Per-call timeout for backend commands.
    pub command_timeout_secs: u64,
    /// Log every backend call at `info`.
    pub debug: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend: DEFAULT_BACKEND.to_string(),
            data_dir: None,
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            debug: false,
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Reject values that would make every backend call fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend name is blank or the timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.trim().is_empty() {
            return Err(ConfigError::EmptyBackend);
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
