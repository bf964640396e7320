//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors raised while validating `config.yaml`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid backend: the backend binary name must not be empty.")]
    EmptyBackend,

    #[error("Invalid command_timeout_secs: must be greater than zero.")]
    ZeroTimeout,
}

// ── Option argument errors ────────────────────────────────────────────────────

/// Errors raised while parsing `-o KEY=VALUE` arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionArgError {
    #[error("Invalid option '{0}': expected KEY=VALUE")]
    MissingSeparator(String),

    #[error("Invalid option '{0}': option name must not be empty")]
    EmptyKey(String),
}
