//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: process execution, the
//! backend gateway, the JSON record store, and config file access.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod command_runner;
pub mod config;
pub mod gateway;
pub mod store;

pub use command_runner::TokioCommandRunner;
pub use config::YamlConfigStore;
pub use gateway::BackendGateway;
pub use store::JsonFileStore;
