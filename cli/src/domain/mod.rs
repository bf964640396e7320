//! Domain layer: pure types and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod error;
pub mod options;

pub use config::ClientConfig;
pub use error::{ConfigError, OptionArgError};
pub use options::{parse_option_arg, parse_option_args};
