//! JSON output helpers.
//!
//! Every `--json` code path prints the uniform command wrapper:
//! `{"ok":true,"data":...}` on success, `{"ok":false,"error":{...}}` on failure.

use anyhow::{Context, Result};
use provctl_common::{CommandResponse, CommandResult};
use serde::Serialize;

/// Format a command result as a pretty-printed response object.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized.
pub fn format_response<T: Serialize + Clone>(result: &CommandResult<T>) -> Result<String> {
    let response = CommandResponse::from(result.clone());
    serde_json::to_string_pretty(&response).context("JSON serialization failed")
}
