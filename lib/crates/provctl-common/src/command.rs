use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of a single call across the provider command boundary.
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Error payload carried back from the native backend.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct CommandError {
    /// Machine-readable code, when the backend supplies one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Serialized form of a [`CommandResult`]: `{"ok":true,"data":...}` or
/// `{"ok":false,"error":{...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CommandError>,
}

impl<T> CommandResponse<T> {
    /// Convert back into a [`CommandResult`].
    ///
    /// A success response may legitimately omit `data` (unit commands), so
    /// the payload stays optional. A failure without an error payload is
    /// still a failure.
    pub fn into_result(self) -> CommandResult<Option<T>> {
        if self.ok {
            return Ok(self.data);
        }
        Err(self
            .error
            .unwrap_or_else(|| CommandError::new("command failed without an error payload")))
    }
}

impl<T> From<CommandResult<T>> for CommandResponse<T> {
    fn from(result: CommandResult<T>) -> Self {
        match result {
            Ok(data) => Self {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Self {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}
