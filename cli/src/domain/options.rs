//! Parsing of `-o KEY=VALUE` provider option arguments.

use provctl_common::ProviderOptions;
use serde_json::Value;

use crate::domain::error::OptionArgError;

/// Split a single `KEY=VALUE` argument. The value may itself contain `=`.
///
/// # Errors
///
/// Returns an error if there is no `=` or the key is empty.
pub fn parse_option_arg(arg: &str) -> Result<(String, Value), OptionArgError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| OptionArgError::MissingSeparator(arg.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(OptionArgError::EmptyKey(arg.to_string()));
    }
    Ok((key.to_string(), Value::String(value.to_string())))
}

/// Collect repeated option arguments into a map. Later keys override earlier ones.
///
/// # Errors
///
/// Returns the first malformed argument.
pub fn parse_option_args(args: &[String]) -> Result<ProviderOptions, OptionArgError> {
    let mut options = ProviderOptions::new();
    for arg in args {
        let (key, value) = parse_option_arg(arg)?;
        options.insert(key, value);
    }
    Ok(options)
}
