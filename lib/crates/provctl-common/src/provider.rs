use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque identifier of a configured provider instance.
///
/// Uniqueness is enforced by the backend, not here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ProviderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProviderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for ProviderId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProviderId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Option name to value. Values are opaque to the client.
pub type ProviderOptions = BTreeMap<String, Value>;

/// Provider listing keyed by identifier. Each state is opaque to the client.
pub type Providers = BTreeMap<ProviderId, Value>;

/// Payload for registering a new provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProviderConfig {
    /// Explicit identifier; the backend derives one from the source when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<ProviderId>,
    #[serde(default)]
    pub use_as_default_provider: bool,
    #[serde(default)]
    pub reuse_machine: bool,
    #[serde(default)]
    pub options: ProviderOptions,
    /// Source-specific fields, kept verbatim.
    #[serde(flatten)]
    pub source_metadata: Map<String, Value>,
}

/// Payload for reconfiguring an existing provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureProviderConfig {
    #[serde(default)]
    pub use_as_default_provider: bool,
    #[serde(default)]
    pub reuse_machine: bool,
    #[serde(default)]
    pub options: ProviderOptions,
}

impl From<&AddProviderConfig> for ConfigureProviderConfig {
    fn from(config: &AddProviderConfig) -> Self {
        Self {
            use_as_default_provider: config.use_as_default_provider,
            reuse_machine: config.reuse_machine,
            options: config.options.clone(),
        }
    }
}
