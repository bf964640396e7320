//! Infrastructure implementation of the `ConfigStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ConfigStore;
use crate::domain::ClientConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "PROVCTL_CONFIG";

/// Production implementation of `ConfigStore` that uses a YAML file on disk.
pub struct YamlConfigStore;

impl ConfigStore for YamlConfigStore {
    fn load(&self) -> Result<ClientConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(ClientConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: ClientConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Ok(val) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(val));
        }
        Ok(home_dir()?.join("config.yaml"))
    }
}

/// `~/.provctl`, the default home for config and the provider record.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn home_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.join(".provctl"))
}

/// Directory holding `providers.json`: `data_dir` from config, else `~/.provctl`.
///
/// # Errors
///
/// Returns an error if no `data_dir` is configured and the home directory
/// cannot be determined.
pub fn data_dir(config: &ClientConfig) -> Result<PathBuf> {
    match &config.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => home_dir(),
    }
}
