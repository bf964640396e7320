//! Types shared across the provider command boundary.

pub mod command;
pub mod provider;
pub mod store;

pub use command::{CommandError, CommandResponse, CommandResult};
pub use provider::{
    AddProviderConfig, ConfigureProviderConfig, ProviderId, ProviderOptions, Providers,
};
pub use store::{CODE_STORE_READ, DANGLING_PROVIDERS_KEY, PROVIDERS_STORE_FILE_NAME};
