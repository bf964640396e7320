//! Application services: use-case orchestration.
//!
//! Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod provider_coordinator;
pub mod provider_setup;
pub mod store_queue;

pub use provider_coordinator::ProviderCoordinator;
pub use provider_setup::setup_provider;
pub use store_queue::StoreQueue;
