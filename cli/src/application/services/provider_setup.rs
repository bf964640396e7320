//! Application service: provider setup use-case.
//!
//! Setup marks the provider as dangling before touching the backend, so a
//! crash between registration and configuration leaves a persisted record
//! the backend's cleanup can act on. Entries left by earlier runs are merged
//! in first and survive both outcomes.

use provctl_common::{
    AddProviderConfig, CODE_STORE_READ, CommandError, CommandResult, ConfigureProviderConfig,
    ProviderId,
};

use crate::application::ports::ProviderGateway;
use crate::application::services::provider_coordinator::ProviderCoordinator;

/// Register and configure a provider in one step.
///
/// Steps:
/// 1. restore the persisted dangling list into memory,
/// 2. resolve the identifier (`config.name` or the backend-derived id),
/// 3. mark it dangling,
/// 4. register it with the source metadata only,
/// 5. apply options and default selection,
/// 6. resolve that identifier, keeping any other dangling entries.
///
/// On failure the error is returned and the identifier stays dangling. An
/// unreadable record aborts setup before the backend is called, so the
/// record is never overwritten blind.
pub async fn setup_provider<G: ProviderGateway>(
    coordinator: &ProviderCoordinator<G>,
    raw_source: &str,
    config: &AddProviderConfig,
) -> CommandResult<ProviderId> {
    let earlier = coordinator.restore_dangling().await.map_err(|err| {
        CommandError::new(format!("{err:#}")).with_code(CODE_STORE_READ)
    })?;
    if !earlier.is_empty() {
        tracing::warn!(count = earlier.len(), "dangling providers from an earlier run are still recorded");
    }

    let id = match &config.name {
        Some(name) => name.clone(),
        None => coordinator.new_id(raw_source).await?,
    };

    coordinator.set_dangling(id.clone());

    let registration = AddProviderConfig {
        name: Some(id.clone()),
        source_metadata: config.source_metadata.clone(),
        ..AddProviderConfig::default()
    };
    coordinator.add(raw_source, &registration).await?;
    coordinator
        .configure(&id, &ConfigureProviderConfig::from(config))
        .await?;

    coordinator.resolve_dangling(&id);
    tracing::info!(provider = %id, "provider setup complete");
    Ok(id)
}
