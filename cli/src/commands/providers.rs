//! Provider commands: list, id, add, remove, options, use, configure.

use anyhow::Result;
use provctl_common::{AddProviderConfig, ConfigureProviderConfig, ProviderId, ProviderOptions};
use serde_json::Value;

use crate::app::AppContext;
use crate::application::services::setup_provider;
use crate::commands::{AddArgs, ConfigureArgs, ProviderConfigArgs};
use crate::domain::parse_option_args;

/// `provctl list`
pub async fn list(ctx: &AppContext) -> Result<()> {
    let result = ctx.coordinator.list_all().await;
    ctx.report(result, |out, providers| {
        if providers.is_empty() {
            out.info("No providers configured.");
            return;
        }
        out.header("Providers");
        for (id, state) in providers {
            out.kv(id.as_str(), &summarize_state(state));
        }
    })
}

/// `provctl id <SOURCE>`
pub async fn id(ctx: &AppContext, source: &str) -> Result<()> {
    let result = ctx.coordinator.new_id(source).await;
    ctx.report(result, |_, id| println!("{id}"))
}

/// `provctl add <SOURCE>`: register and configure, tracking the id as dangling
/// until both steps succeed.
pub async fn add(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let config = AddProviderConfig {
        name: args.name.as_deref().map(ProviderId::from),
        use_as_default_provider: args.config.use_as_default,
        reuse_machine: args.config.reuse_machine,
        options: parse_options(&args.config)?,
        ..AddProviderConfig::default()
    };

    let result = setup_provider(&ctx.coordinator, &args.source, &config).await;
    let leftover = if ctx.is_json() {
        Vec::new()
    } else {
        ctx.coordinator.dangling()
    };
    for id in leftover {
        ctx.output.warn(&format!(
            "Provider '{id}' was left incomplete and is recorded for cleanup in {} \
             (see `provctl dangling show`)",
            ctx.store_path.display()
        ));
    }
    ctx.report(result, |out, id| out.success(&format!("Added provider {id}")))
}

/// `provctl remove <ID>`
pub async fn remove(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ProviderId::from(id);
    let result = ctx.coordinator.remove(&id).await;
    ctx.report(result, |out, _| out.success(&format!("Removed provider {id}")))
}

/// `provctl options <ID>`
pub async fn options(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ProviderId::from(id);
    let result = ctx.coordinator.get_options(&id).await;
    ctx.report(result, |out, options| {
        if options.is_empty() {
            out.info(&format!("Provider {id} has no options."));
            return;
        }
        out.header(&format!("Options for {id}"));
        for (name, value) in options {
            out.kv(name, &summarize_state(value));
        }
    })
}

/// `provctl use <ID>`
pub async fn use_provider(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ProviderId::from(id);
    let result = ctx.coordinator.use_provider(&id).await;
    ctx.report(result, |out, _| out.success(&format!("Using provider {id}")))
}

/// `provctl configure <ID>`
pub async fn configure(ctx: &AppContext, args: &ConfigureArgs) -> Result<()> {
    let id = ProviderId::from(args.id.as_str());
    let config = ConfigureProviderConfig {
        use_as_default_provider: args.config.use_as_default,
        reuse_machine: args.config.reuse_machine,
        options: parse_options(&args.config)?,
    };
    let result = ctx.coordinator.configure(&id, &config).await;
    ctx.report(result, |out, _| out.success(&format!("Configured provider {id}")))
}

fn parse_options(args: &ProviderConfigArgs) -> Result<ProviderOptions> {
    Ok(parse_option_args(&args.options)?)
}

/// One-line rendering of an opaque JSON value for human output.
fn summarize_state(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
