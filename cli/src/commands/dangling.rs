//! Dangling-provider record commands.

use anyhow::Result;
use clap::Subcommand;
use provctl_common::{CODE_STORE_READ, CommandError, ProviderId};

use crate::app::AppContext;

#[derive(Subcommand, Debug)]
pub enum DanglingCommand {
    /// Show providers recorded as incomplete
    Show,
    /// Clear the dangling-provider record
    Clear,
}

/// Run a dangling subcommand.
pub async fn run(ctx: &AppContext, cmd: DanglingCommand) -> Result<()> {
    match cmd {
        DanglingCommand::Show => show(ctx).await,
        DanglingCommand::Clear => clear(ctx).await,
    }
}

async fn show(ctx: &AppContext) -> Result<()> {
    let result = read_persisted(ctx).await;
    ctx.report(result, |out, ids| {
        if ids.is_empty() {
            out.info("No dangling providers.");
            return;
        }
        out.header("Dangling providers");
        for id in ids {
            out.kv("-", id.as_str());
        }
    })
}

async fn clear(ctx: &AppContext) -> Result<()> {
    let result = ctx
        .coordinator
        .restore_dangling()
        .await
        .map(|_| ctx.coordinator.pop_dangling())
        .map_err(store_read_error);
    ctx.report(result, |out, ids| {
        out.success(&format!("Cleared {} dangling provider record(s)", ids.len()));
    })
}

async fn read_persisted(ctx: &AppContext) -> Result<Vec<ProviderId>, CommandError> {
    ctx.coordinator
        .persisted_dangling()
        .await
        .map_err(store_read_error)
}

fn store_read_error(err: anyhow::Error) -> CommandError {
    CommandError::new(format!("{err:#}")).with_code(CODE_STORE_READ)
}
