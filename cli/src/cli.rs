//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, init_tracing};
use crate::application::ports::ConfigStore;
use crate::commands;
use crate::infra::YamlConfigStore;

/// Manage providers through the native provisioning backend
#[derive(Parser)]
#[command(
    name = "provctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Log every backend call
    #[arg(long, global = true, env = "PROVCTL_DEBUG")]
    pub debug: bool,

    /// Backend binary implementing the provider commands
    #[arg(long, global = true, env = "PROVCTL_BACKEND", value_name = "BIN")]
    pub backend: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List configured providers
    List,

    /// Print the provider id derived from a source
    Id {
        /// Provider source (name, URL, or path)
        source: String,
    },

    /// Add and configure a provider
    Add(commands::AddArgs),

    /// Remove a provider
    Remove {
        /// Provider id
        id: String,
    },

    /// Show a provider's options
    Options {
        /// Provider id
        id: String,
    },

    /// Make a provider the default
    Use {
        /// Provider id
        id: String,
    },

    /// Set provider options and optionally make it the default
    Configure(commands::ConfigureArgs),

    /// Inspect or clear the dangling-provider record
    #[command(subcommand)]
    Dangling(commands::dangling::DanglingCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            debug,
            backend,
            command,
        } = self;

        if matches!(command, Command::Version) {
            commands::version::run(json);
            return Ok(());
        }

        let mut config = YamlConfigStore.load()?;
        if let Some(backend) = backend {
            config.backend = backend;
        }
        config.debug |= debug;
        config.validate()?;
        init_tracing(config.debug);

        let flags = AppFlags {
            no_color,
            quiet,
            json,
        };
        let ctx = AppContext::new(&flags, &config)?;

        let result = match command {
            Command::List => commands::providers::list(&ctx).await,
            Command::Id { source } => commands::providers::id(&ctx, &source).await,
            Command::Add(args) => commands::providers::add(&ctx, &args).await,
            Command::Remove { id } => commands::providers::remove(&ctx, &id).await,
            Command::Options { id } => commands::providers::options(&ctx, &id).await,
            Command::Use { id } => commands::providers::use_provider(&ctx, &id).await,
            Command::Configure(args) => commands::providers::configure(&ctx, &args).await,
            Command::Dangling(cmd) => commands::dangling::run(&ctx, cmd).await,
            Command::Version => Ok(()),
        };

        ctx.finish().await;
        result
    }
}
