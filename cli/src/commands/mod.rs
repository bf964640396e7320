//! Command implementations

pub mod dangling;
pub mod providers;
pub mod version;

use clap::Args;

/// Flags shared by `add` and `configure`.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderConfigArgs {
    /// Make this provider the default
    #[arg(long = "use")]
    pub use_as_default: bool,

    /// Reuse a single machine for all workspaces of this provider
    #[arg(long)]
    pub reuse_machine: bool,

    /// Provider option as KEY=VALUE (repeatable)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,
}

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Provider source (name, URL, or path)
    pub source: String,

    /// Explicit provider id (defaults to the id derived from the source)
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub config: ProviderConfigArgs,
}

/// Arguments for the configure command.
#[derive(Args, Debug)]
pub struct ConfigureArgs {
    /// Provider id
    pub id: String,

    #[command(flatten)]
    pub config: ProviderConfigArgs,
}
