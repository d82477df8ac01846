//! CLI structure and command definitions
//!
//! Defines the command-line interface using clap, grouped by resource
//! provider: `compute`, `network`, and `batch`, plus profile management.

use clap::{Parser, Subcommand};

pub mod batch;
pub mod compute;
pub mod network;

pub use batch::*;
pub use compute::*;
pub use network::*;

/// Nimbus management CLI
#[derive(Parser, Debug)]
#[command(name = "nimbusctl")]
#[command(version, about = "Nimbus management CLI for compute, network and batch resources")]
#[command(long_about = "
Nimbus management CLI for compute, network and batch resources

Commands infer their service group — no prefix needed:
    nimbusctl task list --account acct --workitem wi --job job-1
    nimbusctl extension-image get --location westus --publisher Nimbus.Diagnostics ...

Or be explicit:
    nimbusctl batch task list --account acct --workitem wi --job job-1
    nimbusctl compute extension-image get ...

EXAMPLES:
    # Set up a profile
    nimbusctl profile set prod --token env:NIMBUS_TOKEN --subscription 0000-1111

    # Get JSON output for scripting
    nimbusctl batch task list --account acct --workitem wi --job job-1 -o json

    # Filter output with JMESPath
    nimbusctl batch task list --account acct --workitem wi --job job-1 -q '[?state==`active`]'

    # Thread a gateway through child edits, then commit it
    nimbusctl network app-gateway get --resource-group rg1 --name gw1 -o json \\
        | nimbusctl network backend-pool set --name pool1 --ip 10.0.0.4 -o json \\
        | nimbusctl network app-gateway update --resource-group rg1

For more help on a specific command, run:
    nimbusctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "NIMBUSCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "NIMBUSCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Automatically choose format based on context
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute resource operations
    #[command(subcommand)]
    Compute(ComputeCommands),

    /// Network resource operations
    #[command(subcommand)]
    Network(NetworkCommands),

    /// Batch resource operations
    #[command(subcommand)]
    Batch(BatchCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    #[command(after_help = "EXAMPLES:
    # Create a profile with the token kept in the environment
    nimbusctl profile set prod --token env:NIMBUS_TOKEN --subscription 0000-1111

    # List all profiles
    nimbusctl profile list

    # Show profile details (token redacted)
    nimbusctl profile show prod

    # Choose the profile used when none is named
    nimbusctl profile default prod
")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver", visible_alias = "v")]
    Version,

    /// Generate shell completions
    #[command(visible_alias = "comp")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Profile management commands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create or update a named profile
    Set {
        /// Profile name
        name: String,
        /// Management-plane endpoint
        #[arg(long)]
        api_url: Option<String>,
        /// Bearer token, or an env:VAR reference
        #[arg(long)]
        token: String,
        /// Subscription id, or an env:VAR reference
        #[arg(long)]
        subscription: String,
        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },
    /// List configured profiles
    List,
    /// Show one profile (token redacted)
    Show {
        /// Profile name
        name: String,
    },
    /// Remove a profile
    Remove {
        /// Profile name
        name: String,
    },
    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },
    /// Print the config file path in use
    Path,
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Friendly Interactive Shell
    Fish,
    /// PowerShell
    #[value(name = "powershell", alias = "power-shell")]
    PowerShell,
    /// Elvish
    Elvish,
}
