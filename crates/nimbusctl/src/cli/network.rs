//! Network CLI command definitions
//!
//! The gateway child-edit commands read the gateway object from stdin (or
//! `--gateway @file.json`), mutate it locally, and print the mutated gateway
//! so the next pipeline stage can pick it up. Only `app-gateway get` and
//! `app-gateway update` talk to the service.

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// Application gateway operations
    #[command(subcommand, name = "app-gateway")]
    AppGateway(AppGatewayCommands),
    /// Backend address pool operations on a piped gateway
    #[command(subcommand, name = "backend-pool")]
    BackendPool(BackendPoolCommands),
    /// Backend HTTP settings operations on a piped gateway
    #[command(subcommand, name = "http-settings")]
    HttpSettings(HttpSettingsCommands),
}

/// Application gateway commands
#[derive(Subcommand, Debug)]
pub enum AppGatewayCommands {
    /// Fetch an application gateway
    Get {
        /// Resource group containing the gateway
        #[arg(long)]
        resource_group: String,
        /// Gateway name
        #[arg(long)]
        name: String,
    },
    /// Commit a (piped) gateway back to the service
    #[command(after_help = "EXAMPLES:
    nimbusctl network app-gateway get --resource-group rg1 --name gw1 -o json \\
        | nimbusctl network backend-pool set --name pool1 --ip 10.0.0.4 -o json \\
        | nimbusctl network app-gateway update --resource-group rg1
")]
    Update {
        /// Resource group containing the gateway
        #[arg(long)]
        resource_group: String,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
}

/// Backend address pool commands
#[derive(Subcommand, Debug)]
pub enum BackendPoolCommands {
    /// Append a new pool; fails if the name already exists
    Add {
        /// Pool name
        #[arg(long)]
        name: String,
        #[command(flatten)]
        addresses: PoolAddressArgs,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Replace an existing pool by name; fails if the name does not exist
    #[command(after_help = "The matched pool's previous contents are discarded; \
the replacement is built from the supplied parameters only.")]
    Set {
        /// Pool name (matched case-insensitively)
        #[arg(long)]
        name: String,
        #[command(flatten)]
        addresses: PoolAddressArgs,
        /// Append the rebuilt pool instead of replacing the matched entry,
        /// leaving the old entry behind
        #[arg(long)]
        append_duplicate: bool,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Print one pool from the piped gateway
    Get {
        /// Pool name (matched case-insensitively)
        #[arg(long)]
        name: String,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Print all pools from the piped gateway
    List {
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Drop one pool from the piped gateway
    Remove {
        /// Pool name (matched case-insensitively)
        #[arg(long)]
        name: String,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
}

/// One of the three pool address modes; exactly one must be supplied.
#[derive(clap::Args, Debug)]
pub struct PoolAddressArgs {
    /// Backend IP address (can be specified multiple times)
    #[arg(long = "ip", value_name = "IP")]
    pub ips: Vec<String>,

    /// Backend FQDN (can be specified multiple times)
    #[arg(long = "fqdn", value_name = "FQDN", conflicts_with = "ips")]
    pub fqdns: Vec<String>,

    /// Backend IP configuration resource id (can be specified multiple times)
    #[arg(
        long = "ip-config-id",
        value_name = "ID",
        conflicts_with_all = ["ips", "fqdns"]
    )]
    pub ip_config_ids: Vec<String>,
}

/// Backend HTTP settings commands
#[derive(Subcommand, Debug)]
pub enum HttpSettingsCommands {
    /// Replace existing HTTP settings by name; fails if the name does not exist
    Set {
        /// Settings name (matched case-insensitively)
        #[arg(long)]
        name: String,
        /// Backend port
        #[arg(long)]
        port: u16,
        /// Backend protocol
        #[arg(long, value_enum)]
        protocol: ProtocolArg,
        /// Cookie-based affinity
        #[arg(long, value_enum)]
        cookie_based_affinity: AffinityArg,
        /// Append the rebuilt settings instead of replacing the matched entry,
        /// leaving the old entry behind
        #[arg(long)]
        append_duplicate: bool,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
    /// Print one HTTP settings entry from the piped gateway
    Get {
        /// Settings name (matched case-insensitively)
        #[arg(long)]
        name: String,
        /// Gateway JSON (string or @file); read from stdin when omitted
        #[arg(long)]
        gateway: Option<String>,
    },
}

/// Backend protocol argument
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProtocolArg {
    Http,
    Https,
}

impl ProtocolArg {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            ProtocolArg::Http => "Http",
            ProtocolArg::Https => "Https",
        }
    }
}

/// Cookie-based affinity argument
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AffinityArg {
    Enabled,
    Disabled,
}

impl AffinityArg {
    /// Canonical wire spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            AffinityArg::Enabled => "Enabled",
            AffinityArg::Disabled => "Disabled",
        }
    }
}
