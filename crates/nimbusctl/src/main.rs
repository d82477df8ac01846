use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use nimbusctl_core::Config;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod models;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::CtlError;

/// Commands that are already top-level (no prefix needed) or are explicit
/// service prefixes. These pass through unchanged.
const PASSTHROUGH_COMMANDS: &[&str] = &[
    "compute",
    "network",
    "batch",
    "profile",
    "prof", // profile alias
    "version",
    "ver", // version alias
    "v",   // version alias
    "completions",
    "comp", // completions alias
    "help",
];

/// Commands that exist only under `compute`.
const COMPUTE_ONLY_COMMANDS: &[&str] = &["extension-image"];

/// Commands that exist only under `network`.
const NETWORK_ONLY_COMMANDS: &[&str] = &["app-gateway", "backend-pool", "http-settings"];

/// Commands that exist only under `batch`.
const BATCH_ONLY_COMMANDS: &[&str] = &["task"];

/// Global flags that accept a following value (the value must be skipped when
/// scanning for the first positional arg).
///
/// Keep in sync with `Cli` struct global args.
const GLOBAL_VALUE_FLAGS: &[&str] = &[
    "--profile",
    "-p",
    "--config-file",
    "--output",
    "-o",
    "--query",
    "-q",
];

/// Rewrite `args` to inject the service prefix when omitted.
///
/// Resource names are unique across the three service groups, so the rewrite
/// never needs configuration to disambiguate. Returns the (possibly modified)
/// arg list that should be passed to `Cli::parse_from()`.
fn maybe_inject_prefix(args: Vec<String>) -> Vec<String> {
    let mut first_positional_idx: Option<usize> = None;

    let mut i = 1; // skip argv[0]
    while i < args.len() {
        let arg = &args[i];

        if arg == "--" {
            // Everything after `--` is positional — stop scanning.
            break;
        }

        // Boolean flags (no value)
        if arg == "--help" || arg == "-h" || arg == "--verbose" || arg == "--version" || arg == "-V"
        {
            i += 1;
            continue;
        }

        // Short verbose stacking: -v, -vv, -vvv
        if arg.starts_with('-') && !arg.starts_with("--") && arg.chars().skip(1).all(|c| c == 'v') {
            i += 1;
            continue;
        }

        // Value flags: --flag value form
        if GLOBAL_VALUE_FLAGS.contains(&arg.as_str()) {
            i += 2; // skip flag + value
            continue;
        }

        // --flag=value form
        if arg.starts_with("--")
            && let Some((key, _)) = arg.split_once('=')
            && GLOBAL_VALUE_FLAGS.contains(&key)
        {
            i += 1;
            continue;
        }

        // If we get here and it's a flag we don't recognise, skip it
        // (clap will handle the error later).
        if arg.starts_with('-') {
            i += 1;
            continue;
        }

        // First non-flag arg = the subcommand
        first_positional_idx = Some(i);
        break;
    }

    let first_positional_idx = match first_positional_idx {
        Some(idx) => idx,
        None => return args, // no subcommand found — let clap handle it
    };

    let subcmd = args[first_positional_idx].as_str();

    // Already a known top-level / explicit prefix → pass through
    if PASSTHROUGH_COMMANDS.contains(&subcmd) {
        return args;
    }

    let prefix = if COMPUTE_ONLY_COMMANDS.contains(&subcmd) {
        "compute"
    } else if NETWORK_ONLY_COMMANDS.contains(&subcmd) {
        "network"
    } else if BATCH_ONLY_COMMANDS.contains(&subcmd) {
        "batch"
    } else {
        // Unknown command — pass through and let clap produce its error
        return args;
    };

    let mut new_args = args[..first_positional_idx].to_vec();
    new_args.push(prefix.to_string());
    new_args.extend_from_slice(&args[first_positional_idx..]);
    new_args
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    let args = maybe_inject_prefix(args);
    let cli = Cli::parse_from(args);

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    // Load configuration from specified path or default location
    let (config, config_path) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            e.print_diagnostic();
            std::process::exit(1);
        }
    };
    debug!(
        "Creating ConnectionManager with config_path: {:?}",
        config_path
    );
    let conn_mgr = ConnectionManager::with_config_path(config, config_path);

    // Execute command
    if let Err(e) = execute_command(&cli, &conn_mgr).await {
        e.print_diagnostic();
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<(Config, Option<std::path::PathBuf>), CtlError> {
    if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        Ok((config, Some(path)))
    } else {
        debug!("Loading config from default location");
        Ok((Config::load()?, None))
    }
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "nimbusctl=warn,nimbus_mgmt=warn",
            1 => "nimbusctl=info,nimbus_mgmt=info",
            2 => "nimbusctl=debug,nimbus_mgmt=debug",
            _ => "nimbusctl=trace,nimbus_mgmt=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &ConnectionManager) -> Result<(), CtlError> {
    // Log command execution with sanitized parameters
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            debug!("Showing version information");
            match cli.output {
                cli::OutputFormat::Json | cli::OutputFormat::Yaml => {
                    let output_data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    commands::utils::emit(&output_data, cli.output, None)
                }
                _ => {
                    println!("nimbusctl {}", env!("CARGO_PKG_VERSION"));
                    Ok(())
                }
            }
        }

        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }

        Commands::Profile(profile_cmd) => {
            debug!("Executing profile command");
            commands::profile::handle_profile_command(
                profile_cmd,
                conn_mgr,
                cli.output,
                cli.query.as_deref(),
            )
        }

        Commands::Compute(compute_cmd) => {
            commands::compute::handle_compute_command(
                conn_mgr,
                cli.profile.as_deref(),
                compute_cmd,
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }

        Commands::Network(network_cmd) => {
            commands::network::handle_network_command(
                conn_mgr,
                cli.profile.as_deref(),
                network_cmd,
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }

        Commands::Batch(batch_cmd) => {
            commands::batch::handle_batch_command(
                conn_mgr,
                cli.profile.as_deref(),
                batch_cmd,
                cli.output,
                cli.query.as_deref(),
            )
            .await
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Profile(cmd) => {
            use cli::ProfileCommands::*;
            match cmd {
                List => "profile list".to_string(),
                Path => "profile path".to_string(),
                Show { name } => format!("profile show {}", name),
                Set { name, .. } => format!("profile set {} [credentials redacted]", name),
                Remove { name } => format!("profile remove {}", name),
                Default { name } => format!("profile default {}", name),
            }
        }
        Commands::Compute(cmd) => format!("compute {:?}", cmd),
        Commands::Network(cmd) => format!("network {:?}", cmd),
        Commands::Batch(cmd) => format!("batch {:?}", cmd),
    }
}
