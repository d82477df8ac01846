//! Network command implementations
//!
//! `app-gateway get` and `app-gateway update` are the only operations here
//! that call the service. The child-collection commands mutate the gateway
//! object threaded through the shell pipeline: read it, edit it, emit it.

use nimbus_mgmt::network::ApplicationGatewayHandler;
use tracing::debug;

use crate::cli::{
    AppGatewayCommands, BackendPoolCommands, HttpSettingsCommands, NetworkCommands, OutputFormat,
    PoolAddressArgs,
};
use crate::commands::utils::{emit, read_gateway, require_non_empty};
use crate::connection::ConnectionManager;
use crate::error::{CtlError, Result as CliResult};
use crate::models::network::{
    AppGateway, PoolAddresses, build_backend_pool, build_http_settings,
};

pub async fn handle_network_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &NetworkCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        NetworkCommands::AppGateway(cmd) => {
            handle_app_gateway_command(conn_mgr, profile_name, cmd, output_format, query).await
        }
        NetworkCommands::BackendPool(cmd) => {
            handle_backend_pool_command(conn_mgr, profile_name, cmd, output_format, query)
        }
        NetworkCommands::HttpSettings(cmd) => {
            handle_http_settings_command(conn_mgr, profile_name, cmd, output_format, query)
        }
    }
}

async fn handle_app_gateway_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &AppGatewayCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let handler = ApplicationGatewayHandler::new(conn_mgr.create_client(profile_name)?);

    match command {
        AppGatewayCommands::Get {
            resource_group,
            name,
        } => {
            require_non_empty(resource_group, "resource group")?;
            require_non_empty(name, "gateway name")?;
            debug!("Fetching application gateway {}/{}", resource_group, name);
            let response = handler.get(resource_group, name).await?;
            let gateway = AppGateway::from(response.body);
            emit(&gateway, output_format, query)
        }

        AppGatewayCommands::Update {
            resource_group,
            gateway,
        } => {
            require_non_empty(resource_group, "resource group")?;
            let gateway = read_gateway(gateway.as_deref())?;
            debug!(
                "Committing application gateway {}/{}",
                resource_group, gateway.name
            );
            let response = handler
                .create_or_update(resource_group, &gateway.into())
                .await?;
            let updated = AppGateway::from(response.body);
            emit(&updated, output_format, query)
        }
    }
}

fn handle_backend_pool_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &BackendPoolCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        BackendPoolCommands::Add {
            name,
            addresses,
            gateway,
        } => {
            require_non_empty(name, "pool name")?;
            let addresses = pool_addresses(addresses)?;
            let subscription = conn_mgr.subscription(profile_name)?;
            let mut gateway = read_gateway(gateway.as_deref())?;
            gateway.add_backend_pool(build_backend_pool(&subscription, name, &addresses))?;
            emit(&gateway, output_format, query)
        }

        BackendPoolCommands::Set {
            name,
            addresses,
            append_duplicate,
            gateway,
        } => {
            require_non_empty(name, "pool name")?;
            let addresses = pool_addresses(addresses)?;
            let subscription = conn_mgr.subscription(profile_name)?;
            let mut gateway = read_gateway(gateway.as_deref())?;
            gateway.set_backend_pool(
                build_backend_pool(&subscription, name, &addresses),
                *append_duplicate,
            )?;
            emit(&gateway, output_format, query)
        }

        BackendPoolCommands::Get { name, gateway } => {
            let gateway = read_gateway(gateway.as_deref())?;
            let Some(index) = gateway.find_backend_pool(name) else {
                return Err(CtlError::InvalidInput {
                    message: "backend address pool with the specified name does not exist".into(),
                });
            };
            emit(&gateway.backend_address_pools[index], output_format, query)
        }

        BackendPoolCommands::List { gateway } => {
            let gateway = read_gateway(gateway.as_deref())?;
            emit(&gateway.backend_address_pools, output_format, query)
        }

        BackendPoolCommands::Remove { name, gateway } => {
            let mut gateway = read_gateway(gateway.as_deref())?;
            gateway.remove_backend_pool(name)?;
            emit(&gateway, output_format, query)
        }
    }
}

fn handle_http_settings_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &HttpSettingsCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        HttpSettingsCommands::Set {
            name,
            port,
            protocol,
            cookie_based_affinity,
            append_duplicate,
            gateway,
        } => {
            require_non_empty(name, "settings name")?;
            let subscription = conn_mgr.subscription(profile_name)?;
            let mut gateway = read_gateway(gateway.as_deref())?;
            gateway.set_http_settings(
                build_http_settings(
                    &subscription,
                    name,
                    *port,
                    protocol.as_str(),
                    cookie_based_affinity.as_str(),
                ),
                *append_duplicate,
            )?;
            emit(&gateway, output_format, query)
        }

        HttpSettingsCommands::Get { name, gateway } => {
            let gateway = read_gateway(gateway.as_deref())?;
            let Some(index) = gateway.find_http_settings(name) else {
                return Err(CtlError::InvalidInput {
                    message: "backend http settings with the specified name does not exist".into(),
                });
            };
            emit(&gateway.backend_http_settings[index], output_format, query)
        }
    }
}

/// Exactly one address mode must be supplied; clap enforces mutual exclusion,
/// this enforces presence.
fn pool_addresses(args: &PoolAddressArgs) -> CliResult<PoolAddresses> {
    if !args.ips.is_empty() {
        Ok(PoolAddresses::Ips(args.ips.clone()))
    } else if !args.fqdns.is_empty() {
        Ok(PoolAddresses::Fqdns(args.fqdns.clone()))
    } else if !args.ip_config_ids.is_empty() {
        Ok(PoolAddresses::IpConfigurationIds(args.ip_config_ids.clone()))
    } else {
        Err(CtlError::InvalidInput {
            message: "specify backend targets with --ip, --fqdn, or --ip-config-id".into(),
        })
    }
}
