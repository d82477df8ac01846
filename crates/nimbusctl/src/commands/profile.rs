//! Profile command implementations

use serde_json::json;

use crate::cli::{OutputFormat, ProfileCommands};
use crate::commands::utils::emit;
use crate::connection::ConnectionManager;
use crate::error::{CtlError, Result as CliResult};
use nimbusctl_core::config::default_api_url;
use nimbusctl_core::{Config, Profile};

pub fn handle_profile_command(
    command: &ProfileCommands,
    conn_mgr: &ConnectionManager,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        ProfileCommands::Set {
            name,
            api_url,
            token,
            subscription,
            default,
        } => {
            let mut config = conn_mgr.config.clone();
            config.profiles.insert(
                name.clone(),
                Profile {
                    api_url: api_url.clone().unwrap_or_else(default_api_url),
                    token: token.clone(),
                    subscription: subscription.clone(),
                },
            );
            // The first profile becomes the default implicitly.
            if *default || config.default_profile.is_none() {
                config.default_profile = Some(name.clone());
            }
            save(conn_mgr, &config)?;
            println!("Profile '{}' saved", name);
            Ok(())
        }

        ProfileCommands::List => {
            let mut names: Vec<_> = conn_mgr.config.profiles.keys().collect();
            names.sort();
            let profiles: Vec<_> = names
                .into_iter()
                .map(|name| {
                    let profile = &conn_mgr.config.profiles[name];
                    json!({
                        "name": name,
                        "apiUrl": profile.api_url,
                        "subscription": profile.subscription,
                        "default": conn_mgr.config.default_profile.as_deref() == Some(name),
                    })
                })
                .collect();
            emit(&profiles, output_format, query)
        }

        ProfileCommands::Show { name } => {
            let profile =
                conn_mgr
                    .config
                    .profiles
                    .get(name)
                    .ok_or_else(|| CtlError::ProfileNotFound {
                        name: name.clone(),
                    })?;
            emit(
                &json!({
                    "name": name,
                    "apiUrl": profile.api_url,
                    "token": "<redacted>",
                    "subscription": profile.subscription,
                    "default": conn_mgr.config.default_profile.as_deref() == Some(name.as_str()),
                }),
                output_format,
                query,
            )
        }

        ProfileCommands::Remove { name } => {
            let mut config = conn_mgr.config.clone();
            if config.profiles.remove(name).is_none() {
                return Err(CtlError::ProfileNotFound { name: name.clone() });
            }
            if config.default_profile.as_deref() == Some(name.as_str()) {
                config.default_profile = None;
            }
            save(conn_mgr, &config)?;
            println!("Profile '{}' removed", name);
            Ok(())
        }

        ProfileCommands::Default { name } => {
            let mut config = conn_mgr.config.clone();
            if !config.profiles.contains_key(name) {
                return Err(CtlError::ProfileNotFound { name: name.clone() });
            }
            config.default_profile = Some(name.clone());
            save(conn_mgr, &config)?;
            println!("Default profile set to '{}'", name);
            Ok(())
        }

        ProfileCommands::Path => {
            let path = match &conn_mgr.config_path {
                Some(path) => path.clone(),
                None => Config::default_path().map_err(CtlError::from)?,
            };
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn save(conn_mgr: &ConnectionManager, config: &Config) -> CliResult<()> {
    let updated = ConnectionManager::with_config_path(config.clone(), conn_mgr.config_path.clone());
    updated.save_config()
}
