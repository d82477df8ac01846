//! Connection management for the Nimbus management client

use anyhow::Context;
use nimbus_mgmt::MgmtClient;
use nimbusctl_core::Config;
use nimbusctl_core::config::{CredentialStore, default_api_url};
use tracing::{debug, info};

use crate::error::Result as CliResult;

/// User agent string for nimbusctl HTTP requests
const NIMBUSCTL_USER_AGENT: &str = concat!("nimbusctl/", env!("CARGO_PKG_VERSION"));

/// Connection manager for creating authenticated clients
#[derive(Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<std::path::PathBuf>,
}

impl ConnectionManager {
    /// Create a new connection manager with the given configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Create a new connection manager with a custom config path
    pub fn with_config_path(config: Config, config_path: Option<std::path::PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> CliResult<()> {
        if let Some(ref path) = self.config_path {
            self.config
                .save_to_path(path)
                .context("Failed to save configuration")?;
        } else {
            self.config.save().context("Failed to save configuration")?;
        }
        Ok(())
    }

    /// When --config-file is explicitly specified, environment variables are
    /// ignored to provide true configuration isolation ("explicit wins":
    /// CLI args > env vars > defaults).
    fn use_env_vars(&self) -> bool {
        let use_env = self.config_path.is_none();
        if !use_env {
            info!("--config-file specified explicitly, ignoring environment variables");
        }
        use_env
    }

    /// Create a management client from profile credentials with environment
    /// variable override support.
    pub fn create_client(&self, profile_name: Option<&str>) -> CliResult<MgmtClient> {
        debug!("Creating Nimbus management client");

        let use_env_vars = self.use_env_vars();
        let env_api_url = if use_env_vars {
            std::env::var("NIMBUS_API_URL").ok()
        } else {
            None
        };
        let env_token = if use_env_vars {
            std::env::var("NIMBUS_TOKEN").ok()
        } else {
            None
        };
        let env_subscription = if use_env_vars {
            std::env::var("NIMBUS_SUBSCRIPTION").ok()
        } else {
            None
        };

        let (api_url, token, subscription, source) =
            if let (Some(token), Some(subscription)) = (&env_token, &env_subscription) {
                // Environment variables provide complete credentials
                let url = env_api_url.clone().unwrap_or_else(default_api_url);
                (
                    url,
                    token.clone(),
                    subscription.clone(),
                    "environment".to_string(),
                )
            } else {
                let resolved = self.config.resolve_credentials(profile_name)?;
                // Allow partial environment variable overrides
                (
                    env_api_url.unwrap_or(resolved.api_url),
                    env_token.unwrap_or(resolved.token),
                    env_subscription.unwrap_or(resolved.subscription),
                    format!("profile '{}'", resolved.profile),
                )
            };

        info!("Connecting to Nimbus management plane: {} ({})", api_url, source);

        let client = MgmtClient::builder()
            .base_url(&api_url)
            .token(&token)
            .subscription(&subscription)
            .user_agent(NIMBUSCTL_USER_AGENT)
            .build()?;

        debug!("Nimbus management client created successfully");
        Ok(client)
    }

    /// Resolve only the subscription scope, without requiring a usable token.
    ///
    /// The local gateway edits need it for placeholder child ids but never
    /// talk to the service.
    pub fn subscription(&self, profile_name: Option<&str>) -> CliResult<String> {
        if self.use_env_vars()
            && let Ok(subscription) = std::env::var("NIMBUS_SUBSCRIPTION")
        {
            return Ok(subscription);
        }

        let profile_name = self.config.resolve_profile(profile_name)?;
        let profile = &self.config.profiles[profile_name];
        let subscription = CredentialStore::new()
            .resolve(&profile.subscription)
            .map_err(crate::error::CtlError::from)?;
        Ok(subscription)
    }
}
