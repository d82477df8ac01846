//! Profile configuration stored in TOML.
//!
//! One file, many named profiles; a profile names the management endpoint,
//! the bearer token, and the subscription scope every request is issued
//! under.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};

/// Endpoint used when a profile does not name one.
pub fn default_api_url() -> String {
    "https://management.nimbus.cloud".to_string()
}

/// Main configuration structure.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is named on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// Individual profile configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    /// Management-plane endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token; supports the `env:VAR` indirection.
    pub token: String,
    /// Subscription scope; supports the `env:VAR` indirection.
    pub subscription: String,
}

/// A profile with all credential indirection resolved.
#[derive(Debug, Clone)]
pub struct ResolvedCredentials {
    pub profile: String,
    pub api_url: String,
    pub token: String,
    pub subscription: String,
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("cloud", "nimbus", "nimbusctl")
            .ok_or(ConfigError::ConfigDirError)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load from the default location; a missing file yields the default
    /// (empty) configuration.
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::default_path()?)
    }

    /// Load from an explicit path; a missing file yields the default
    /// configuration so first runs do not fail.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::default_path()?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::SaveError {
                path: path.display().to_string(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::SaveError {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve which profile a command should use.
    ///
    /// An explicitly named profile must exist. Otherwise the configured
    /// default wins, then the alphabetically first profile.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<&str> {
        if let Some(name) = name {
            return self
                .profiles
                .get_key_value(name)
                .map(|(key, _)| key.as_str())
                .ok_or_else(|| ConfigError::ProfileNotFound {
                    name: name.to_string(),
                });
        }

        if let Some(default) = &self.default_profile {
            return self
                .profiles
                .get_key_value(default)
                .map(|(key, _)| key.as_str())
                .ok_or_else(|| ConfigError::ProfileNotFound {
                    name: default.clone(),
                });
        }

        let mut names: Vec<_> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names.first().copied().ok_or(ConfigError::NoProfileConfigured)
    }

    /// Resolve a profile and its credentials in one step.
    pub fn resolve_credentials(&self, name: Option<&str>) -> Result<ResolvedCredentials> {
        let profile_name = self.resolve_profile(name)?.to_string();
        let profile = &self.profiles[&profile_name];
        let store = CredentialStore::new();
        Ok(ResolvedCredentials {
            api_url: store.resolve(&profile.api_url)?,
            token: store.resolve(&profile.token)?,
            subscription: store.resolve(&profile.subscription)?,
            profile: profile_name,
        })
    }
}
