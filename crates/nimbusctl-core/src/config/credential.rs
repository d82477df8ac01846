//! Credential indirection.
//!
//! Profile fields may hold the secret itself, an `env:VAR` reference that is
//! resolved at use time, or a value with `${VAR}` placeholders expanded
//! through `shellexpand`. Nothing is cached; every resolution reads the
//! current environment.

use super::error::{ConfigError, Result};

/// Prefix that indicates a value should be read from an environment variable.
const ENV_PREFIX: &str = "env:";

/// Resolves profile values into usable credentials.
#[derive(Debug, Default)]
pub struct CredentialStore;

impl CredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a stored value.
    pub fn resolve(&self, value: &str) -> Result<String> {
        if let Some(var) = value.strip_prefix(ENV_PREFIX) {
            return std::env::var(var).map_err(|_| {
                ConfigError::CredentialError(format!(
                    "environment variable '{var}' referenced by the profile is not set"
                ))
            });
        }

        shellexpand::env(value)
            .map(|expanded| expanded.into_owned())
            .map_err(|e| ConfigError::EnvExpansionError(e.to_string()))
    }
}
