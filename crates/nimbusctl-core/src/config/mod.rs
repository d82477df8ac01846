//! Configuration management for the Nimbus CLI.

#[allow(clippy::module_inception)]
mod config;
mod credential;
mod error;

pub use config::{Config, Profile, ResolvedCredentials, default_api_url};
pub use credential::CredentialStore;
pub use error::{ConfigError, Result};
