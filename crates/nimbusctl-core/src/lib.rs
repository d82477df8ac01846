//! # nimbusctl-core
//!
//! Shared configuration layer for the Nimbus CLI: named profiles stored in a
//! TOML file, credential indirection, and the resolution rules the binary
//! relies on.

pub mod config;

pub use config::{Config, ConfigError, Profile, ResolvedCredentials};
