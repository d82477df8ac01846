//! Command implementations, one module per service group.

pub mod batch;
pub mod compute;
pub mod network;
pub mod profile;
pub mod utils;
