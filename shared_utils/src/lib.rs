//! Small helpers shared by every crate in the workspace: environment lookups
//! and TOML configuration loading.

pub mod config;
pub mod env;
