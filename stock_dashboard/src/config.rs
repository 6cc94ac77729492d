//! `stock-dashboard.toml`.
//!
//! ```toml
//! [engine]
//! min_bars = 40
//! fib_lookback = 250
//!
//! [provider]
//! kind = "yahoo"            # yahoo | alpaca | json_file
//! requests_per_second = 2
//!
//! [access]
//! passphrase_env = "DASHBOARD_SECRET"
//!
//! [notify]
//! webhook_url = "https://hooks.example.com/scan"
//! ```
//!
//! Every key is optional. Secrets never live in this file, only the names of
//! the environment variables holding them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shared_utils::config::load_toml;
use signal_engine::EngineConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub provider: ProviderConfig,
    pub access: AccessConfig,
    pub notify: NotifyConfig,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        load_toml(path).context("could not load dashboard configuration")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    Alpaca,
    JsonFile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    /// Pacing for the Yahoo chart endpoint.
    pub requests_per_second: u32,
    /// Overrides the Yahoo chart endpoint.
    pub base_url: Option<String>,
    /// Directory read by the `json_file` provider.
    pub data_dir: PathBuf,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            requests_per_second: 2,
            base_url: None,
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    /// Name of the env var holding the shared passphrase. Unset disables the gate.
    pub passphrase_env: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotifyConfig {
    /// Scan results are POSTed here; stdout is used when unset.
    pub webhook_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            timeout_secs: 10,
        }
    }
}
