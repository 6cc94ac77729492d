pub mod access;
pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod notify;
pub mod providers;
pub mod report;

use anyhow::Context as _;
use secrecy::SecretString;

use crate::{
    cli::{Cli, Commands},
    commands::Context,
    config::AppConfig,
    providers::build_provider,
};

/// Loads config, passes the access gate, then runs the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let passphrase = cli.passphrase.map(SecretString::from);
    access::check(&config.access, passphrase.as_ref())?;

    let provider = build_provider(&config.provider).context("could not set up the market data provider")?;
    let ctx = Context {
        config: &config,
        provider: provider.as_ref(),
    };

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(&ctx, args).await,
        Commands::Scan(args) => commands::scan::run(&ctx, args).await,
    }
}
