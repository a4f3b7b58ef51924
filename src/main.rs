//! Keyhold - browser password manager
//!
//! Main entry point for the native messaging host and the vault CLI.

mod cli;
mod cmd_vault;
mod host;
mod server;

use clap::Parser;
use tracing::warn;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, defaulted) = server::load_config(cli.config.as_deref())?;
    server::init_tracing(&config)?;
    if defaulted {
        warn!("No configuration file found, using defaults");
    }
    server::check_config(&config)?;

    match cli.command {
        None | Some(Commands::Serve) => server::run_host(&config, &cli.caller).await,
        Some(command) => cmd_vault::handle_vault_command(command, &config).await,
    }
}
