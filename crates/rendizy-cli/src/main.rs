//! Rendizy draft tooling entry point.
//!
//! Binary name: `rdz`
//!
//! Parses CLI arguments, loads configuration and the local draft store, then
//! dispatches to the command handler.

mod cli;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,rendizy=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Draft { command } => {
            let state = AppState::init().await?;
            cli::draft::handle_draft_command(command, &state, cli.json).await?;
        }
        Commands::Wizard { command } => {
            cli::wizard::handle_wizard_command(command, cli.json)?;
        }
    }

    Ok(())
}
