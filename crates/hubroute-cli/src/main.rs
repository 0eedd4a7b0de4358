use anyhow::{Context, Result};
use clap::Parser;
use hubroute_cli::{Cli, Commands};
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match &cli.command {
        Commands::Solve { config } => commands::solve::handle(config),
        Commands::Validate { config } => commands::validate::handle(config),
    }
}
