use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hubroute", author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve the hub location model and run the configured reports
    Solve {
        /// Path to the TOML run file
        #[arg(long, short)]
        config: PathBuf,
    },
    /// Load and validate the input data without solving
    Validate {
        /// Path to the TOML run file
        #[arg(long, short)]
        config: PathBuf,
    },
}
