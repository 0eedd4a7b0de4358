pub mod cli;
pub mod config;
pub mod run;

pub use cli::{Cli, Commands};
pub use config::{OutputConfig, PlatoonSection, RunConfig};
pub use run::RunOutputs;
