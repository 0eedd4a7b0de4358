//! `hubroute solve`: full pipeline from matrices to result tables

use anyhow::Result;
use hubroute_cli::{run, RunConfig};
use std::path::Path;

pub fn handle(config_path: &Path) -> Result<()> {
    let config = RunConfig::load(config_path)?;
    let outputs = run::execute(&config)?;
    println!("{}", outputs.solution.summary());
    if let Some(report) = &outputs.platoon {
        println!("{}", report.summary());
    }
    Ok(())
}
