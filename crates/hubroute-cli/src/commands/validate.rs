//! `hubroute validate`: check a run file and its data without solving

use anyhow::{bail, Context, Result};
use hubroute_algo::Corridor;
use hubroute_cli::RunConfig;
use hubroute_io::load_network;
use std::path::Path;
use tracing::info;

pub fn handle(config_path: &Path) -> Result<()> {
    let config = RunConfig::load(config_path)?;
    config.model.validate().context("invalid [model] section")?;
    config.solver.validate().context("invalid [solver] section")?;
    config.check_platoon_corridor()?;

    let network = load_network(&config.data).context("loading network data")?;
    network
        .validate(&config.model.hub_candidates)
        .context("network data failed validation")?;

    if let Some(platoon) = &config.platoon {
        // Grouping settings do not depend on which corridor is analysed.
        if let Some(&hub) = config.model.hub_candidates.first() {
            let corridor = platoon.corridor.unwrap_or(Corridor::new(hub, hub));
            platoon
                .for_corridor(corridor)
                .validate()
                .context("invalid [platoon] section")?;
        }
        if network.hub_distances().is_none() {
            bail!("[platoon] needs data.hub_distances");
        }
    }

    let total_flow = network.total_flow()?;
    info!(
        locations = network.num_locations(),
        hub_candidates = config.model.hub_candidates.len(),
        total_flow,
        "run file is valid"
    );
    println!(
        "OK: {} locations, {} hub candidates, total flow {:.2}",
        network.num_locations(),
        config.model.hub_candidates.len(),
        total_flow
    );
    Ok(())
}
