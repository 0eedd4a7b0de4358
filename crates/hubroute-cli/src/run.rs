//! Solve pipeline shared by `hubroute solve` and its tests
//!
//! Every table is computed before any file is written, so a failing stage
//! leaves the output directory untouched.

use crate::RunConfig;
use anyhow::{anyhow, Context, Result};
use hubroute_algo::{
    analyze_corridor, corridor_table, empty_mileage, solve_hub_location, CorridorTableRow,
    EmptyMileageReport, HubSolution, PlatoonReport,
};
use hubroute_io::{load_network, write_corridor_table, write_empty_mileage, write_route_decisions};
use std::fs;
use std::path::Path;
use tracing::info;

/// Everything a run produces, held in memory until it is written.
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub solution: HubSolution,
    pub empty_mileage: Option<EmptyMileageReport>,
    pub platoon: Option<PlatoonReport>,
    pub corridor_table: Option<Vec<CorridorTableRow>>,
}

/// Load, solve, and analyse without touching the output paths.
pub fn compute(config: &RunConfig) -> Result<RunOutputs> {
    config.check_platoon_corridor()?;
    let network = load_network(&config.data).context("loading network data")?;

    let mut solution = solve_hub_location(&network, &config.model, &config.solver)
        .context("solving hub location model")?;
    if let Some(distances) = network.hub_distances() {
        solution
            .enrich_with_distances(distances)
            .context("attaching hub distances")?;
    }

    let mileage = match &config.output.empty_mileage {
        Some(_) => {
            let report = empty_mileage(&solution.decisions, config.output.empty_mileage_corridor)
                .context("building empty-mileage report")?;
            info!(rows = report.rows.len(), total = report.total, "empty mileage");
            Some(report)
        }
        None => None,
    };

    let Some(section) = &config.platoon else {
        return Ok(RunOutputs {
            solution,
            empty_mileage: mileage,
            platoon: None,
            corridor_table: None,
        });
    };
    let corridor = match section.corridor {
        Some(corridor) => corridor,
        None => {
            let (busiest, flow) = solution
                .corridor_flows()
                .first()
                .copied()
                .ok_or_else(|| anyhow!("no flow is routed through hubs; nothing to group"))?;
            info!(corridor = %busiest, flow, "analysing busiest corridor");
            busiest
        }
    };

    let report = analyze_corridor(&solution.decisions, &section.for_corridor(corridor))
        .with_context(|| format!("platoon analysis on corridor {}", corridor))?;
    let table = match &config.output.corridor_table {
        Some(_) => Some(
            corridor_table(&solution.decisions, &report)
                .with_context(|| format!("building corridor table for {}", corridor))?,
        ),
        None => None,
    };

    Ok(RunOutputs {
        solution,
        empty_mileage: mileage,
        platoon: Some(report),
        corridor_table: table,
    })
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    Ok(())
}

/// Write each table whose output path is configured.
pub fn write_outputs(config: &RunConfig, outputs: &RunOutputs) -> Result<()> {
    if let Some(path) = &config.output.route_decisions {
        ensure_parent(path)?;
        write_route_decisions(path, &outputs.solution)
            .with_context(|| format!("writing route decisions to {}", path.display()))?;
    }
    if let (Some(path), Some(report)) = (&config.output.empty_mileage, &outputs.empty_mileage) {
        ensure_parent(path)?;
        write_empty_mileage(path, report)
            .with_context(|| format!("writing empty mileage to {}", path.display()))?;
    }
    if let (Some(path), Some(rows)) = (&config.output.corridor_table, &outputs.corridor_table) {
        ensure_parent(path)?;
        write_corridor_table(path, rows)
            .with_context(|| format!("writing corridor table to {}", path.display()))?;
    }
    Ok(())
}

pub fn execute(config: &RunConfig) -> Result<RunOutputs> {
    let outputs = compute(config)?;
    write_outputs(config, &outputs)?;
    Ok(outputs)
}
