//! TOML run file
//!
//! ```toml
//! [data]
//! costs = "cost.csv"
//! flows = "flow.csv"
//! hub_distances = "hub_distance.csv"
//!
//! [model]
//! hub_candidates = [14, 40, 44]
//! max_hubs = 2
//! inter_hub_discount = 0.744
//!
//! [solver]
//! solver = "microlp"
//! time_limit_seconds = 600
//!
//! [platoon]
//! corridor = { hub_from = 14, hub_to = 40 }
//! grouping_key = "network_distance"
//!
//! [output]
//! route_decisions = "out/decisions.csv"
//! corridor_table = "out/corridor.csv"
//! ```
//!
//! Relative paths are resolved against the directory of the run file.

use anyhow::{bail, Context, Result};
use hubroute_algo::platoon::DEFAULT_PLATOON_SIZE;
use hubroute_algo::{
    Corridor, GroupingKey, HubModelConfig, MilpSolverConfig, PlatoonConfig, TriangularSchedule,
};
use hubroute_io::NetworkPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub data: NetworkPaths,
    pub model: HubModelConfig,
    #[serde(default)]
    pub solver: MilpSolverConfig,
    /// Platoon analysis is skipped when the section is absent
    #[serde(default)]
    pub platoon: Option<PlatoonSection>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[platoon]` section. Without a corridor the busiest corridor of the
/// solution is analysed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatoonSection {
    #[serde(default)]
    pub corridor: Option<Corridor>,
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    #[serde(default)]
    pub grouping_key: GroupingKey,
    #[serde(default)]
    pub schedule: Option<TriangularSchedule>,
}

fn default_group_size() -> usize {
    DEFAULT_PLATOON_SIZE
}

impl PlatoonSection {
    pub fn for_corridor(&self, corridor: Corridor) -> PlatoonConfig {
        PlatoonConfig {
            corridor,
            group_size: self.group_size,
            grouping_key: self.grouping_key,
            schedule: self.schedule,
        }
    }
}

/// Result files; each table is written only when its path is set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub route_decisions: Option<PathBuf>,
    #[serde(default)]
    pub corridor_table: Option<PathBuf>,
    #[serde(default)]
    pub empty_mileage: Option<PathBuf>,
    /// Restrict the empty-mileage table to one corridor
    #[serde(default)]
    pub empty_mileage_corridor: Option<Corridor>,
}

fn resolve(base: &Path, path: &mut PathBuf) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

impl RunConfig {
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("parsing run file")
    }

    /// Read a run file and resolve its relative paths.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading run file {}", path.display()))?;
        let mut config = Self::from_toml(&contents)
            .with_context(|| format!("in run file {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        Ok(config)
    }

    /// Reject a configured platoon corridor that uses a non-candidate hub.
    pub fn check_platoon_corridor(&self) -> Result<()> {
        let Some(corridor) = self.platoon.as_ref().and_then(|p| p.corridor) else {
            return Ok(());
        };
        for hub in [corridor.hub_from, corridor.hub_to] {
            if !self.model.hub_candidates.contains(&hub) {
                bail!(
                    "platoon corridor {} uses {} which is not a hub candidate",
                    corridor,
                    hub
                );
            }
        }
        Ok(())
    }

    pub fn resolve_paths(&mut self, base: &Path) {
        resolve(base, &mut self.data.costs);
        resolve(base, &mut self.data.flows);
        let optional = [
            &mut self.data.inter_hub_costs,
            &mut self.data.hub_distances,
            &mut self.output.route_decisions,
            &mut self.output.corridor_table,
            &mut self.output.empty_mileage,
        ];
        for path in optional.into_iter().flatten() {
            resolve(base, path);
        }
    }
}
