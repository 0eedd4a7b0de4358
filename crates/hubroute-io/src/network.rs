//! Network loading from a set of matrix files

use crate::read_location_matrix;
use hubroute_core::{HubRouteResult, NetworkData};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

/// Locations of the matrix files that make up one network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPaths {
    /// Fuel cost matrix; its ids define the location set
    pub costs: PathBuf,
    pub flows: PathBuf,
    /// Inter-hub cost matrix; the cost matrix is used when absent
    #[serde(default)]
    pub inter_hub_costs: Option<PathBuf>,
    /// Origin-to-hub network distances for platoon analysis
    #[serde(default)]
    pub hub_distances: Option<PathBuf>,
}

/// Read every configured matrix into a [`NetworkData`].
///
/// The result is not validated; call [`NetworkData::validate`] with the
/// hub candidates before building a model.
pub fn load_network(paths: &NetworkPaths) -> HubRouteResult<NetworkData> {
    let costs = read_location_matrix(&paths.costs, "cost")?;
    let flows = read_location_matrix(&paths.flows, "flow")?;
    let locations = costs.ids().to_vec();
    let mut network = NetworkData::new(locations, costs, flows);

    if let Some(path) = &paths.inter_hub_costs {
        network = network.with_inter_hub_costs(read_location_matrix(path, "inter_hub_cost")?);
    }
    if let Some(path) = &paths.hub_distances {
        network = network.with_hub_distances(read_location_matrix(path, "hub_distance")?);
    }

    info!(
        locations = network.num_locations(),
        inter_hub = paths.inter_hub_costs.is_some(),
        hub_distances = paths.hub_distances.is_some(),
        "loaded network"
    );
    Ok(network)
}
