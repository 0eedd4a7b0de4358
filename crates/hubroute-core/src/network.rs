//! Immutable input for one hub location run

use crate::{HubRouteError, HubRouteResult, LocationId, LocationMatrix};
use std::collections::HashSet;

/// Locations plus the cost, flow and side tables referenced by the model.
///
/// Loaded once per run and never mutated afterwards. When no dedicated
/// inter-hub cost table is supplied the fuel cost matrix doubles as the
/// inter-hub table.
#[derive(Debug, Clone)]
pub struct NetworkData {
    locations: Vec<LocationId>,
    costs: LocationMatrix,
    flows: LocationMatrix,
    inter_hub_costs: Option<LocationMatrix>,
    hub_distances: Option<LocationMatrix>,
}

impl NetworkData {
    pub fn new(locations: Vec<LocationId>, costs: LocationMatrix, flows: LocationMatrix) -> Self {
        Self {
            locations,
            costs,
            flows,
            inter_hub_costs: None,
            hub_distances: None,
        }
    }

    /// Use a dedicated table for hub-to-hub legs.
    pub fn with_inter_hub_costs(mut self, matrix: LocationMatrix) -> Self {
        self.inter_hub_costs = Some(matrix);
        self
    }

    /// Attach the per-(origin, hub) network distance side table.
    pub fn with_hub_distances(mut self, matrix: LocationMatrix) -> Self {
        self.hub_distances = Some(matrix);
        self
    }

    pub fn locations(&self) -> &[LocationId] {
        &self.locations
    }

    pub fn num_locations(&self) -> usize {
        self.locations.len()
    }

    pub fn costs(&self) -> &LocationMatrix {
        &self.costs
    }

    pub fn flows(&self) -> &LocationMatrix {
        &self.flows
    }

    pub fn hub_distances(&self) -> Option<&LocationMatrix> {
        self.hub_distances.as_ref()
    }

    /// Fuel cost of the leg `origin -> destination`.
    pub fn cost(&self, origin: LocationId, destination: LocationId) -> HubRouteResult<f64> {
        self.costs.try_get(origin, destination)
    }

    /// Flow volume to route from `origin` to `destination`.
    pub fn flow(&self, origin: LocationId, destination: LocationId) -> HubRouteResult<f64> {
        self.flows.try_get(origin, destination)
    }

    /// Undiscounted cost of the hub-to-hub leg `from -> to`.
    pub fn inter_hub_cost(&self, from: LocationId, to: LocationId) -> HubRouteResult<f64> {
        match &self.inter_hub_costs {
            Some(matrix) => matrix.try_get(from, to),
            None => self.costs.try_get(from, to),
        }
    }

    /// Total flow over every ordered location pair.
    pub fn total_flow(&self) -> HubRouteResult<f64> {
        let mut total = 0.0;
        for &i in &self.locations {
            for &j in &self.locations {
                total += self.flow(i, j)?;
            }
        }
        Ok(total)
    }

    /// Fail fast on anything the model would otherwise have to guess.
    ///
    /// Checks that the location set is non-empty and unique, that every hub
    /// candidate is a known location, and that every cost, flow and
    /// inter-hub entry the formulation references is present, finite and
    /// nonnegative.
    pub fn validate(&self, hub_candidates: &[LocationId]) -> HubRouteResult<()> {
        if self.locations.is_empty() {
            return Err(HubRouteError::ModelConstruction(
                "location set is empty".into(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.locations.len());
        for id in &self.locations {
            if !seen.insert(*id) {
                return Err(HubRouteError::ModelConstruction(format!(
                    "location {} listed twice",
                    id
                )));
            }
        }

        if hub_candidates.is_empty() {
            return Err(HubRouteError::ModelConstruction(
                "hub candidate set is empty".into(),
            ));
        }
        let mut hub_seen = HashSet::with_capacity(hub_candidates.len());
        for hub in hub_candidates {
            if !seen.contains(hub) {
                return Err(HubRouteError::ModelConstruction(format!(
                    "hub candidate {} is outside the location set",
                    hub
                )));
            }
            if !hub_seen.insert(*hub) {
                return Err(HubRouteError::ModelConstruction(format!(
                    "hub candidate {} listed twice",
                    hub
                )));
            }
        }

        for matrix in [&self.costs, &self.flows] {
            if let Some(missing) = self.locations.iter().find(|id| !matrix.contains(**id)) {
                return Err(HubRouteError::data(
                    matrix.name(),
                    format!("no row/column for location {}", missing),
                ));
            }
        }

        self.costs.check_block(&self.locations, &self.locations)?;
        self.flows.check_block(&self.locations, &self.locations)?;
        if let Some(inter) = &self.inter_hub_costs {
            inter.check_block(hub_candidates, hub_candidates)?;
        }
        Ok(())
    }
}
