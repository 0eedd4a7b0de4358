//! Hub location solution data structures
//!
//! Defines the routing decisions extracted from a solved model.

use super::ModelStats;
use hubroute_core::{HubRouteError, HubRouteResult, LocationId, LocationMatrix};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

/// Ordered hub pair (k, l) that hub-routed flow travels through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Corridor {
    pub hub_from: LocationId,
    pub hub_to: LocationId,
}

impl Corridor {
    pub fn new(hub_from: LocationId, hub_to: LocationId) -> Self {
        Self { hub_from, hub_to }
    }
}

impl fmt::Display for Corridor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.hub_from, self.hub_to)
    }
}

/// Routing mode chosen for one (origin, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum Route {
    Direct,
    ViaHubs {
        hub_from: LocationId,
        hub_to: LocationId,
    },
}

impl Route {
    pub fn corridor(&self) -> Option<Corridor> {
        match *self {
            Route::Direct => None,
            Route::ViaHubs { hub_from, hub_to } => Some(Corridor::new(hub_from, hub_to)),
        }
    }
}

/// One extracted routing decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDecision {
    pub origin: LocationId,
    pub destination: LocationId,
    pub route: Route,
    /// Flow volume from the flow matrix
    pub flow: f64,
    /// Per-unit fuel cost of the chosen route (α already applied)
    pub unit_cost: f64,
    /// Distance from the origin to the first hub, when enriched
    #[serde(default)]
    pub network_distance: Option<f64>,
}

impl RouteDecision {
    /// Fuel cost contributed to the objective.
    pub fn cost(&self) -> f64 {
        self.flow * self.unit_cost
    }

    pub fn is_hub_routed(&self) -> bool {
        matches!(self.route, Route::ViaHubs { .. })
    }

    pub fn corridor(&self) -> Option<Corridor> {
        self.route.corridor()
    }
}

/// Complete solution to a hub location problem
#[derive(Debug, Clone)]
pub struct HubSolution {
    /// Objective value of the accepted assignment
    pub objective: f64,
    /// Hubs opened by the solver
    pub open_hubs: BTreeSet<LocationId>,
    /// One decision per ordered (origin, destination) pair
    pub decisions: Vec<RouteDecision>,
    /// Name of the backend that produced the assignment
    pub solver: String,
    pub solve_time: Duration,
    pub model_stats: ModelStats,
}

impl HubSolution {
    pub fn hubs_opened(&self) -> usize {
        self.open_hubs.len()
    }

    /// Decisions routed through some hub pair.
    pub fn hub_routed(&self) -> impl Iterator<Item = &RouteDecision> {
        self.decisions.iter().filter(|d| d.is_hub_routed())
    }

    /// Decisions routed through `corridor`.
    pub fn decisions_on(&self, corridor: Corridor) -> Vec<&RouteDecision> {
        self.decisions
            .iter()
            .filter(|d| d.corridor() == Some(corridor))
            .collect()
    }

    pub fn direct_cost(&self) -> f64 {
        self.decisions
            .iter()
            .filter(|d| !d.is_hub_routed())
            .map(RouteDecision::cost)
            .sum()
    }

    pub fn hub_cost(&self) -> f64 {
        self.hub_routed().map(RouteDecision::cost).sum()
    }

    pub fn total_flow(&self) -> f64 {
        self.decisions.iter().map(|d| d.flow).sum()
    }

    /// Flow carried by each used corridor, largest first.
    pub fn corridor_flows(&self) -> Vec<(Corridor, f64)> {
        let mut totals: HashMap<Corridor, f64> = HashMap::new();
        for decision in self.hub_routed() {
            if let Some(corridor) = decision.corridor() {
                *totals.entry(corridor).or_insert(0.0) += decision.flow;
            }
        }
        let mut ranked: Vec<_> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
    }

    /// Attach the (origin, hub_from) network distance to every hub-routed
    /// decision. A missing entry is a data-integrity error.
    pub fn enrich_with_distances(&mut self, distances: &LocationMatrix) -> HubRouteResult<()> {
        for decision in &mut self.decisions {
            if let Route::ViaHubs { hub_from, .. } = decision.route {
                let distance = distances.try_get(decision.origin, hub_from)?;
                if !distance.is_finite() {
                    return Err(HubRouteError::data(
                        distances.name(),
                        format!(
                            "distance ({}, {}) = {} is not finite",
                            decision.origin, hub_from, distance
                        ),
                    ));
                }
                decision.network_distance = Some(distance);
            }
        }
        Ok(())
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Hub Location Solution\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Solver: {}\n", self.solver));
        s.push_str(&format!("Objective: {:.4}\n", self.objective));
        s.push_str(&format!("  Direct: {:.4}\n", self.direct_cost()));
        s.push_str(&format!("  Via hubs: {:.4}\n", self.hub_cost()));
        let hubs: Vec<String> = self.open_hubs.iter().map(|h| h.to_string()).collect();
        s.push_str(&format!(
            "Open hubs ({}): {}\n",
            self.hubs_opened(),
            hubs.join(", ")
        ));
        s.push_str(&format!(
            "Hub-routed pairs: {} of {}\n",
            self.hub_routed().count(),
            self.decisions.len()
        ));
        s.push_str(&format!(
            "Model: {} variables, {} constraints\n",
            self.model_stats.num_variables, self.model_stats.num_constraints
        ));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        let corridors = self.corridor_flows();
        if !corridors.is_empty() {
            s.push_str("\nCorridors by flow:\n");
            for (corridor, flow) in corridors {
                s.push_str(&format!("  [{}] {:.2}\n", corridor, flow));
            }
        }
        s
    }
}
