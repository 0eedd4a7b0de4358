//! Solution extraction
//!
//! Turns a raw assignment into one [`RouteDecision`] per ordered pair using
//! the model's index tables. Values near 0 or 1 are accepted as integral;
//! anything in between is an anomaly and is reported, never rounded.

use super::{HubLocationModel, HubSolution, RawAssignment, Route, RouteDecision, VarKind};
use hubroute_core::{HubRouteError, HubRouteResult, LocationId};
use std::collections::BTreeSet;
use tracing::debug;

/// Classify a variable value as selected / unselected.
fn is_selected(kind: VarKind, value: f64, tolerance: f64) -> HubRouteResult<bool> {
    if value.is_finite() {
        if value <= tolerance {
            return Ok(false);
        }
        if value >= 1.0 - tolerance {
            return Ok(true);
        }
    }
    Err(HubRouteError::ExtractionAnomaly {
        variable: kind.to_string(),
        value,
    })
}

/// Build a [`HubSolution`] from a raw assignment.
///
/// Fails when a value is fractional, when a pair has zero or several
/// selected routing modes, when a hub route uses a closed hub, or when more
/// hubs are open than the budget allows.
pub fn extract_solution(
    model: &HubLocationModel,
    raw: &RawAssignment,
    solver: &str,
    tolerance: f64,
) -> HubRouteResult<HubSolution> {
    let values = &raw.values;
    if values.len() != model.variables().len() {
        return Err(HubRouteError::Extraction(format!(
            "assignment has {} values for {} variables",
            values.len(),
            model.variables().len()
        )));
    }
    let value_of = |kind: VarKind, var: super::VarId| is_selected(kind, values[var.index()], tolerance);

    let mut open_hubs = BTreeSet::new();
    for &(hub, var) in model.open_vars() {
        if value_of(VarKind::Open(hub), var)? {
            open_hubs.insert(hub);
        }
    }
    let budget = model.config().max_hubs;
    if open_hubs.len() > budget {
        return Err(HubRouteError::Extraction(format!(
            "{} hubs open, budget is {}",
            open_hubs.len(),
            budget
        )));
    }

    let mut decisions = Vec::with_capacity(model.pairs().len());
    for pair in model.pairs() {
        let (i, j) = (pair.origin, pair.destination);
        let mut chosen: Vec<(Route, f64)> = Vec::with_capacity(1);

        if value_of(VarKind::Direct(i, j), pair.direct)? {
            chosen.push((Route::Direct, pair.direct_unit_cost));
        }
        for column in &pair.via {
            let (k, l) = (column.hub_from, column.hub_to);
            if value_of(VarKind::ViaHubs(i, j, k, l), column.var)? {
                check_gate(&open_hubs, i, j, k)?;
                check_gate(&open_hubs, i, j, l)?;
                chosen.push((
                    Route::ViaHubs {
                        hub_from: k,
                        hub_to: l,
                    },
                    column.unit_cost,
                ));
            }
        }

        if chosen.len() != 1 {
            return Err(HubRouteError::Extraction(format!(
                "pair ({}, {}) has {} selected routing modes, expected exactly one",
                i,
                j,
                chosen.len()
            )));
        }
        let (route, unit_cost) = chosen[0];
        decisions.push(RouteDecision {
            origin: i,
            destination: j,
            route,
            flow: pair.flow,
            unit_cost,
            network_distance: None,
        });
    }

    debug!(
        decisions = decisions.len(),
        hub_routed = decisions.iter().filter(|d| d.is_hub_routed()).count(),
        "extracted route decisions"
    );

    Ok(HubSolution {
        objective: raw.objective,
        open_hubs,
        decisions,
        solver: solver.to_string(),
        solve_time: raw.solve_time,
        model_stats: model.stats(),
    })
}

fn check_gate(
    open_hubs: &BTreeSet<LocationId>,
    origin: LocationId,
    destination: LocationId,
    hub: LocationId,
) -> HubRouteResult<()> {
    if open_hubs.contains(&hub) {
        Ok(())
    } else {
        Err(HubRouteError::Extraction(format!(
            "pair ({}, {}) is routed through hub {} which is not open",
            origin, destination, hub
        )))
    }
}
