//! Expansion of corridor flow into unit trips

use crate::hub::{Corridor, RouteDecision};
use hubroute_core::{HubRouteError, HubRouteResult, LocationId};
use serde::{Deserialize, Serialize};

/// One discrete vehicle trip on a corridor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub origin: LocationId,
    pub destination: LocationId,
    pub corridor: Corridor,
    /// Distance from the origin to the first hub, inherited from the decision
    pub network_distance: f64,
    /// Synthetic departure offset; zero unless a schedule is sampled
    pub schedule_offset: f64,
}

/// Number of discrete trips needed to carry `flow`.
pub fn trip_count(flow: f64) -> usize {
    if flow <= 0.0 {
        0
    } else {
        flow.ceil() as usize
    }
}

/// Emit `ceil(flow)` trips for every decision routed through `corridor`.
///
/// Each decision on the corridor must already carry a network distance
/// (see [`crate::hub::HubSolution::enrich_with_distances`]). A corridor with
/// no matching decisions yields an empty list.
pub fn expand_trips<'a, I>(decisions: I, corridor: Corridor) -> HubRouteResult<Vec<Trip>>
where
    I: IntoIterator<Item = &'a RouteDecision>,
{
    let mut trips = Vec::new();
    for decision in decisions {
        if decision.corridor() != Some(corridor) {
            continue;
        }
        let distance = decision.network_distance.ok_or_else(|| {
            HubRouteError::data(
                "hub_distance",
                format!(
                    "no network distance for pair ({}, {}) on corridor {}",
                    decision.origin, decision.destination, corridor
                ),
            )
        })?;
        let trip = Trip {
            origin: decision.origin,
            destination: decision.destination,
            corridor,
            network_distance: distance,
            schedule_offset: 0.0,
        };
        trips.extend(std::iter::repeat(trip).take(trip_count(decision.flow)));
    }
    Ok(trips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::Route;

    fn id(v: usize) -> LocationId {
        LocationId::new(v)
    }

    fn on(k: usize, l: usize, origin: usize, flow: f64, distance: Option<f64>) -> RouteDecision {
        RouteDecision {
            origin: id(origin),
            destination: id(99),
            route: Route::ViaHubs {
                hub_from: id(k),
                hub_to: id(l),
            },
            flow,
            unit_cost: 1.0,
            network_distance: distance,
        }
    }

    #[test]
    fn test_trip_count_rounds_up() {
        assert_eq!(trip_count(0.0), 0);
        assert_eq!(trip_count(0.2), 1);
        assert_eq!(trip_count(3.0), 3);
        assert_eq!(trip_count(3.01), 4);
    }

    #[test]
    fn test_expand_filters_corridor_and_repeats() {
        let corridor = Corridor::new(id(14), id(40));
        let decisions = vec![
            on(14, 40, 1, 2.3, Some(12.0)),
            on(40, 14, 2, 5.0, Some(7.0)),
            on(14, 40, 3, 1.0, Some(3.0)),
        ];
        let trips = expand_trips(&decisions, corridor).unwrap();
        assert_eq!(trips.len(), 4);
        assert_eq!(trips.iter().filter(|t| t.network_distance == 12.0).count(), 3);
        assert!(trips.iter().all(|t| t.corridor == corridor && t.schedule_offset == 0.0));
    }

    #[test]
    fn test_empty_corridor_yields_no_trips() {
        let decisions = vec![on(14, 40, 1, 2.0, Some(1.0))];
        let trips = expand_trips(&decisions, Corridor::new(id(1), id(6))).unwrap();
        assert!(trips.is_empty());
    }

    #[test]
    fn test_missing_distance_is_data_error() {
        let decisions = vec![on(14, 40, 1, 2.0, None)];
        let err = expand_trips(&decisions, Corridor::new(id(14), id(40))).unwrap_err();
        assert!(matches!(err, HubRouteError::DataIntegrity { .. }));
    }
}
