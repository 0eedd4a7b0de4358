//! Tabular corridor reports

use super::{trip_count, PlatoonReport};
use crate::hub::{Corridor, RouteDecision};
use hubroute_core::{HubRouteError, HubRouteResult, LocationId};
use serde::Serialize;

/// Trip mileage of one hub-routed decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MileageRow {
    pub origin: LocationId,
    pub destination: LocationId,
    pub hub_from: LocationId,
    pub hub_to: LocationId,
    pub trip_count: usize,
    pub network_distance: f64,
    /// trip_count × network_distance
    pub trip_distance: f64,
}

impl MileageRow {
    fn from_decision(decision: &RouteDecision) -> HubRouteResult<Option<Self>> {
        let Some(corridor) = decision.corridor() else {
            return Ok(None);
        };
        let distance = decision.network_distance.ok_or_else(|| {
            HubRouteError::data(
                "hub_distance",
                format!(
                    "no network distance for pair ({}, {})",
                    decision.origin, decision.destination
                ),
            )
        })?;
        let trips = trip_count(decision.flow);
        Ok(Some(Self {
            origin: decision.origin,
            destination: decision.destination,
            hub_from: corridor.hub_from,
            hub_to: corridor.hub_to,
            trip_count: trips,
            network_distance: distance,
            trip_distance: trips as f64 * distance,
        }))
    }
}

/// Distance driven from origins to their first hub.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyMileageReport {
    pub rows: Vec<MileageRow>,
    /// Sum of `trip_distance` over all rows
    pub total: f64,
}

/// Collect mileage rows for every hub-routed decision, optionally
/// restricted to one corridor.
pub fn empty_mileage<'a, I>(
    decisions: I,
    corridor: Option<Corridor>,
) -> HubRouteResult<EmptyMileageReport>
where
    I: IntoIterator<Item = &'a RouteDecision>,
{
    let mut rows = Vec::new();
    for decision in decisions {
        if corridor.is_some() && decision.corridor() != corridor {
            continue;
        }
        if let Some(row) = MileageRow::from_decision(decision)? {
            rows.push(row);
        }
    }
    let total = rows.iter().map(|r| r.trip_distance).sum();
    Ok(EmptyMileageReport { rows, total })
}

/// Output row for a corridor: mileage columns plus the corridor's mean
/// platoon dispersion repeated on every row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorTableRow {
    pub origin: LocationId,
    pub destination: LocationId,
    pub hub_from: LocationId,
    pub hub_to: LocationId,
    pub trip_count: usize,
    pub network_distance: f64,
    pub trip_distance: f64,
    pub mean_dispersion: f64,
}

/// Rows for every decision routed through the report's corridor.
pub fn corridor_table<'a, I>(decisions: I, report: &PlatoonReport) -> HubRouteResult<Vec<CorridorTableRow>>
where
    I: IntoIterator<Item = &'a RouteDecision>,
{
    let mileage = empty_mileage(decisions, Some(report.corridor))?;
    Ok(mileage
        .rows
        .into_iter()
        .map(|row| CorridorTableRow {
            origin: row.origin,
            destination: row.destination,
            hub_from: row.hub_from,
            hub_to: row.hub_to,
            trip_count: row.trip_count,
            network_distance: row.network_distance,
            trip_distance: row.trip_distance,
            mean_dispersion: report.stats.mean,
        })
        .collect())
}
