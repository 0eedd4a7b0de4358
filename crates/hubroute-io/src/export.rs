//! CSV writers for solve and platoon results

use crate::csv_error;
use hubroute_algo::{CorridorTableRow, EmptyMileageReport, HubSolution, Route};
use hubroute_core::{HubRouteResult, LocationId};
use serde::Serialize;
use std::path::Path;
use tracing::info;

fn write_rows<T: Serialize>(path: &Path, table: &str, rows: impl IntoIterator<Item = T>) -> HubRouteResult<usize> {
    let mut wtr = csv::Writer::from_path(path).map_err(|e| csv_error(table, e))?;
    let mut count = 0;
    for row in rows {
        wtr.serialize(row).map_err(|e| csv_error(table, e))?;
        count += 1;
    }
    wtr.flush()?;
    info!(table, rows = count, path = %path.display(), "wrote table");
    Ok(count)
}

#[derive(Serialize)]
struct DecisionRecord {
    origin: LocationId,
    destination: LocationId,
    mode: &'static str,
    hub_from: Option<LocationId>,
    hub_to: Option<LocationId>,
    flow: f64,
    unit_cost: f64,
    cost: f64,
    network_distance: Option<f64>,
}

/// One row per (origin, destination) pair with its chosen route.
pub fn write_route_decisions(path: &Path, solution: &HubSolution) -> HubRouteResult<()> {
    let rows = solution.decisions.iter().map(|d| {
        let (mode, hub_from, hub_to) = match d.route {
            Route::Direct => ("direct", None, None),
            Route::ViaHubs { hub_from, hub_to } => ("via_hubs", Some(hub_from), Some(hub_to)),
        };
        DecisionRecord {
            origin: d.origin,
            destination: d.destination,
            mode,
            hub_from,
            hub_to,
            flow: d.flow,
            unit_cost: d.unit_cost,
            cost: d.cost(),
            network_distance: d.network_distance,
        }
    });
    write_rows(path, "route_decisions", rows)?;
    Ok(())
}

/// Corridor rows with the mean platoon dispersion column.
pub fn write_corridor_table(path: &Path, rows: &[CorridorTableRow]) -> HubRouteResult<()> {
    write_rows(path, "corridor_table", rows)?;
    Ok(())
}

#[derive(Serialize)]
struct MileageRecord {
    origin: LocationId,
    destination: LocationId,
    hub_from: LocationId,
    hub_to: LocationId,
    trip_count: usize,
    network_distance: f64,
    trip_distance: f64,
    total_trip_distance: f64,
}

/// Mileage rows with the grand total repeated on every row.
pub fn write_empty_mileage(path: &Path, report: &EmptyMileageReport) -> HubRouteResult<()> {
    let rows = report.rows.iter().map(|r| MileageRecord {
        origin: r.origin,
        destination: r.destination,
        hub_from: r.hub_from,
        hub_to: r.hub_to,
        trip_count: r.trip_count,
        network_distance: r.network_distance,
        trip_distance: r.trip_distance,
        total_trip_distance: report.total,
    });
    write_rows(path, "empty_mileage", rows)?;
    Ok(())
}
