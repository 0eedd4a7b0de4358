//! # hubroute-io: Tabular Inputs and Outputs
//!
//! CSV adapters around the hub location pipeline:
//!
//! - [`read_location_matrix`] / [`load_network`]: cost, flow, inter-hub
//!   cost and hub distance matrices
//! - [`write_route_decisions`], [`write_corridor_table`],
//!   [`write_empty_mileage`]: result tables
//!
//! All functions report failures as [`HubRouteError`]; I/O problems map to
//! `Io`, malformed cells to `Parse` and structural problems (non-square,
//! missing rows) to `DataIntegrity`.

mod export;
mod matrix;
mod network;

pub use export::{write_corridor_table, write_empty_mileage, write_route_decisions};
pub use matrix::{read_location_matrix, read_location_matrix_from, write_location_matrix};
pub use network::{load_network, NetworkPaths};

use hubroute_core::HubRouteError;

pub(crate) fn csv_error(table: &str, err: csv::Error) -> HubRouteError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => HubRouteError::Io(io),
        _ => HubRouteError::Parse(format!("{table}: {message}")),
    }
}
