//! # hubroute-core: Network Data for Hub Location
//!
//! Provides the immutable inputs shared by every stage of the hub location
//! and platooning pipeline:
//!
//! - [`LocationId`]: newtype id for origins, destinations and hub candidates
//! - [`LocationMatrix`]: square table keyed by location (cost, flow, distance)
//! - [`NetworkData`]: the bundle handed to model construction, with fail-fast
//!   validation
//! - [`HubRouteError`]: error taxonomy used across the workspace
//!
//! ## Quick Start
//!
//! ```rust
//! use hubroute_core::*;
//!
//! let ids = location_ids([1, 2, 3]);
//! let costs = LocationMatrix::from_fn("cost", ids.clone(), |i, j| {
//!     if i == j { 0.0 } else { 10.0 }
//! }).unwrap();
//! let flows = LocationMatrix::from_fn("flow", ids.clone(), |_, _| 1.0).unwrap();
//!
//! let network = NetworkData::new(ids, costs, flows);
//! network.validate(&location_ids([1, 2])).unwrap();
//! assert_eq!(network.total_flow().unwrap(), 9.0);
//! ```

pub mod error;
mod ids;
mod matrix;
mod network;

pub use error::{HubRouteError, HubRouteResult, SolverFailure};
pub use ids::{location_ids, LocationId};
pub use matrix::LocationMatrix;
pub use network::NetworkData;
