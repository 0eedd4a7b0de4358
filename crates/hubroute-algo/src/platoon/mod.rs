//! Platoon Analysis
//!
//! Downstream of the hub location solve, trucks that share a hub corridor
//! (k, l) can travel the inter-hub leg as a platoon. This module measures
//! how well the trips on one corridor line up.
//!
//! ```text
//! RouteDecisions ─► filter corridor ─► ceil(flow) trips ─► sort by key
//!                                                            │
//!        mean / min / max ◄─ dispersion per group ◄─ chunks of 4
//! ```
//!
//! A trailing group smaller than the platoon size is reported as leftover
//! and excluded from the statistics. If no complete group exists the
//! statistics are undefined and analysis fails with
//! [`GroupingPrecondition`](hubroute_core::HubRouteError::GroupingPrecondition).
//!
//! ## Grouping keys
//!
//! - [`GroupingKey::NetworkDistance`] (default): distance from the origin to
//!   the first hub.
//! - [`GroupingKey::DistancePlusSchedule`]: that distance plus a departure
//!   offset drawn from a [`TriangularSchedule`]. Trips with zero distance
//!   always get offset 0.

mod grouping;
mod report;
mod schedule;
mod trips;

pub use grouping::{
    analyze_corridor, analyze_corridor_with_rng, dispersion_stats, group_trips, DispersionStats,
    GroupingKey, Platoon, PlatoonConfig, PlatoonReport, DEFAULT_PLATOON_SIZE,
};
pub use report::{corridor_table, empty_mileage, CorridorTableRow, EmptyMileageReport, MileageRow};
pub use schedule::TriangularSchedule;
pub use trips::{expand_trips, trip_count, Trip};
