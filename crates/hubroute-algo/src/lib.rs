//! # hubroute-algo: Hub Location and Platoon Analytics
//!
//! Optimization and analytics for freight consolidation networks.
//!
//! ## Hub Location
//!
//! [`hub`] formulates single-allocation hub location with direct assignment
//! as a MILP and solves it through the [`MilpSolver`] seam:
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | Build | [`HubLocationModel::build`] |
//! | Solve | [`GoodLpSolver`] (`microlp`, or `highs` with the `solver-highs` feature) |
//! | Extract | [`extract_solution`] |
//! | All of the above | [`solve_hub_location`] |
//!
//! ## Platoon Analysis
//!
//! [`platoon`] groups the trips on one hub corridor into fixed-size platoons
//! and reports dispersion statistics ([`analyze_corridor`]), plus mileage
//! tables for reporting ([`empty_mileage`], [`corridor_table`]).
//!
//! ## Example
//!
//! ```ignore
//! use hubroute_algo::*;
//!
//! let mut solution = solve_hub_location(&network, &model_config, &MilpSolverConfig::default())?;
//! solution.enrich_with_distances(&hub_distances)?;
//!
//! let (busiest, _) = solution.corridor_flows()[0];
//! let report = analyze_corridor(&solution.decisions, &PlatoonConfig::new(busiest))?;
//! println!("{}", report.summary());
//! ```

pub mod hub;
pub mod platoon;

pub use hub::{
    extract_solution, solve_hub_location, solve_model, Corridor, GoodLpSolver, HubLocationModel,
    HubModelConfig, HubSolution, MilpSolver, MilpSolverConfig, MilpSolverKind, RawAssignment,
    Route, RouteDecision,
};
pub use platoon::{
    analyze_corridor, analyze_corridor_with_rng, corridor_table, empty_mileage, CorridorTableRow,
    DispersionStats, EmptyMileageReport, GroupingKey, MileageRow, Platoon, PlatoonConfig,
    PlatoonReport, TriangularSchedule, Trip,
};
