//! Hub Location with Direct Assignment
//!
//! This module implements a Mixed-Integer Linear Programming (MILP)
//! formulation that decides which candidate locations act as consolidation
//! hubs and how every origin-destination flow is routed.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SINGLE-ALLOCATION HUB LOCATION WITH DIRECT ASSIGNMENT                   │
//! │  ─────────────────────────────────────────────────────                   │
//! │                                                                          │
//! │  Given:                                                                  │
//! │    • Locations I = J and hub candidates K = L ⊆ I                        │
//! │    • Fuel cost c(i,j), flow w(i,j), inter-hub cost h(k,l)                │
//! │    • Inter-hub discount α and a hub budget Q                             │
//! │                                                                          │
//! │  Decide:                                                                 │
//! │    • Which candidates to open (binary)                                   │
//! │    • For each pair: direct, or via exactly one hub pair (k,l)            │
//! │                                                                          │
//! │  Minimize:                                                               │
//! │    Total fuel cost of all routed flow                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## MILP Formulation
//!
//! ```text
//! minimize    Σ_ij w_ij·c_ij·d_ij + Σ_ijkl w_ij·(c_ik + α·h_kl + c_lj)·y_ijkl
//!
//! subject to:
//!   Σ_k x_k ≤ Q                          Hub budget
//!   d_ij + Σ_kl y_ijkl = 1      ∀ i,j    Exclusivity
//!   Σ_l y_ijkl ≤ x_k            ∀ i,j,k  Outbound gating
//!   Σ_k y_ijkl ≤ x_l            ∀ i,j,l  Inbound gating
//!   x_k ∈ {0,1},  d_ij, y_ijkl ∈ [0,1]
//! ```
//!
//! Hub opening carries no direct cost; hubs pay off only through the
//! discounted inter-hub leg. Routing variables are continuous, but at an
//! optimum of this formulation they take values in {0,1}.
//!
//! ## Sparse Construction
//!
//! The full column count grows as |I|·|J|·|K|², which is several million for
//! a national network. [`HubLocationModel::build`] skips hub columns for
//! zero-flow pairs and columns that are not strictly cheaper than the direct
//! route. Neither reduction changes the optimal objective; both can be
//! switched off through [`HubModelConfig`].
//!
//! ## Pipeline
//!
//! [`solve_hub_location`] validates the data, builds the model, hands it to a
//! [`MilpSolver`], re-checks the returned assignment and extracts a
//! [`HubSolution`].

mod extract;
mod model;
mod solution;
mod solver;

pub use extract::extract_solution;
pub use model::{
    ConstraintSense, HubLocationModel, HubModelConfig, LinearConstraint, ModelEvaluation,
    ModelStats, ModelVariable, PairColumns, VarId, VarKind, ViaColumn, FEASIBILITY_TOLERANCE,
};
pub use solution::{Corridor, HubSolution, Route, RouteDecision};
pub use solver::{
    solve_hub_location, solve_model, GoodLpSolver, MilpSolver, MilpSolverConfig, MilpSolverKind,
    RawAssignment,
};
