//! Unified error types for the hubroute workspace
//!
//! Every stage of the pipeline (load, build, solve, extract, group) reports
//! failures through [`HubRouteError`]. All variants are terminal for a run:
//! callers never build a results table from a partially failed solve.
//!
//! # Example
//!
//! ```ignore
//! use hubroute_core::{HubRouteError, HubRouteResult};
//!
//! fn run(network: &NetworkData) -> HubRouteResult<()> {
//!     network.validate(&hubs)?;
//!     let solution = solve_hub_location(network, &model_cfg, &solver_cfg)?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Outcome reported by a MILP backend when no usable assignment exists.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverFailure {
    /// The model admits no feasible assignment
    #[error("model is infeasible")]
    Infeasible,

    /// The objective is unbounded below
    #[error("model is unbounded")]
    Unbounded,

    /// The backend did not finish inside the configured time limit
    #[error("solver timed out after {seconds} seconds")]
    Timeout { seconds: f64 },

    /// Any other backend failure (numerical trouble, worker crash, ...)
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Unified error type for all hubroute operations.
#[derive(Error, Debug)]
pub enum HubRouteError {
    /// Missing, malformed or non-square matrix data
    #[error("data integrity error in table '{table}': {detail}")]
    DataIntegrity { table: String, detail: String },

    /// Invalid model parameters or index ranges
    #[error("model construction error: {0}")]
    ModelConstruction(String),

    /// The external solver did not return an optimal assignment
    #[error("solver failure: {0}")]
    Solver(#[from] SolverFailure),

    /// A routing variable came back strictly between 0 and 1
    #[error("integrality anomaly: variable {variable} = {value}")]
    ExtractionAnomaly { variable: String, value: f64 },

    /// The solver output breaks exclusivity, gating or the hub budget
    #[error("extraction error: {0}")]
    Extraction(String),

    /// Not enough trips for a single complete platoon
    #[error(
        "grouping precondition failed: {trips} trip(s) cannot form a platoon of {group_size}"
    )]
    GroupingPrecondition { trips: usize, group_size: usize },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing errors from tabular sources
    #[error("parse error: {0}")]
    Parse(String),
}

impl HubRouteError {
    /// Shorthand for a [`HubRouteError::DataIntegrity`] error.
    pub fn data(table: impl Into<String>, detail: impl Into<String>) -> Self {
        HubRouteError::DataIntegrity {
            table: table.into(),
            detail: detail.into(),
        }
    }
}

/// Convenience type alias for Results using HubRouteError.
pub type HubRouteResult<T> = Result<T, HubRouteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_table() {
        let err = HubRouteError::data("flow", "missing entry (3, 7)");
        let text = err.to_string();
        assert!(text.contains("flow"));
        assert!(text.contains("(3, 7)"));
    }

    #[test]
    fn test_solver_failure_conversion() {
        let err: HubRouteError = SolverFailure::Timeout { seconds: 2.5 }.into();
        assert!(matches!(err, HubRouteError::Solver(SolverFailure::Timeout { .. })));
        assert!(err.to_string().contains("2.5"));
    }

    #[test]
    fn test_grouping_precondition_display() {
        let err = HubRouteError::GroupingPrecondition {
            trips: 3,
            group_size: 4,
        };
        assert!(err.to_string().contains("3 trip(s)"));
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> HubRouteResult<()> {
            Err(HubRouteError::Config("test".into()))
        }

        fn outer() -> HubRouteResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
