//! MILP solver adapter
//!
//! Hands a [`HubLocationModel`] to an external MILP backend through
//! `good_lp` and returns the raw variable assignment. The adapter owns
//! the time bound: the backend runs on a worker thread and the caller
//! gets [`SolverFailure::Timeout`] once the configured limit elapses.

use super::extract::extract_solution;
use super::{HubLocationModel, HubModelConfig, HubSolution, FEASIBILITY_TOLERANCE};
use good_lp::solvers::microlp::microlp;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, Constraint, Expression, ProblemVariables, ResolutionError, Solution,
    SolverModel, Variable,
};
use hubroute_core::{HubRouteError, HubRouteResult, NetworkData, SolverFailure};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// MILP backends reachable through `good_lp`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilpSolverKind {
    /// Pure-Rust simplex with branch-and-bound
    #[default]
    Microlp,
    #[cfg(feature = "solver-highs")]
    Highs,
}

const AVAILABLE_MILP_SOLVERS: &[&str] = &[
    "microlp",
    #[cfg(feature = "solver-highs")]
    "highs",
];

impl MilpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_MILP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MilpSolverKind::Microlp => "microlp",
            #[cfg(feature = "solver-highs")]
            MilpSolverKind::Highs => "highs",
        }
    }
}

fn unknown_solver_error(label: &str) -> HubRouteError {
    HubRouteError::Config(format!(
        "unknown milp solver '{}'; supported values: {}",
        label,
        MilpSolverKind::available().join(", ")
    ))
}

impl FromStr for MilpSolverKind {
    type Err = HubRouteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "microlp" => Ok(MilpSolverKind::Microlp),
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(MilpSolverKind::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

/// Solver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MilpSolverConfig {
    #[serde(default)]
    pub solver: MilpSolverKind,
    /// Wall-clock bound on the solve; `None` waits indefinitely
    #[serde(default = "default_time_limit")]
    pub time_limit_seconds: Option<f64>,
    /// Values within this distance of 0 or 1 count as integral
    #[serde(default = "default_integrality_tolerance")]
    pub integrality_tolerance: f64,
}

fn default_time_limit() -> Option<f64> {
    Some(300.0) // 5 minutes
}

fn default_integrality_tolerance() -> f64 {
    FEASIBILITY_TOLERANCE
}

impl Default for MilpSolverConfig {
    fn default() -> Self {
        Self {
            solver: MilpSolverKind::default(),
            time_limit_seconds: default_time_limit(),
            integrality_tolerance: default_integrality_tolerance(),
        }
    }
}

impl MilpSolverConfig {
    pub fn with_time_limit(mut self, seconds: Option<f64>) -> Self {
        self.time_limit_seconds = seconds;
        self
    }

    pub fn validate(&self) -> HubRouteResult<()> {
        if let Some(limit) = self.time_limit_seconds {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(HubRouteError::Config(format!(
                    "time limit must be a positive number of seconds, got {}",
                    limit
                )));
            }
        }
        let tol = self.integrality_tolerance;
        if !tol.is_finite() || tol <= 0.0 || tol >= 0.5 {
            return Err(HubRouteError::Config(format!(
                "integrality tolerance {} must lie in (0, 0.5)",
                tol
            )));
        }
        Ok(())
    }
}

/// Variable values returned by a backend, indexed by [`super::VarId`].
#[derive(Debug, Clone, PartialEq)]
pub struct RawAssignment {
    pub objective: f64,
    pub values: Vec<f64>,
    pub solve_time: Duration,
}

/// Contract with an external MILP solver.
///
/// An implementation returns either a full assignment that it claims is
/// optimal, or a [`SolverFailure`]. The caller re-checks the assignment
/// against the model before trusting it.
pub trait MilpSolver: Send + Sync {
    fn name(&self) -> &str;

    fn solve(&self, model: Arc<HubLocationModel>) -> Result<RawAssignment, SolverFailure>;
}

/// [`MilpSolver`] backed by `good_lp`.
#[derive(Debug, Clone, Default)]
pub struct GoodLpSolver {
    config: MilpSolverConfig,
}

impl GoodLpSolver {
    pub fn new(config: MilpSolverConfig) -> Self {
        Self { config }
    }
}

impl MilpSolver for GoodLpSolver {
    fn name(&self) -> &str {
        self.config.solver.as_str()
    }

    fn solve(&self, model: Arc<HubLocationModel>) -> Result<RawAssignment, SolverFailure> {
        let start = Instant::now();
        let kind = self.config.solver;
        let (tx, rx) = mpsc::channel();
        let worker_model = Arc::clone(&model);

        // A timed-out worker is left detached; its result is dropped.
        thread::Builder::new()
            .name("milp-solve".into())
            .spawn(move || {
                let _ = tx.send(solve_with_good_lp(&worker_model, kind));
            })
            .map_err(|e| SolverFailure::Backend(format!("failed to spawn solver thread: {}", e)))?;

        let outcome = match self.config.time_limit_seconds {
            Some(limit) => rx
                .recv_timeout(Duration::from_secs_f64(limit))
                .map_err(|err| match err {
                    RecvTimeoutError::Timeout => {
                        warn!(
                            solver = kind.as_str(),
                            seconds = limit,
                            "time limit reached; abandoning solver thread"
                        );
                        SolverFailure::Timeout { seconds: limit }
                    }
                    RecvTimeoutError::Disconnected => worker_lost(),
                })?,
            None => rx.recv().map_err(|_| worker_lost())?,
        };
        let values = outcome?;

        Ok(RawAssignment {
            objective: model.objective_value(&values),
            values,
            solve_time: start.elapsed(),
        })
    }
}

fn worker_lost() -> SolverFailure {
    SolverFailure::Backend("solver thread terminated without a result".into())
}

fn solve_with_good_lp(
    model: &HubLocationModel,
    kind: MilpSolverKind,
) -> Result<Vec<f64>, SolverFailure> {
    let mut problem = ProblemVariables::new();
    let vars: Vec<Variable> = model
        .variables()
        .iter()
        .map(|v| {
            if v.binary {
                problem.add(variable().binary())
            } else {
                problem.add(variable().min(0.0).max(1.0))
            }
        })
        .collect();

    let mut objective = Expression::from(0.0);
    for (var, def) in vars.iter().zip(model.variables()) {
        if def.objective != 0.0 {
            objective += def.objective * *var;
        }
    }

    let constraints: Vec<Constraint> = model
        .constraints()
        .iter()
        .map(|c| {
            let mut lhs = Expression::from(0.0);
            for (id, coef) in &c.terms {
                lhs += *coef * vars[id.index()];
            }
            let rhs = c.rhs;
            match c.sense {
                super::ConstraintSense::LessEq => constraint!(lhs <= rhs),
                super::ConstraintSense::Equal => constraint!(lhs == rhs),
            }
        })
        .collect();

    let unsolved = problem.minimise(objective);
    match kind {
        MilpSolverKind::Microlp => run_backend(unsolved.using(microlp), constraints, &vars),
        #[cfg(feature = "solver-highs")]
        MilpSolverKind::Highs => run_backend(unsolved.using(highs), constraints, &vars),
    }
}

fn run_backend<M>(
    mut solver_model: M,
    constraints: Vec<Constraint>,
    vars: &[Variable],
) -> Result<Vec<f64>, SolverFailure>
where
    M: SolverModel<Error = ResolutionError>,
{
    for c in constraints {
        solver_model = solver_model.with(c);
    }
    let solution = solver_model.solve().map_err(|e| match e {
        ResolutionError::Infeasible => SolverFailure::Infeasible,
        ResolutionError::Unbounded => SolverFailure::Unbounded,
        other => SolverFailure::Backend(other.to_string()),
    })?;
    Ok(vars.iter().map(|v| solution.value(*v)).collect())
}

/// Solve an already built model with any [`MilpSolver`].
///
/// The returned assignment is re-checked against every bound and
/// constraint; a violation means the backend broke its contract and is
/// reported as an extraction error rather than repaired.
pub fn solve_model(
    solver: &dyn MilpSolver,
    model: Arc<HubLocationModel>,
    tolerance: f64,
) -> HubRouteResult<HubSolution> {
    let stats = model.stats();
    info!(
        solver = solver.name(),
        variables = stats.num_variables,
        constraints = stats.num_constraints,
        "solving hub location model"
    );

    let raw = solver.solve(Arc::clone(&model)).map_err(|failure| {
        warn!(solver = solver.name(), %failure, "solver did not return an assignment");
        HubRouteError::from(failure)
    })?;

    let evaluation = model.evaluate(&raw.values, tolerance);
    if !evaluation.is_feasible() {
        return Err(HubRouteError::Extraction(format!(
            "solver output violates {} model row(s), first: {}",
            evaluation.violations.len(),
            evaluation.violations[0]
        )));
    }

    let solution = extract_solution(&model, &raw, solver.name(), tolerance)?;
    info!(
        objective = solution.objective,
        hubs = solution.hubs_opened(),
        elapsed_ms = raw.solve_time.as_millis() as u64,
        "hub location solved"
    );
    Ok(solution)
}

/// Validate, build, solve and extract in one call.
///
/// # Example
///
/// ```no_run
/// use hubroute_algo::hub::{solve_hub_location, HubModelConfig, MilpSolverConfig};
/// use hubroute_core::{location_ids, LocationMatrix, NetworkData};
///
/// let ids = location_ids(1..=3);
/// let costs = LocationMatrix::from_fn("cost", ids.clone(), |_, _| 1.0)?;
/// let flows = LocationMatrix::from_fn("flow", ids.clone(), |_, _| 1.0)?;
/// let network = NetworkData::new(ids, costs, flows);
///
/// let model_config = HubModelConfig::new(location_ids([1, 2]), 1, 0.744);
/// let solution = solve_hub_location(&network, &model_config, &MilpSolverConfig::default())?;
/// println!("{}", solution.summary());
/// # Ok::<(), hubroute_core::HubRouteError>(())
/// ```
pub fn solve_hub_location(
    network: &NetworkData,
    model_config: &HubModelConfig,
    solver_config: &MilpSolverConfig,
) -> HubRouteResult<HubSolution> {
    solver_config.validate()?;
    let model = Arc::new(HubLocationModel::build(network, model_config)?);
    let solver = GoodLpSolver::new(solver_config.clone());
    solve_model(&solver, model, solver_config.integrality_tolerance)
}
