//! Hub location model construction
//!
//! Translates [`NetworkData`] plus a [`HubModelConfig`] into a
//! solver-independent [`HubLocationModel`]: a variable table, an objective
//! coefficient per variable and a list of linear constraints. The model
//! keeps an explicit index from (origin, destination[, hub_from, hub_to])
//! to variable so that extraction never has to parse variable names.

use hubroute_core::{HubRouteError, HubRouteResult, LocationId, NetworkData};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use tracing::debug;

/// Absolute tolerance used when checking an assignment against the model.
pub const FEASIBILITY_TOLERANCE: f64 = 1e-6;

/// Parameters of the hub location formulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubModelConfig {
    /// Locations eligible to be opened as hubs (used for both hub roles)
    pub hub_candidates: Vec<LocationId>,
    /// Maximum number of hubs that may be opened (Q)
    pub max_hubs: usize,
    /// Discount applied to the hub-to-hub leg (α)
    pub inter_hub_discount: f64,
    /// Allow routes through a single hub (k = l)
    #[serde(default = "default_true")]
    pub allow_same_hub_routes: bool,
    /// Fix zero-flow pairs to direct routing without hub columns
    #[serde(default = "default_true")]
    pub prune_zero_flow_pairs: bool,
    /// Skip hub columns that are not strictly cheaper than going direct
    #[serde(default = "default_true")]
    pub prune_dominated_routes: bool,
}

fn default_true() -> bool {
    true
}

impl HubModelConfig {
    pub fn new(hub_candidates: Vec<LocationId>, max_hubs: usize, inter_hub_discount: f64) -> Self {
        Self {
            hub_candidates,
            max_hubs,
            inter_hub_discount,
            allow_same_hub_routes: true,
            prune_zero_flow_pairs: true,
            prune_dominated_routes: true,
        }
    }

    /// Build every column, including zero-flow and dominated ones.
    pub fn without_pruning(mut self) -> Self {
        self.prune_zero_flow_pairs = false;
        self.prune_dominated_routes = false;
        self
    }

    pub fn with_same_hub_routes(mut self, allow: bool) -> Self {
        self.allow_same_hub_routes = allow;
        self
    }

    /// Check the scalar parameters.
    pub fn validate(&self) -> HubRouteResult<()> {
        if self.max_hubs == 0 {
            return Err(HubRouteError::ModelConstruction(
                "maximum hub count must be at least 1".into(),
            ));
        }
        let alpha = self.inter_hub_discount;
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(HubRouteError::ModelConstruction(format!(
                "inter-hub discount {} must lie in [0, 1]",
                alpha
            )));
        }
        Ok(())
    }
}

/// Index into [`HubLocationModel::variables`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a model variable stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// `open(k)`: hub candidate k is opened
    Open(LocationId),
    /// `direct(i, j)`: pair routed without a hub
    Direct(LocationId, LocationId),
    /// `viaHub(i, j, k, l)`: pair routed through hub k then hub l
    ViaHubs(LocationId, LocationId, LocationId, LocationId),
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarKind::Open(k) => write!(f, "open[{}]", k),
            VarKind::Direct(i, j) => write!(f, "direct[{},{}]", i, j),
            VarKind::ViaHubs(i, j, k, l) => write!(f, "via[{},{},{},{}]", i, j, k, l),
        }
    }
}

/// One decision variable; all variables are bounded to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ModelVariable {
    pub kind: VarKind,
    /// Binary (hub opening) or continuous (routing)
    pub binary: bool,
    pub objective: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    LessEq,
    Equal,
}

/// `Σ coef · var  (<= | =)  rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Family and indices, e.g. `exclusivity[3,7]`
    pub label: String,
    pub terms: Vec<(VarId, f64)>,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

impl LinearConstraint {
    /// Left-hand side value under `assignment`.
    pub fn lhs(&self, assignment: &[f64]) -> f64 {
        self.terms
            .iter()
            .map(|(var, coef)| coef * assignment[var.index()])
            .sum()
    }

    pub fn is_satisfied(&self, assignment: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(assignment);
        match self.sense {
            ConstraintSense::LessEq => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// A hub-routed column of one origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViaColumn {
    pub hub_from: LocationId,
    pub hub_to: LocationId,
    pub var: VarId,
    /// cost(i,k) + α · interHubCost(k,l) + cost(l,j)
    pub unit_cost: f64,
}

/// Every column belonging to one ordered (origin, destination) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairColumns {
    pub origin: LocationId,
    pub destination: LocationId,
    pub flow: f64,
    pub direct: VarId,
    pub direct_unit_cost: f64,
    pub via: Vec<ViaColumn>,
}

/// Size of a built model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelStats {
    pub num_variables: usize,
    pub num_binary: usize,
    pub num_via_columns: usize,
    pub num_constraints: usize,
    pub num_pairs: usize,
}

/// Objective value and broken constraints for a candidate assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelEvaluation {
    pub objective: f64,
    pub violations: Vec<String>,
}

impl ModelEvaluation {
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Solver-independent hub location instance.
#[derive(Debug, Clone)]
pub struct HubLocationModel {
    config: HubModelConfig,
    variables: Vec<ModelVariable>,
    constraints: Vec<LinearConstraint>,
    open: Vec<(LocationId, VarId)>,
    pairs: Vec<PairColumns>,
    pair_index: HashMap<(LocationId, LocationId), usize>,
}

impl HubLocationModel {
    /// Build the model, validating the data first.
    ///
    /// Nothing is defaulted: a missing cost or flow entry for any referenced
    /// pair aborts construction with a data-integrity error.
    pub fn build(network: &NetworkData, config: &HubModelConfig) -> HubRouteResult<Self> {
        config.validate()?;
        network.validate(&config.hub_candidates)?;

        let hubs = &config.hub_candidates;
        let alpha = config.inter_hub_discount;
        let mut model = Self {
            config: config.clone(),
            variables: Vec::new(),
            constraints: Vec::new(),
            open: Vec::with_capacity(hubs.len()),
            pairs: Vec::with_capacity(network.num_locations().pow(2)),
            pair_index: HashMap::new(),
        };

        for &k in hubs {
            let var = model.push_var(VarKind::Open(k), true, 0.0);
            model.open.push((k, var));
        }
        let open_var: HashMap<LocationId, VarId> = model.open.iter().copied().collect();

        // Hub-to-hub unit costs are shared by every pair.
        let mut inter = HashMap::with_capacity(hubs.len() * hubs.len());
        for &k in hubs {
            for &l in hubs {
                inter.insert((k, l), alpha * network.inter_hub_cost(k, l)?);
            }
        }

        for &i in network.locations() {
            for &j in network.locations() {
                let flow = network.flow(i, j)?;
                let direct_unit_cost = network.cost(i, j)?;
                let direct = model.push_var(VarKind::Direct(i, j), false, flow * direct_unit_cost);

                let mut via = Vec::new();
                if !(config.prune_zero_flow_pairs && flow == 0.0) {
                    for &k in hubs {
                        let first_leg = network.cost(i, k)?;
                        for &l in hubs {
                            if k == l && !config.allow_same_hub_routes {
                                continue;
                            }
                            let unit_cost = first_leg + inter[&(k, l)] + network.cost(l, j)?;
                            if config.prune_dominated_routes && unit_cost >= direct_unit_cost {
                                continue;
                            }
                            let var = model.push_var(
                                VarKind::ViaHubs(i, j, k, l),
                                false,
                                flow * unit_cost,
                            );
                            via.push(ViaColumn {
                                hub_from: k,
                                hub_to: l,
                                var,
                                unit_cost,
                            });
                        }
                    }
                }

                model.pair_index.insert((i, j), model.pairs.len());
                model.pairs.push(PairColumns {
                    origin: i,
                    destination: j,
                    flow,
                    direct,
                    direct_unit_cost,
                    via,
                });
            }
        }

        model.add_constraints(&open_var);

        let stats = model.stats();
        debug!(
            variables = stats.num_variables,
            via_columns = stats.num_via_columns,
            constraints = stats.num_constraints,
            "built hub location model"
        );
        Ok(model)
    }

    fn push_var(&mut self, kind: VarKind, binary: bool, objective: f64) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(ModelVariable {
            kind,
            binary,
            objective,
        });
        id
    }

    fn add_constraints(&mut self, open_var: &HashMap<LocationId, VarId>) {
        // Hub budget: Σ_k open(k) <= Q
        self.constraints.push(LinearConstraint {
            label: "hub_budget".into(),
            terms: self.open.iter().map(|(_, v)| (*v, 1.0)).collect(),
            sense: ConstraintSense::LessEq,
            rhs: self.config.max_hubs as f64,
        });

        let mut rows = Vec::new();
        for pair in &self.pairs {
            let (i, j) = (pair.origin, pair.destination);

            // Exclusivity: direct(i,j) + Σ_{k,l} via(i,j,k,l) = 1
            let mut terms = Vec::with_capacity(pair.via.len() + 1);
            terms.push((pair.direct, 1.0));
            terms.extend(pair.via.iter().map(|c| (c.var, 1.0)));
            rows.push(LinearConstraint {
                label: format!("exclusivity[{},{}]", i, j),
                terms,
                sense: ConstraintSense::Equal,
                rhs: 1.0,
            });

            if pair.via.is_empty() {
                continue;
            }

            // Gating, outbound: Σ_l via(i,j,k,l) - open(k) <= 0
            let mut outbound: Vec<(LocationId, Vec<(VarId, f64)>)> = Vec::new();
            // Gating, inbound: Σ_k via(i,j,k,l) - open(l) <= 0
            let mut inbound: Vec<(LocationId, Vec<(VarId, f64)>)> = Vec::new();
            for column in &pair.via {
                push_grouped(&mut outbound, column.hub_from, column.var);
                push_grouped(&mut inbound, column.hub_to, column.var);
            }
            for (family, groups) in [("gate_out", outbound), ("gate_in", inbound)] {
                for (hub, mut terms) in groups {
                    terms.push((open_var[&hub], -1.0));
                    rows.push(LinearConstraint {
                        label: format!("{}[{},{},{}]", family, i, j, hub),
                        terms,
                        sense: ConstraintSense::LessEq,
                        rhs: 0.0,
                    });
                }
            }
        }
        self.constraints.extend(rows);
    }

    pub fn config(&self) -> &HubModelConfig {
        &self.config
    }

    pub fn variables(&self) -> &[ModelVariable] {
        &self.variables
    }

    pub fn variable(&self, id: VarId) -> &ModelVariable {
        &self.variables[id.index()]
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Hub-opening variables in candidate order.
    pub fn open_vars(&self) -> &[(LocationId, VarId)] {
        &self.open
    }

    /// Columns of every ordered pair, in (origin, destination) order.
    pub fn pairs(&self) -> &[PairColumns] {
        &self.pairs
    }

    pub fn pair(&self, origin: LocationId, destination: LocationId) -> Option<&PairColumns> {
        self.pair_index
            .get(&(origin, destination))
            .map(|&idx| &self.pairs[idx])
    }

    pub fn stats(&self) -> ModelStats {
        ModelStats {
            num_variables: self.variables.len(),
            num_binary: self.variables.iter().filter(|v| v.binary).count(),
            num_via_columns: self.pairs.iter().map(|p| p.via.len()).sum(),
            num_constraints: self.constraints.len(),
            num_pairs: self.pairs.len(),
        }
    }

    /// Objective value of an assignment indexed by [`VarId`].
    pub fn objective_value(&self, assignment: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(assignment)
            .map(|(var, x)| var.objective * x)
            .sum()
    }

    /// Evaluate an assignment: objective plus every violated bound,
    /// integrality requirement and constraint.
    pub fn evaluate(&self, assignment: &[f64], tolerance: f64) -> ModelEvaluation {
        let mut violations = Vec::new();
        if assignment.len() != self.variables.len() {
            violations.push(format!(
                "assignment has {} values for {} variables",
                assignment.len(),
                self.variables.len()
            ));
            return ModelEvaluation {
                objective: f64::NAN,
                violations,
            };
        }

        for (var, &x) in self.variables.iter().zip(assignment) {
            if !x.is_finite() || x < -tolerance || x > 1.0 + tolerance {
                violations.push(format!("{} = {} outside [0, 1]", var.kind, x));
            } else if var.binary && x.min(1.0 - x) > tolerance {
                violations.push(format!("{} = {} is not binary", var.kind, x));
            }
        }
        for constraint in &self.constraints {
            if !constraint.is_satisfied(assignment, tolerance) {
                violations.push(format!(
                    "{}: lhs {} vs rhs {}",
                    constraint.label,
                    constraint.lhs(assignment),
                    constraint.rhs
                ));
            }
        }

        ModelEvaluation {
            objective: self.objective_value(assignment),
            violations,
        }
    }

    /// Encode a routing plan as an assignment.
    ///
    /// `hub_routes` maps a pair to its `(hub_from, hub_to)`; pairs not listed
    /// are routed directly. Fails when a requested hub is not a candidate or
    /// the requested column was not generated.
    pub fn encode(
        &self,
        open_hubs: &BTreeSet<LocationId>,
        hub_routes: &HashMap<(LocationId, LocationId), (LocationId, LocationId)>,
    ) -> HubRouteResult<Vec<f64>> {
        let mut assignment = vec![0.0; self.variables.len()];
        for hub in open_hubs {
            let (_, var) = self
                .open
                .iter()
                .find(|(k, _)| k == hub)
                .ok_or_else(|| {
                    HubRouteError::ModelConstruction(format!("{} is not a hub candidate", hub))
                })?;
            assignment[var.index()] = 1.0;
        }
        for pair in &self.pairs {
            match hub_routes.get(&(pair.origin, pair.destination)) {
                None => assignment[pair.direct.index()] = 1.0,
                Some(&(k, l)) => {
                    let column = pair
                        .via
                        .iter()
                        .find(|c| c.hub_from == k && c.hub_to == l)
                        .ok_or_else(|| {
                            HubRouteError::ModelConstruction(format!(
                                "no column for pair ({}, {}) via ({}, {})",
                                pair.origin, pair.destination, k, l
                            ))
                        })?;
                    assignment[column.var.index()] = 1.0;
                }
            }
        }
        Ok(assignment)
    }
}

fn push_grouped(groups: &mut Vec<(LocationId, Vec<(VarId, f64)>)>, hub: LocationId, var: VarId) {
    match groups.iter_mut().find(|(h, _)| *h == hub) {
        Some((_, terms)) => terms.push((var, 1.0)),
        None => groups.push((hub, vec![(var, 1.0)])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubroute_core::{location_ids, LocationMatrix};

    fn id(v: usize) -> LocationId {
        LocationId::new(v)
    }

    /// Three locations, hubs {1, 2}, one unit-priced flow 1 -> 3.
    fn small_network() -> NetworkData {
        let ids = location_ids([1, 2, 3]);
        let costs = LocationMatrix::from_fn("cost", ids.clone(), |i, j| match (i.value(), j.value()) {
            (a, b) if a == b => 0.0,
            (1, 3) | (3, 1) => 100.0,
            _ => 5.0,
        })
        .unwrap();
        let flows = LocationMatrix::from_fn("flow", ids.clone(), |i, j| {
            if (i.value(), j.value()) == (1, 3) {
                10.0
            } else {
                0.0
            }
        })
        .unwrap();
        NetworkData::new(ids, costs, flows)
    }

    #[test]
    fn test_config_validation() {
        assert!(HubModelConfig::new(location_ids([1]), 0, 0.5).validate().is_err());
        assert!(HubModelConfig::new(location_ids([1]), 1, 1.5).validate().is_err());
        assert!(HubModelConfig::new(location_ids([1]), 1, f64::NAN).validate().is_err());
        assert!(HubModelConfig::new(location_ids([1]), 1, 0.744).validate().is_ok());
    }

    #[test]
    fn test_constructor_defaults() {
        let cfg = HubModelConfig::new(location_ids([3, 1]), 1, 0.5);
        assert_eq!(cfg.hub_candidates, location_ids([3, 1]));
        assert!(cfg.allow_same_hub_routes);
        assert!(cfg.prune_zero_flow_pairs);
        assert!(cfg.prune_dominated_routes);
    }

    #[test]
    fn test_full_model_dimensions() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5).without_pruning();
        let model = HubLocationModel::build(&net, &cfg).unwrap();
        let stats = model.stats();

        // 2 open + 9 direct + 9 * 4 via
        assert_eq!(stats.num_binary, 2);
        assert_eq!(stats.num_via_columns, 36);
        assert_eq!(stats.num_variables, 2 + 9 + 36);
        // budget + 9 exclusivity + 9 * (2 outbound + 2 inbound)
        assert_eq!(stats.num_constraints, 1 + 9 + 36);
    }

    #[test]
    fn test_pruned_model_keeps_only_useful_columns() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();

        // Only (1,3) carries flow; its columns cheaper than 100 per unit are
        // (1,2): 0 + 2.5 + 5, (2,2): 5 + 0 + 5, (2,1) is 5 + 2.5 + 100.
        let pair = model.pair(id(1), id(3)).unwrap();
        let mut hubs: Vec<_> = pair.via.iter().map(|c| (c.hub_from.value(), c.hub_to.value())).collect();
        hubs.sort();
        assert_eq!(hubs, vec![(1, 2), (2, 2)]);
        assert!(model.pair(id(2), id(3)).unwrap().via.is_empty());
        assert_eq!(model.stats().num_via_columns, 2);
    }

    #[test]
    fn test_same_hub_routes_can_be_excluded() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5)
            .without_pruning()
            .with_same_hub_routes(false);
        let model = HubLocationModel::build(&net, &cfg).unwrap();
        assert!(model
            .pairs()
            .iter()
            .flat_map(|p| p.via.iter())
            .all(|c| c.hub_from != c.hub_to));
        assert_eq!(model.stats().num_via_columns, 9 * 2);
    }

    #[test]
    fn test_objective_coefficients() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();
        let pair = model.pair(id(1), id(3)).unwrap();

        assert_eq!(model.variable(pair.direct).objective, 1000.0);
        let via_12 = pair.via.iter().find(|c| c.hub_from == id(1)).unwrap();
        assert!((via_12.unit_cost - 7.5).abs() < 1e-12);
        assert!((model.variable(via_12.var).objective - 75.0).abs() < 1e-12);
        for (_, var) in model.open_vars() {
            assert_eq!(model.variable(*var).objective, 0.0);
            assert!(model.variable(*var).binary);
        }
    }

    #[test]
    fn test_valid_plan_is_feasible() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();

        let open: BTreeSet<_> = [id(2)].into_iter().collect();
        let routes: HashMap<_, _> = [((id(1), id(3)), (id(2), id(2)))].into_iter().collect();
        let x = model.encode(&open, &routes).unwrap();
        let eval = model.evaluate(&x, FEASIBILITY_TOLERANCE);
        assert!(eval.is_feasible(), "{:?}", eval.violations);
        assert!((eval.objective - 100.0).abs() < 1e-9);

        // All direct, no hubs: feasible at 1000
        let x = model.encode(&BTreeSet::new(), &HashMap::new()).unwrap();
        let eval = model.evaluate(&x, FEASIBILITY_TOLERANCE);
        assert!(eval.is_feasible());
        assert!((eval.objective - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_gating_and_budget_violations_detected() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();

        // Route via (1,2) with only hub 2 open: outbound gate on hub 1 breaks.
        let open: BTreeSet<_> = [id(2)].into_iter().collect();
        let routes: HashMap<_, _> = [((id(1), id(3)), (id(1), id(2)))].into_iter().collect();
        let x = model.encode(&open, &routes).unwrap();
        let eval = model.evaluate(&x, FEASIBILITY_TOLERANCE);
        assert_eq!(eval.violations.len(), 1);
        assert!(eval.violations[0].starts_with("gate_out[1,3,1]"));

        // Opening both hubs fixes gating but breaks the budget.
        let open: BTreeSet<_> = [id(1), id(2)].into_iter().collect();
        let x = model.encode(&open, &routes).unwrap();
        let eval = model.evaluate(&x, FEASIBILITY_TOLERANCE);
        assert_eq!(eval.violations.len(), 1);
        assert!(eval.violations[0].starts_with("hub_budget"));
    }

    #[test]
    fn test_exclusivity_violation_detected() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();
        let mut x = model.encode(&BTreeSet::new(), &HashMap::new()).unwrap();
        let pair = model.pair(id(2), id(1)).unwrap();
        x[pair.direct.index()] = 0.0;
        let eval = model.evaluate(&x, FEASIBILITY_TOLERANCE);
        assert_eq!(eval.violations, vec!["exclusivity[2,1]: lhs 0 vs rhs 1".to_string()]);
    }

    #[test]
    fn test_encode_rejects_pruned_column() {
        let net = small_network();
        let cfg = HubModelConfig::new(location_ids([1, 2]), 1, 0.5);
        let model = HubLocationModel::build(&net, &cfg).unwrap();
        let open: BTreeSet<_> = [id(1)].into_iter().collect();
        let routes: HashMap<_, _> = [((id(1), id(3)), (id(1), id(1)))].into_iter().collect();
        assert!(model.encode(&open, &routes).is_err());
    }

    #[test]
    fn test_missing_cost_fails_before_construction() {
        let ids = location_ids([1, 2]);
        let costs = LocationMatrix::from_rows(
            "cost",
            ids.clone(),
            vec![vec![Some(0.0), Some(1.0)], vec![None, Some(0.0)]],
        )
        .unwrap();
        let flows = LocationMatrix::from_fn("flow", ids.clone(), |_, _| 1.0).unwrap();
        let net = NetworkData::new(ids, costs, flows);
        let cfg = HubModelConfig::new(location_ids([1]), 1, 0.5);
        let err = HubLocationModel::build(&net, &cfg).unwrap_err();
        assert!(matches!(err, HubRouteError::DataIntegrity { ref table, .. } if table == "cost"));
    }
}
