//! End-to-end pipeline for one capacitated problem.
//!
//! resolved capacities → slot layout → expansion → Hungarian solve →
//! interpretation.

use std::borrow::Cow;
use std::time::Instant;

use assignforge_config::{SlotLayoutKind, SolverConfig};
use assignforge_core::{AssignmentProblem, CostMatrix, Infeasibility, Result};
use tracing::info;

use crate::expansion::{build_with_layout, ExpandedCosts, SlotLayout};
use crate::hungarian::{self, Solution};
use crate::interpret::{interpret, AssignmentResult};
use crate::statistics::SolveStatistics;

/// Outcome of [`Assigner::assign`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReport {
    /// Per-agent assignments and aggregates.
    pub result: AssignmentResult,
    /// Capacities after applying the capacity policy.
    pub capacities: Vec<u32>,
    /// Layout the problem was expanded with.
    pub layout: SlotLayoutKind,
    /// Expanded column count, surplus slots included.
    pub slot_count: usize,
    /// Dual objective of the final solve.
    pub dual_bound: f64,
    pub statistics: SolveStatistics,
}

impl AssignmentReport {
    pub fn total_cost(&self) -> f64 {
        self.result.total_cost()
    }

    pub fn mean_cost(&self) -> f64 {
        self.result.mean_cost()
    }
}

/// Solves capacitated assignment problems under one configuration.
///
/// # Example
///
/// ```
/// use assignforge_config::SolverConfig;
/// use assignforge_core::{Agent, AssignmentProblem, CostMatrix, Resource};
/// use assignforge_solver::Assigner;
///
/// let problem = AssignmentProblem::new(
///     vec![Agent::new("Ann"), Agent::new("Bob")],
///     vec![Resource::with_capacity("North", 2)],
///     CostMatrix::from_rows(vec![vec![10.0], vec![20.0]]).unwrap(),
/// )
/// .unwrap();
///
/// let report = Assigner::new(SolverConfig::default()).assign(&problem).unwrap();
/// assert_eq!(report.total_cost(), 30.0);
/// assert_eq!(report.result.load_of(0), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assigner {
    config: SolverConfig,
}

impl Assigner {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Capacities of `problem` under the configured policy.
    pub fn capacities(&self, problem: &AssignmentProblem) -> Vec<u32> {
        problem
            .resources()
            .iter()
            .map(|r| self.config.capacity.capacity_for(r.capacity))
            .collect()
    }

    /// Assigns every agent of `problem` to a resource at minimum total cost.
    ///
    /// # Errors
    ///
    /// - [`Infeasibility::InsufficientCapacity`] if there are more agents
    ///   than usable slots
    /// - any other [`Infeasibility`] if forbidden pairs leave no complete
    ///   assignment; slot indices refer to the configured layout
    /// - [`assignforge_core::AssignError::InvalidCapacity`] if the capacity
    ///   policy resolves to zero
    pub fn assign(&self, problem: &AssignmentProblem) -> Result<AssignmentReport> {
        let start = Instant::now();
        let capacities = self.capacities(problem);
        let layout = SlotLayout::new(self.config.expansion.layout, &capacities)?;

        let agents = problem.agent_count();
        let usable = layout.usable_slot_count();
        if agents > usable {
            return Err(Infeasibility::InsufficientCapacity {
                agents,
                slots: usable,
            }
            .into());
        }

        info!(
            event = "assign_start",
            agent_count = agents,
            resource_count = problem.resource_count(),
            slot_count = layout.slot_count(),
            layout = ?layout.kind(),
        );

        let costs = self.effective_costs(problem.costs());
        let solution = self.solve_expanded(&costs, &layout)?;
        let result = interpret(&solution.pairs, problem.costs(), &layout)?;

        info!(
            event = "assign_end",
            total_cost = result.total_cost(),
            augmentations = solution.statistics.augmentations,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        Ok(AssignmentReport {
            result,
            capacities,
            layout: layout.kind(),
            slot_count: layout.slot_count(),
            dual_bound: solution.dual_bound,
            statistics: solution.statistics,
        })
    }

    // Entries at or above the threshold become forbidden.
    fn effective_costs<'a>(&self, costs: &'a CostMatrix) -> Cow<'a, CostMatrix> {
        match self.config.forbidden_threshold {
            Some(threshold) => {
                let mut owned = costs.clone();
                owned.forbid_at_or_above(threshold);
                Cow::Owned(owned)
            }
            None => Cow::Borrowed(costs),
        }
    }

    fn solve_expanded(&self, costs: &CostMatrix, layout: &SlotLayout) -> Result<Solution> {
        if self.config.expansion.materialize {
            hungarian::solve(&build_with_layout(costs, layout)?)
        } else {
            hungarian::solve(&ExpandedCosts::new(costs, layout)?)
        }
    }
}

/// Solves `base_costs` with `capacity_per_resource` using the default
/// configuration.
pub fn assign_matrix(base_costs: CostMatrix, capacity_per_resource: &[u32]) -> Result<AssignmentReport> {
    let problem = AssignmentProblem::from_matrix(base_costs, capacity_per_resource)?;
    Assigner::default().assign(&problem)
}

#[cfg(test)]
#[path = "assigner_tests.rs"]
mod tests;
