//! Exact minimum-cost assignment (Kuhn–Munkres / Hungarian algorithm).
//!
//! The solver keeps a dual potential per row (`u`) and per column (`v`)
//! with `u[i] + v[j] <= c[i][j]` for every usable pair. Rows are inserted one
//! at a time; each insertion grows an alternating tree over zero reduced-cost
//! edges, raising the tree's row potentials and lowering its column
//! potentials by the minimum uncovered reduced cost until a free column is
//! reached, then flips the path. Every matched pair has zero reduced cost,
//! so the final matching is optimal by complementary slackness.
//!
//! - Work is `O(n²m)` for `n <= m`; taller matrices are solved on their
//!   transpose.
//! - Forbidden (infinite) entries are never relaxed. If a tree can no longer
//!   grow without one, its rows violate Hall's condition and the problem is
//!   infeasible.
//!
//! # Example
//!
//! ```
//! use assignforge_core::CostMatrix;
//! use assignforge_solver::hungarian;
//!
//! let costs = CostMatrix::from_rows(vec![
//!     vec![4.0, 1.0, 3.0],
//!     vec![2.0, 0.0, 5.0],
//!     vec![3.0, 2.0, 2.0],
//! ]).unwrap();
//!
//! let solution = hungarian::solve(&costs).unwrap();
//! assert_eq!(solution.total_cost, 5.0);
//! assert_eq!(solution.pairs, vec![(0, 1), (1, 0), (2, 2)]);
//! ```

mod reduce;

use std::time::Instant;

use assignforge_core::{
    is_forbidden, AssignError, CostSource, Infeasibility, Result, Transposed,
};
use tracing::{debug, trace};

use crate::statistics::SolveStatistics;

pub use reduce::{reduce, Reduction};

const INF: f64 = f64::INFINITY;

// Column 0 is the virtual root of every alternating tree.
const ROOT: usize = 0;
const UNMATCHED: usize = 0;

/// An optimal assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// `(row, col)` pairs sorted by row. One pair per row when
    /// `rows <= cols`, otherwise one pair per column.
    pub pairs: Vec<(usize, usize)>,
    /// Sum of the original costs of the selected pairs.
    pub total_cost: f64,
    /// Value of the final dual solution. Equal to `total_cost` up to
    /// rounding, which certifies optimality.
    pub dual_bound: f64,
    /// Work counters for this solve.
    pub statistics: SolveStatistics,
}

impl Solution {
    /// Column assigned to `row`, if any.
    pub fn col_of(&self, row: usize) -> Option<usize> {
        self.pairs
            .binary_search_by_key(&row, |&(r, _)| r)
            .ok()
            .map(|i| self.pairs[i].1)
    }

    /// Returns true if the primal and dual objectives agree within `tolerance`.
    pub fn is_certified(&self, tolerance: f64) -> bool {
        let scale = self.total_cost.abs().max(1.0);
        (self.total_cost - self.dual_bound).abs() <= tolerance * scale
    }
}

/// Solves the assignment problem for any rectangular cost table.
///
/// # Errors
///
/// - [`AssignError::EmptyInput`] if the table has no rows or no columns
/// - [`AssignError::InvalidCost`] for a NaN or negative-infinite entry
/// - [`AssignError::Infeasible`] if every complete assignment uses a
///   forbidden entry, or if the optimum's total overflows to infinity.
///   Very large finite sentinels should be marked forbidden instead.
pub fn solve<C: CostSource>(costs: &C) -> Result<Solution> {
    let start = Instant::now();
    let (rows, cols) = (costs.rows(), costs.cols());
    if costs.is_empty() {
        return Err(AssignError::EmptyInput {
            agents: rows,
            resources: cols,
        });
    }
    check_costs(costs)?;

    let transposed = rows > cols;
    debug!(event = "solve_start", rows, cols, transposed);

    let mut statistics = SolveStatistics::new(rows, cols);
    statistics.transposed = transposed;

    let (pairs, dual_bound) = if transposed {
        let view = Transposed(costs);
        let (row_to_col, dual) =
            run(&view, &mut statistics).map_err(transpose_reason)?;
        let mut pairs: Vec<(usize, usize)> = row_to_col
            .into_iter()
            .enumerate()
            .map(|(col, row)| (row, col))
            .collect();
        pairs.sort_unstable();
        (pairs, dual)
    } else {
        let (row_to_col, dual) = run(costs, &mut statistics)?;
        (row_to_col.into_iter().enumerate().collect(), dual)
    };

    let total_cost: f64 = pairs.iter().map(|&(r, c)| costs.cost(r, c)).sum();
    if !total_cost.is_finite() {
        return Err(Infeasibility::CostOverflow.into());
    }
    statistics.duration = start.elapsed();

    debug!(
        event = "solve_end",
        total_cost,
        dual_bound,
        augmentations = statistics.augmentations,
        dual_adjustments = statistics.dual_adjustments,
        duration_us = statistics.duration.as_micros() as u64,
    );

    Ok(Solution {
        pairs,
        total_cost,
        dual_bound,
        statistics,
    })
}

/// Returns the total cost of the optimal assignment.
pub fn min_cost<C: CostSource>(costs: &C) -> Result<f64> {
    solve(costs).map(|s| s.total_cost)
}

fn check_costs<C: CostSource>(costs: &C) -> Result<()> {
    for r in 0..costs.rows() {
        for c in 0..costs.cols() {
            let value = costs.cost(r, c);
            if value.is_nan() || value == f64::NEG_INFINITY {
                return Err(AssignError::InvalidCost {
                    agent: r,
                    resource: c,
                    value,
                });
            }
        }
    }
    Ok(())
}

// Diagnostics from the transposed run are mapped back to the original table.
fn transpose_reason(reason: AssignError) -> AssignError {
    match reason {
        AssignError::Infeasible(Infeasibility::HallViolation {
            agents,
            reachable_slots,
        }) => AssignError::Infeasible(Infeasibility::SlotHallViolation {
            slots: agents,
            reachable_agents: reachable_slots,
        }),
        AssignError::Infeasible(Infeasibility::UnreachableAgent { agent }) => {
            AssignError::Infeasible(Infeasibility::UnreachableSlot { slot: agent })
        }
        AssignError::Infeasible(Infeasibility::UnreachableSlot { slot }) => {
            AssignError::Infeasible(Infeasibility::UnreachableAgent { agent: slot })
        }
        other => other,
    }
}

/// Core loop for `rows <= cols`. Returns the column of every row and the
/// dual objective.
fn run<C: CostSource>(costs: &C, statistics: &mut SolveStatistics) -> Result<(Vec<usize>, f64)> {
    let n = costs.rows();
    let m = costs.cols();
    debug_assert!(n <= m);

    // 1-based potentials; index 0 belongs to the virtual root.
    let mut u = vec![0.0; n + 1];
    let mut v = vec![0.0; m + 1];
    initial_duals(costs, &mut u, &mut v)?;

    // owner[j]: 1-based row matched to column j.
    let mut owner = vec![UNMATCHED; m + 1];
    let mut way = vec![ROOT; m + 1];
    let mut min_slack = vec![INF; m + 1];
    let mut in_tree = vec![false; m + 1];

    for row in 1..=n {
        owner[ROOT] = row;
        let mut j0 = ROOT;
        min_slack.fill(INF);
        in_tree.fill(false);

        // Grow the alternating tree until it reaches a free column.
        loop {
            in_tree[j0] = true;
            statistics.tree_extensions += 1;
            let i0 = owner[j0];
            let mut delta = INF;
            let mut j1 = ROOT;

            for j in 1..=m {
                if in_tree[j] {
                    continue;
                }
                let c = costs.cost(i0 - 1, j - 1);
                if !is_forbidden(c) {
                    let slack = c - u[i0] - v[j];
                    if slack < min_slack[j] {
                        min_slack[j] = slack;
                        way[j] = j0;
                    }
                }
                if min_slack[j] < delta {
                    delta = min_slack[j];
                    j1 = j;
                }
            }

            if j1 == ROOT {
                return Err(hall_violation(&owner, &in_tree).into());
            }

            for j in 0..=m {
                if in_tree[j] {
                    u[owner[j]] += delta;
                    v[j] -= delta;
                } else {
                    min_slack[j] -= delta;
                }
            }
            if delta > 0.0 {
                statistics.dual_adjustments += 1;
            }

            j0 = j1;
            if owner[j0] == UNMATCHED {
                break;
            }
        }

        // Flip the augmenting path back to the root.
        let mut path_len = 0usize;
        while j0 != ROOT {
            let prev = way[j0];
            owner[j0] = owner[prev];
            j0 = prev;
            path_len += 1;
        }
        statistics.augmentations += 1;
        trace!(event = "augment", row = row - 1, path_len);
    }

    let mut row_to_col = vec![0usize; n];
    for j in 1..=m {
        if owner[j] != UNMATCHED {
            row_to_col[owner[j] - 1] = j - 1;
        }
    }
    let dual = u[1..].iter().sum::<f64>() + v[1..].iter().sum::<f64>();
    Ok((row_to_col, dual))
}

/// Row reduction, plus column reduction when the table is square.
///
/// For `n < m` columns may stay unmatched, so their potentials must stay
/// non-positive; only rows are reduced.
fn initial_duals<C: CostSource>(costs: &C, u: &mut [f64], v: &mut [f64]) -> Result<()> {
    let (n, m) = (costs.rows(), costs.cols());
    for i in 0..n {
        let min = (0..m).map(|j| costs.cost(i, j)).fold(INF, f64::min);
        if is_forbidden(min) {
            return Err(Infeasibility::UnreachableAgent { agent: i }.into());
        }
        u[i + 1] = min;
    }
    if n == m {
        for j in 0..m {
            let min = (0..n)
                .map(|i| costs.cost(i, j) - u[i + 1])
                .fold(INF, f64::min);
            if is_forbidden(min) {
                return Err(Infeasibility::UnreachableSlot { slot: j }.into());
            }
            v[j + 1] = min;
        }
    }
    Ok(())
}

fn hall_violation(owner: &[usize], in_tree: &[bool]) -> Infeasibility {
    let mut agents: Vec<usize> = in_tree
        .iter()
        .enumerate()
        .filter(|&(_, &t)| t)
        .map(|(j, _)| owner[j] - 1)
        .collect();
    agents.sort_unstable();
    let reachable_slots = in_tree
        .iter()
        .enumerate()
        .skip(1)
        .filter(|&(_, &t)| t)
        .map(|(j, _)| j - 1)
        .collect();
    Infeasibility::HallViolation {
        agents,
        reachable_slots,
    }
}
