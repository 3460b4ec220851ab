//! Exhaustive enumeration oracle.
//!
//! Tries every injective map from the shorter side of the matrix into the
//! longer one. Only usable for tiny instances (a 6×6 matrix has 720
//! assignments, 8×8 has 40 320).

use assignforge_core::{is_forbidden, CostMatrix};

/// Minimum total cost over all complete assignments, or `None` if every
/// complete assignment uses a forbidden entry.
///
/// When `rows <= cols` every row is assigned; otherwise every column is.
pub fn brute_force_min_cost(costs: &CostMatrix) -> Option<f64> {
    if costs.rows() > costs.cols() {
        return brute_force_min_cost(&costs.transpose());
    }
    let mut used = vec![false; costs.cols()];
    let mut best: Option<f64> = None;
    search(costs, 0, 0.0, &mut used, &mut best);
    best
}

fn search(costs: &CostMatrix, row: usize, acc: f64, used: &mut [bool], best: &mut Option<f64>) {
    if row == costs.rows() {
        if best.map_or(true, |b| acc < b) {
            *best = Some(acc);
        }
        return;
    }
    for col in 0..costs.cols() {
        let c = costs.get(row, col);
        if used[col] || is_forbidden(c) {
            continue;
        }
        used[col] = true;
        search(costs, row + 1, acc + c, used, best);
        used[col] = false;
    }
}

/// Minimum total cost of assigning every agent (row) to a resource (column)
/// without exceeding `capacities`, or `None` if no finite assignment exists.
///
/// Enumerates resource choices per agent directly, without slot expansion.
pub fn brute_force_capacitated(costs: &CostMatrix, capacities: &[u32]) -> Option<f64> {
    let mut remaining = capacities.to_vec();
    let mut best: Option<f64> = None;
    search_capacitated(costs, 0, 0.0, &mut remaining, &mut best);
    best
}

fn search_capacitated(
    costs: &CostMatrix,
    agent: usize,
    acc: f64,
    remaining: &mut [u32],
    best: &mut Option<f64>,
) {
    if agent == costs.rows() {
        if best.map_or(true, |b| acc < b) {
            *best = Some(acc);
        }
        return;
    }
    for resource in 0..costs.cols() {
        let c = costs.get(agent, resource);
        if remaining[resource] == 0 || is_forbidden(c) {
            continue;
        }
        remaining[resource] -= 1;
        search_capacitated(costs, agent + 1, acc + c, remaining, best);
        remaining[resource] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assignforge_core::FORBIDDEN;

    #[test]
    fn test_square() {
        let m = CostMatrix::from_rows(vec![
            vec![4.0, 1.0, 3.0],
            vec![2.0, 0.0, 5.0],
            vec![3.0, 2.0, 2.0],
        ])
        .unwrap();
        assert_eq!(brute_force_min_cost(&m), Some(5.0));
    }

    #[test]
    fn test_tall_uses_every_column() {
        let m = CostMatrix::from_rows(vec![vec![5.0], vec![1.0], vec![3.0]]).unwrap();
        assert_eq!(brute_force_min_cost(&m), Some(1.0));
    }

    #[test]
    fn test_forbidden_only() {
        let m = CostMatrix::from_rows(vec![vec![FORBIDDEN, 1.0], vec![FORBIDDEN, 2.0]]).unwrap();
        assert_eq!(brute_force_min_cost(&m), None);
    }

    #[test]
    fn test_capacitated() {
        let m = CostMatrix::from_rows(vec![vec![10.0], vec![20.0]]).unwrap();
        assert_eq!(brute_force_capacitated(&m, &[2]), Some(30.0));
        assert_eq!(brute_force_capacitated(&m, &[1]), None);
    }
}
