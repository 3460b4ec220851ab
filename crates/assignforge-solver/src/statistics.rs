//! Solver statistics collection and reporting.
//!
//! Counters describing the work done by a single Hungarian solve, and an
//! aggregate over a batch of independent solves.

use std::time::Duration;

/// Statistics for one solve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolveStatistics {
    /// Rows of the matrix as given (before any transposition).
    pub rows: usize,
    /// Columns of the matrix as given.
    pub cols: usize,
    /// Whether the solver worked on the transpose (rows > cols).
    pub transposed: bool,
    /// Number of augmenting paths applied (one per assigned row).
    pub augmentations: u64,
    /// Number of dual adjustments with a non-zero step.
    pub dual_adjustments: u64,
    /// Number of columns added to alternating trees.
    pub tree_extensions: u64,
    /// Wall time spent solving.
    pub duration: Duration,
}

impl SolveStatistics {
    /// Creates empty statistics for a `rows × cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Average alternating-tree size per augmentation.
    pub fn avg_tree_extensions(&self) -> f64 {
        if self.augmentations == 0 {
            0.0
        } else {
            self.tree_extensions as f64 / self.augmentations as f64
        }
    }
}

/// Aggregate statistics over a batch of solves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchStatistics {
    /// Number of instances submitted.
    pub instance_count: usize,
    /// Number of instances solved to optimality.
    pub solved_count: usize,
    /// Number of instances that failed (invalid or infeasible).
    pub failed_count: usize,
    /// Sum of optimal total costs over solved instances.
    pub total_cost: f64,
    /// Sum of per-instance solve durations.
    pub solve_time: Duration,
    /// Wall time of the whole batch.
    pub wall_time: Duration,
}

impl BatchStatistics {
    /// Records the outcome of one instance.
    pub fn record(&mut self, outcome: Option<(&SolveStatistics, f64)>) {
        self.instance_count += 1;
        match outcome {
            Some((stats, cost)) => {
                self.solved_count += 1;
                self.total_cost += cost;
                self.solve_time += stats.duration;
            }
            None => self.failed_count += 1,
        }
    }

    /// Fraction of instances solved.
    pub fn success_rate(&self) -> f64 {
        if self.instance_count == 0 {
            0.0
        } else {
            self.solved_count as f64 / self.instance_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avg_tree_extensions() {
        let mut stats = SolveStatistics::new(3, 4);
        assert_eq!(stats.avg_tree_extensions(), 0.0);
        stats.augmentations = 3;
        stats.tree_extensions = 6;
        assert!((stats.avg_tree_extensions() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_batch_record() {
        let solve = SolveStatistics {
            duration: Duration::from_millis(5),
            ..SolveStatistics::new(2, 2)
        };
        let mut batch = BatchStatistics::default();
        batch.record(Some((&solve, 10.0)));
        batch.record(Some((&solve, 2.5)));
        batch.record(None);

        assert_eq!(batch.instance_count, 3);
        assert_eq!(batch.solved_count, 2);
        assert_eq!(batch.failed_count, 1);
        assert_eq!(batch.total_cost, 12.5);
        assert_eq!(batch.solve_time, Duration::from_millis(10));
        assert!((batch.success_rate() - 2.0 / 3.0).abs() < 1e-12);
    }
}
