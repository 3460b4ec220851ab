//! Parallel solving of independent problems.
//!
//! Each problem is solved by one task; a single solve is never split across
//! threads. Results keep the input order.

use std::time::Instant;

use assignforge_config::SolverConfig;
use assignforge_core::{AssignmentProblem, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{info, warn};

use crate::assigner::{AssignmentReport, Assigner};
use crate::statistics::BatchStatistics;

/// Per-problem outcomes of a batch with aggregate statistics.
#[derive(Debug)]
pub struct BatchOutcome {
    pub reports: Vec<Result<AssignmentReport>>,
    pub statistics: BatchStatistics,
}

/// Solves every problem under `config`, in parallel.
///
/// The pool size follows `config.batch.thread_count`.
pub fn solve_batch(problems: &[AssignmentProblem], config: &SolverConfig) -> Vec<Result<AssignmentReport>> {
    solve_batch_with_statistics(problems, config).reports
}

/// Like [`solve_batch`], also aggregating statistics.
pub fn solve_batch_with_statistics(problems: &[AssignmentProblem], config: &SolverConfig) -> BatchOutcome {
    let start = Instant::now();
    let threads = config.batch.thread_count.resolve(problems.len());
    info!(
        event = "batch_start",
        instance_count = problems.len(),
        thread_count = threads,
    );

    let assigner = Assigner::new(config.clone());
    let run = || -> Vec<Result<AssignmentReport>> {
        problems.par_iter().map(|p| assigner.assign(p)).collect()
    };
    let reports = match ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(run),
        Err(err) => {
            warn!(event = "pool_fallback", error = %err);
            run()
        }
    };

    let mut statistics = BatchStatistics::default();
    for report in &reports {
        statistics.record(report.as_ref().ok().map(|r| (&r.statistics, r.total_cost())));
    }
    statistics.wall_time = start.elapsed();

    info!(
        event = "batch_end",
        solved_count = statistics.solved_count,
        failed_count = statistics.failed_count,
        duration_ms = statistics.wall_time.as_millis() as u64,
    );

    BatchOutcome { reports, statistics }
}
