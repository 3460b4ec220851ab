//! AssignForge Solver Engine
//!
//! This crate provides the capacitated assignment pipeline:
//! - Capacity expansion of a base cost matrix into slots
//! - Exact Hungarian (Kuhn–Munkres) solving with infeasibility diagnostics
//! - Interpretation of slot assignments back to resources
//! - The [`Assigner`] pipeline and parallel batch solving

pub mod assigner;
pub mod batch;
pub mod expansion;
pub mod hungarian;
pub mod interpret;
pub mod statistics;

pub use assigner::{assign_matrix, Assigner, AssignmentReport};
pub use batch::{solve_batch, solve_batch_with_statistics, BatchOutcome};
pub use expansion::{build, build_with_layout, ExpandedCosts, SlotLayout};
pub use hungarian::{min_cost, reduce, solve, Reduction, Solution};
pub use interpret::{interpret, interpret_uniform, AgentAssignment, AssignmentResult, ResourceGroup};
pub use statistics::{BatchStatistics, SolveStatistics};
