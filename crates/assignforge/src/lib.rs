//! AssignForge - Exact Capacitated Assignment in Rust
//!
//! Assign every agent to a resource with limited capacity so that the total
//! cost is minimal.
//!
//! # Example
//!
//! ```rust
//! use assignforge::prelude::*;
//!
//! let problem = AssignmentProblem::new(
//!     vec![Agent::new("Ann"), Agent::new("Bob"), Agent::new("Cid")],
//!     vec![Resource::with_capacity("North", 2), Resource::with_capacity("South", 1)],
//!     CostMatrix::from_rows(vec![
//!         vec![10.0, 30.0],
//!         vec![20.0, 15.0],
//!         vec![12.0, 40.0],
//!     ])
//!     .unwrap(),
//! )
//! .unwrap();
//!
//! let report = Assigner::new(SolverConfig::default()).assign(&problem).unwrap();
//! assert_eq!(report.total_cost(), 37.0);
//! assert_eq!(report.result.load_of(0), 2);
//! ```

pub use assignforge_core::{
    is_forbidden, Agent, AssignError, AssignmentProblem, CostMatrix, CostSource, Infeasibility,
    Resource, Result, FORBIDDEN,
};

pub use assignforge_config::{
    CapacityPolicy, ConfigError, SlotLayoutKind, SolverConfig, ThreadCount,
};

pub use assignforge_solver::{
    assign_matrix, expansion, hungarian, interpret, solve_batch, solve_batch_with_statistics,
    AgentAssignment, Assigner, AssignmentReport, AssignmentResult, BatchOutcome,
    BatchStatistics, ResourceGroup, SlotLayout, SolveStatistics,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{run_assigner, CONFIG_FILE};

pub mod prelude {
    pub use super::{
        Agent, AssignError, Assigner, AssignmentProblem, AssignmentReport, CostMatrix,
        Infeasibility, Resource, SolverConfig, FORBIDDEN,
    };
    pub use super::{run_assigner, solve_batch};
}
