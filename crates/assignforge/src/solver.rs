//! Solver entry point that hides configuration wiring.

use assignforge_config::SolverConfig;
use assignforge_core::{AssignmentProblem, Result};
use assignforge_solver::{Assigner, AssignmentReport};

/// Configuration file read by [`run_assigner`] from the working directory.
pub const CONFIG_FILE: &str = "assign.toml";

/// Solves `problem` with the configuration in [`CONFIG_FILE`], or defaults
/// if the file is missing or invalid.
pub fn run_assigner(problem: &AssignmentProblem) -> Result<AssignmentReport> {
    #[cfg(feature = "console")]
    crate::console::init();

    let config = SolverConfig::load(CONFIG_FILE).unwrap_or_default();
    Assigner::new(config).assign(problem)
}
