//! AssignForge Core - Core types for capacitated assignment
//!
//! This crate provides the fundamental abstractions for AssignForge:
//! - Cost matrices and the read-only `CostSource` access trait
//! - Domain types for agents, capacitated resources and problems
//! - The error taxonomy shared by every crate

pub mod domain;
pub mod error;
pub mod matrix;

#[cfg(test)]
mod domain_tests;

pub use domain::{Agent, AssignmentProblem, Resource};
pub use error::{AssignError, Infeasibility, Result};
pub use matrix::{is_forbidden, CostMatrix, CostSource, Transposed, FORBIDDEN};
