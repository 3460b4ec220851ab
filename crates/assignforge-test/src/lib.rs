//! Shared test fixtures for AssignForge crates.
//!
//! This crate provides data and pure functions for testing.
//! It does NOT depend on `assignforge-solver` to avoid circular dependencies.
//!
//! - [`scenarios`] - Hand-checked instances with known optima
//! - [`brute`] - Exhaustive enumeration oracle for small matrices
//! - [`random`] - Seeded random cost matrices and capacities
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! assignforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use assignforge_test::brute::brute_force_min_cost;
//! use assignforge_test::random::random_matrix;
//! use assignforge_test::scenarios::Scenario;
//! ```

pub mod brute;
pub mod random;
pub mod scenarios;

pub use brute::{brute_force_capacitated, brute_force_min_cost};
pub use random::{random_capacities, random_matrix, random_sparse_matrix};
pub use scenarios::{Expected, Scenario};
