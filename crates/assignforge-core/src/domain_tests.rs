//! Tests for problem validation

use super::domain::*;
use super::error::AssignError;
use super::matrix::{CostMatrix, FORBIDDEN};

fn agents(n: usize) -> Vec<Agent> {
    (0..n).map(|i| Agent::new(format!("A{}", i))).collect()
}

fn resources(n: usize) -> Vec<Resource> {
    (0..n).map(|j| Resource::new(format!("R{}", j))).collect()
}

#[test]
fn test_valid_problem() {
    let costs = CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, FORBIDDEN]]).unwrap();
    let problem = AssignmentProblem::new(agents(2), resources(2), costs).unwrap();
    assert_eq!(problem.agent_count(), 2);
    assert_eq!(problem.resource_count(), 2);
    assert_eq!(problem.resource_index("R1"), Some(1));
    assert_eq!(problem.resource_index("R9"), None);
}

#[test]
fn test_empty_input() {
    let err = AssignmentProblem::new(vec![], resources(2), CostMatrix::filled(0, 2, 0.0))
        .unwrap_err();
    assert_eq!(
        err,
        AssignError::EmptyInput {
            agents: 0,
            resources: 2,
        }
    );

    let err =
        AssignmentProblem::new(agents(2), vec![], CostMatrix::filled(2, 0, 0.0)).unwrap_err();
    assert!(matches!(err, AssignError::EmptyInput { resources: 0, .. }));
}

#[test]
fn test_dimension_mismatch() {
    let err = AssignmentProblem::new(agents(3), resources(2), CostMatrix::filled(2, 2, 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        AssignError::Dimension {
            expected: 3,
            found: 2,
            ..
        }
    ));

    let err = AssignmentProblem::new(agents(2), resources(3), CostMatrix::filled(2, 2, 1.0))
        .unwrap_err();
    assert!(matches!(
        err,
        AssignError::Dimension {
            expected: 3,
            found: 2,
            ..
        }
    ));
}

#[test]
fn test_invalid_cost() {
    let costs = CostMatrix::from_rows(vec![vec![1.0, -2.0]]).unwrap();
    let err = AssignmentProblem::new(agents(1), resources(2), costs).unwrap_err();
    assert!(matches!(
        err,
        AssignError::InvalidCost {
            agent: 0,
            resource: 1,
            ..
        }
    ));
}

#[test]
fn test_zero_capacity_rejected() {
    let err = AssignmentProblem::new(
        agents(1),
        vec![Resource::with_capacity("R0", 0)],
        CostMatrix::filled(1, 1, 1.0),
    )
    .unwrap_err();
    assert_eq!(
        err,
        AssignError::InvalidCapacity {
            resource: 0,
            capacity: 0,
        }
    );
}

#[test]
fn test_resolved_capacities() {
    let problem = AssignmentProblem::new(
        agents(1),
        vec![Resource::with_capacity("R0", 3), Resource::new("R1")],
        CostMatrix::filled(1, 2, 1.0),
    )
    .unwrap();
    assert_eq!(problem.resolved_capacities(2), vec![3, 2]);
}

#[test]
fn test_from_matrix() {
    let problem =
        AssignmentProblem::from_matrix(CostMatrix::filled(2, 1, 5.0), &[2]).unwrap();
    assert_eq!(problem.agents()[1].name, "agent-1");
    assert_eq!(problem.resources()[0].capacity, Some(2));

    let err = AssignmentProblem::from_matrix(CostMatrix::filled(2, 1, 5.0), &[2, 2]).unwrap_err();
    assert!(matches!(err, AssignError::Dimension { .. }));
}
