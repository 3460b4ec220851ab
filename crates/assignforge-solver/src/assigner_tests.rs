//! Tests for the capacitated assignment pipeline.

use super::*;
use assignforge_core::{Agent, AssignError, Resource};
use assignforge_test::brute::brute_force_capacitated;
use assignforge_test::random::{random_capacities, random_sparse_matrix};
use assignforge_test::{Expected, Scenario};
use proptest::prelude::*;

const LAYOUTS: [SlotLayoutKind; 2] = [SlotLayoutKind::Strided, SlotLayoutKind::Compact];

fn problem(rows: Vec<Vec<f64>>, capacities: &[u32]) -> AssignmentProblem {
    AssignmentProblem::from_matrix(CostMatrix::from_rows(rows).unwrap(), capacities).unwrap()
}

#[test]
fn test_scenarios_under_every_layout() {
    for scenario in Scenario::all() {
        let problem =
            AssignmentProblem::from_matrix(scenario.costs.clone(), &scenario.capacities).unwrap();
        for layout in LAYOUTS {
            for materialize in [false, true] {
                let config = SolverConfig::default()
                    .with_layout(layout)
                    .with_materialize(materialize);
                let outcome = Assigner::new(config).assign(&problem);
                match (scenario.expected, outcome) {
                    (Expected::Total(total), Ok(report)) => {
                        assert_eq!(report.total_cost(), total, "{} ({:?})", scenario.name, layout);
                        assert_eq!(report.result.len(), problem.agent_count());
                        assert!(report.result.verify_capacity().is_ok());
                    }
                    (Expected::Infeasible, Err(err)) => {
                        assert!(err.is_infeasible(), "{}: {:?}", scenario.name, err);
                    }
                    (expected, outcome) => {
                        panic!("{}: expected {:?}, got {:?}", scenario.name, expected, outcome)
                    }
                }
            }
        }
    }
}

#[test]
fn test_insufficient_capacity_is_reported_before_solving() {
    let problem = problem(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]], &[1, 1]);
    assert_eq!(
        Assigner::default().assign(&problem).unwrap_err(),
        AssignError::Infeasible(Infeasibility::InsufficientCapacity {
            agents: 3,
            slots: 2,
        })
    );
}

#[test]
fn test_shared_resource_grouping() {
    let report = Assigner::default()
        .assign(&problem(vec![vec![10.0], vec![20.0]], &[2]))
        .unwrap();
    let groups = report.result.by_resource();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].agents, vec![0, 1]);
    assert_eq!(report.mean_cost(), 15.0);
    assert_eq!(report.slot_count, 2);
}

#[test]
fn test_uniform_policy_overrides_declared_capacity() {
    let problem = problem(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]], &[1, 1]);
    let report = Assigner::new(SolverConfig::default().with_uniform_capacity(2))
        .assign(&problem)
        .unwrap();
    assert_eq!(report.capacities, vec![2, 2]);
    // Two agents share resource 0, one pays the +1 of resource 1.
    assert_eq!(report.total_cost(), 10.0);
    assert_eq!(report.result.load_of(0), 2);
    assert_eq!(report.result.load_of(1), 1);
}

#[test]
fn test_default_capacity_for_undeclared_resources() {
    let problem = AssignmentProblem::new(
        vec![Agent::new("a"), Agent::new("b"), Agent::new("c")],
        vec![Resource::new("north"), Resource::new("south")],
        CostMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).unwrap(),
    )
    .unwrap();

    assert!(Assigner::default().assign(&problem).unwrap_err().is_infeasible());

    let report = Assigner::new(SolverConfig::default().with_default_capacity(2))
        .assign(&problem)
        .unwrap();
    assert_eq!(report.total_cost(), 10.0);
}

#[test]
fn test_forbidden_threshold() {
    let problem = problem(vec![vec![1.0, 60.0], vec![2.0, 70.0]], &[1, 1]);
    assert_eq!(Assigner::default().assign(&problem).unwrap().total_cost(), 62.0);

    let strict = Assigner::new(SolverConfig::default().with_forbidden_threshold(50.0));
    assert!(strict.assign(&problem).unwrap_err().is_infeasible());
}

#[test]
fn test_differentiated_capacity_loads() {
    let scenario = Scenario::differentiated_capacity();
    let problem = AssignmentProblem::from_matrix(scenario.costs, &scenario.capacities).unwrap();

    let strided = Assigner::default().assign(&problem).unwrap();
    assert_eq!(strided.slot_count, 6);
    assert_eq!(strided.result.load_of(0), 2);
    assert_eq!(strided.result.load_of(1), 0);
    assert_eq!(strided.result.load_of(2), 2);
    assert_eq!(strided.result.assignment_of(3).unwrap().resource, 2);

    let compact = Assigner::new(SolverConfig::default().with_layout(SlotLayoutKind::Compact))
        .assign(&problem)
        .unwrap();
    assert_eq!(compact.slot_count, 5);
    assert_eq!(compact.total_cost(), strided.total_cost());
}

#[test]
fn test_report_is_certified() {
    let report = Assigner::default()
        .assign(&problem(
            vec![vec![4.0, 1.0, 3.0], vec![2.0, 0.0, 5.0], vec![3.0, 2.0, 2.0]],
            &[1, 1, 1],
        ))
        .unwrap();
    assert_eq!(report.statistics.augmentations, 3);
    assert!((report.dual_bound - report.total_cost()).abs() < 1e-9);
    assert_eq!(report.layout, SlotLayoutKind::Strided);
}

#[test]
fn test_assign_matrix() {
    let report = assign_matrix(
        CostMatrix::from_rows(vec![vec![10.0], vec![20.0]]).unwrap(),
        &[2],
    )
    .unwrap();
    assert_eq!(report.total_cost(), 30.0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn prop_capacity_conservation(
        agents in 1usize..=5,
        resources in 1usize..=3,
        seed in any::<u64>(),
    ) {
        let capacities = random_capacities(seed, resources, 3);
        let costs = random_sparse_matrix(seed.wrapping_add(1), agents, resources, 20, 0.2);
        let best = brute_force_capacitated(&costs, &capacities);
        let problem = AssignmentProblem::from_matrix(costs, &capacities).unwrap();

        for layout in LAYOUTS {
            let assigner = Assigner::new(SolverConfig::default().with_layout(layout));
            match (assigner.assign(&problem), best) {
                (Ok(report), Some(best)) => {
                    prop_assert_eq!(report.total_cost(), best);
                    prop_assert_eq!(report.result.len(), agents);
                    for group in report.result.by_resource() {
                        prop_assert!(group.agents.len() <= capacities[group.resource] as usize);
                    }
                }
                (Err(err), None) => prop_assert!(err.is_infeasible()),
                (outcome, best) => {
                    prop_assert!(false, "{:?}: got {:?}, brute force {:?}", layout, outcome, best);
                }
            }
        }
    }
}
