//! Hand-checked capacitated instances.

use assignforge_core::{CostMatrix, FORBIDDEN};

/// Expected outcome of a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    /// Optimal total cost.
    Total(f64),
    /// No finite-cost complete assignment exists.
    Infeasible,
}

/// A base cost matrix with capacities and its expected outcome.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub costs: CostMatrix,
    pub capacities: Vec<u32>,
    pub expected: Expected,
}

impl Scenario {
    fn new(name: &'static str, rows: Vec<Vec<f64>>, capacities: Vec<u32>, expected: Expected) -> Self {
        Self {
            name,
            costs: CostMatrix::from_rows(rows).expect("scenario rows have equal length"),
            capacities,
            expected,
        }
    }

    /// Three agents, three unit-capacity resources; optimum `1 + 2 + 2`.
    pub fn three_by_three() -> Self {
        Self::new(
            "three_by_three",
            vec![
                vec![4.0, 1.0, 3.0],
                vec![2.0, 0.0, 5.0],
                vec![3.0, 2.0, 2.0],
            ],
            vec![1, 1, 1],
            Expected::Total(5.0),
        )
    }

    /// Two agents sharing one resource of capacity two.
    pub fn shared_resource() -> Self {
        Self::new(
            "shared_resource",
            vec![vec![10.0], vec![20.0]],
            vec![2],
            Expected::Total(30.0),
        )
    }

    /// Three agents, two unit-capacity resources.
    pub fn insufficient_capacity() -> Self {
        Self::new(
            "insufficient_capacity",
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![1, 1],
            Expected::Infeasible,
        )
    }

    /// The zero-cost completion is forbidden; the optimum detours through
    /// dearer pairs.
    pub fn forbidden_detour() -> Self {
        Self::new(
            "forbidden_detour",
            vec![vec![FORBIDDEN, 5.0], vec![0.0, 0.0]],
            vec![1, 1],
            Expected::Total(5.0),
        )
    }

    /// Both agents can only use the same unit-capacity resource.
    pub fn forbidden_dead_end() -> Self {
        Self::new(
            "forbidden_dead_end",
            vec![vec![1.0, FORBIDDEN], vec![2.0, FORBIDDEN]],
            vec![1, 1],
            Expected::Infeasible,
        )
    }

    /// Differentiated capacities: the cheap resource fills up first.
    pub fn differentiated_capacity() -> Self {
        Self::new(
            "differentiated_capacity",
            vec![
                vec![1.0, 9.0, 5.0],
                vec![1.0, 8.0, 6.0],
                vec![2.0, 7.0, 9.0],
                vec![1.0, 9.0, 4.0],
            ],
            vec![2, 1, 2],
            // agents 1,2 -> r0 (1 + 2), agents 0,3 -> r2 (5 + 4)
            Expected::Total(12.0),
        )
    }

    /// All scenarios above.
    pub fn all() -> Vec<Self> {
        vec![
            Self::three_by_three(),
            Self::shared_resource(),
            Self::insufficient_capacity(),
            Self::forbidden_detour(),
            Self::forbidden_dead_end(),
            Self::differentiated_capacity(),
        ]
    }
}
