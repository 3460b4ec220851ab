//! Problem domain: agents, capacitated resources and the validated problem.
//!
//! Resources form an explicit, ordered schema supplied at construction
//! time. Column `j` of the cost matrix always belongs to `resources[j]`.

use crate::error::{AssignError, Result};
use crate::matrix::CostMatrix;

/// An agent to be assigned exactly once (e.g. an employee).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub name: String,
}

impl Agent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A resource accepting up to `capacity` agents (e.g. a branch location).
///
/// A resource without a declared capacity takes the configured default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resource {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<u32>,
}

impl Resource {
    /// Creates a resource without a declared capacity.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity: None,
        }
    }

    /// Creates a resource with a declared capacity.
    pub fn with_capacity(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            name: name.into(),
            capacity: Some(capacity),
        }
    }
}

/// A validated capacitated assignment instance.
///
/// # Example
///
/// ```
/// use assignforge_core::{Agent, AssignmentProblem, CostMatrix, Resource};
///
/// let problem = AssignmentProblem::new(
///     vec![Agent::new("Ann"), Agent::new("Bob")],
///     vec![Resource::with_capacity("North", 2)],
///     CostMatrix::from_rows(vec![vec![10.0], vec![20.0]]).unwrap(),
/// )
/// .unwrap();
///
/// assert_eq!(problem.agent_count(), 2);
/// assert_eq!(problem.resolved_capacities(1), vec![2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentProblem {
    agents: Vec<Agent>,
    resources: Vec<Resource>,
    costs: CostMatrix,
}

impl AssignmentProblem {
    /// Creates a problem after checking it against the error taxonomy.
    ///
    /// # Errors
    ///
    /// - [`AssignError::EmptyInput`] for zero agents or zero resources
    /// - [`AssignError::Dimension`] if the matrix is not `agents × resources`
    /// - [`AssignError::InvalidCost`] for a negative or NaN cost
    /// - [`AssignError::InvalidCapacity`] for a declared capacity of zero
    pub fn new(agents: Vec<Agent>, resources: Vec<Resource>, costs: CostMatrix) -> Result<Self> {
        if agents.is_empty() || resources.is_empty() {
            return Err(AssignError::EmptyInput {
                agents: agents.len(),
                resources: resources.len(),
            });
        }
        if costs.rows() != agents.len() {
            return Err(AssignError::Dimension {
                context: "cost matrix rows vs agents",
                expected: agents.len(),
                found: costs.rows(),
            });
        }
        if costs.cols() != resources.len() {
            return Err(AssignError::Dimension {
                context: "cost matrix columns vs resources",
                expected: resources.len(),
                found: costs.cols(),
            });
        }
        costs.validate()?;
        for (index, resource) in resources.iter().enumerate() {
            if resource.capacity == Some(0) {
                return Err(AssignError::InvalidCapacity {
                    resource: index,
                    capacity: 0,
                });
            }
        }
        Ok(Self {
            agents,
            resources,
            costs,
        })
    }

    /// Creates an anonymous problem from a bare matrix, naming agents
    /// `agent-<i>` and resources `resource-<j>`.
    pub fn from_matrix(costs: CostMatrix, capacities: &[u32]) -> Result<Self> {
        if capacities.len() != costs.cols() {
            return Err(AssignError::Dimension {
                context: "capacities vs resources",
                expected: costs.cols(),
                found: capacities.len(),
            });
        }
        let agents = (0..costs.rows())
            .map(|i| Agent::new(format!("agent-{}", i)))
            .collect();
        let resources = capacities
            .iter()
            .enumerate()
            .map(|(j, &capacity)| Resource::with_capacity(format!("resource-{}", j), capacity))
            .collect();
        Self::new(agents, resources, costs)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn costs(&self) -> &CostMatrix {
        &self.costs
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Returns each resource's capacity, using `default_capacity` where none
    /// was declared.
    pub fn resolved_capacities(&self, default_capacity: u32) -> Vec<u32> {
        self.resources
            .iter()
            .map(|r| r.capacity.unwrap_or(default_capacity))
            .collect()
    }

    /// Looks up a resource index by name.
    pub fn resource_index(&self, name: &str) -> Option<usize> {
        self.resources.iter().position(|r| r.name == name)
    }
}
