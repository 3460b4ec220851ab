//! Maps solver output back to agents and resources.
//!
//! A solver pair `(agent, slot)` resolves to the resource owning the slot;
//! for the strided layout that is `slot mod R`. The realized cost is read
//! from the base matrix, never from the expanded one.

use std::collections::BTreeMap;

use assignforge_core::{is_forbidden, AssignError, CostMatrix, Infeasibility, Result};

use crate::expansion::SlotLayout;

/// One agent's resolved assignment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentAssignment {
    pub agent: usize,
    pub resource: usize,
    pub slot: usize,
    pub cost: f64,
}

/// Agents resolved to one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub resource: usize,
    pub capacity: u32,
    pub agents: Vec<usize>,
}

impl ResourceGroup {
    /// Fraction of capacity in use.
    pub fn utilization(&self) -> f64 {
        self.agents.len() as f64 / self.capacity as f64
    }
}

/// The interpreted result of one solve.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentResult {
    assignments: Vec<AgentAssignment>,
    capacities: Vec<u32>,
}

impl AssignmentResult {
    /// Per-agent assignments sorted by agent.
    pub fn assignments(&self) -> &[AgentAssignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Assignment of `agent`, if present.
    pub fn assignment_of(&self, agent: usize) -> Option<&AgentAssignment> {
        self.assignments
            .binary_search_by_key(&agent, |a| a.agent)
            .ok()
            .map(|i| &self.assignments[i])
    }

    pub fn total_cost(&self) -> f64 {
        self.assignments.iter().map(|a| a.cost).sum()
    }

    /// Mean cost per assigned agent (zero when empty).
    pub fn mean_cost(&self) -> f64 {
        if self.assignments.is_empty() {
            0.0
        } else {
            self.total_cost() / self.assignments.len() as f64
        }
    }

    /// Largest single assignment cost.
    pub fn max_cost(&self) -> Option<f64> {
        self.assignments.iter().map(|a| a.cost).reduce(f64::max)
    }

    /// Number of agents resolved to `resource`.
    pub fn load_of(&self, resource: usize) -> usize {
        self.assignments
            .iter()
            .filter(|a| a.resource == resource)
            .count()
    }

    /// One group per resource, in resource order, including empty ones.
    pub fn by_resource(&self) -> Vec<ResourceGroup> {
        let mut groups: Vec<ResourceGroup> = self
            .capacities
            .iter()
            .enumerate()
            .map(|(resource, &capacity)| ResourceGroup {
                resource,
                capacity,
                agents: Vec::new(),
            })
            .collect();
        for a in &self.assignments {
            groups[a.resource].agents.push(a.agent);
        }
        groups
    }

    /// Checks that no resource holds more agents than its capacity.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::CapacityExceeded`] naming the first overfull
    /// resource.
    pub fn verify_capacity(&self) -> Result<()> {
        let mut load: BTreeMap<usize, usize> = BTreeMap::new();
        for a in &self.assignments {
            *load.entry(a.resource).or_default() += 1;
        }
        for (resource, count) in load {
            let capacity = self.capacities[resource];
            if count > capacity as usize {
                return Err(AssignError::CapacityExceeded {
                    resource,
                    capacity,
                    assigned: count,
                });
            }
        }
        Ok(())
    }
}

/// Resolves `(agent, slot)` pairs against the base matrix.
///
/// # Errors
///
/// - [`AssignError::Dimension`] if the layout and base matrix disagree or a
///   pair is out of range
/// - [`AssignError::Infeasible`] if a pair lands on a surplus slot or a
///   forbidden base entry
pub fn interpret(
    pairs: &[(usize, usize)],
    base_costs: &CostMatrix,
    layout: &SlotLayout,
) -> Result<AssignmentResult> {
    if base_costs.cols() != layout.resource_count() {
        return Err(AssignError::Dimension {
            context: "cost matrix columns vs capacities",
            expected: base_costs.cols(),
            found: layout.resource_count(),
        });
    }

    let mut assignments = Vec::with_capacity(pairs.len());
    for &(agent, slot) in pairs {
        if agent >= base_costs.rows() {
            return Err(AssignError::Dimension {
                context: "agent index",
                expected: base_costs.rows(),
                found: agent,
            });
        }
        if slot >= layout.slot_count() {
            return Err(AssignError::Dimension {
                context: "slot index",
                expected: layout.slot_count(),
                found: slot,
            });
        }
        let resource = layout.resource_of(slot);
        let cost = base_costs.get(agent, resource);
        if layout.is_surplus(slot) || is_forbidden(cost) {
            return Err(Infeasibility::UnreachableAgent { agent }.into());
        }
        assignments.push(AgentAssignment {
            agent,
            resource,
            slot,
            cost,
        });
    }
    assignments.sort_by_key(|a| a.agent);

    Ok(AssignmentResult {
        assignments,
        capacities: layout.capacities().to_vec(),
    })
}

/// Resolves pairs for the strided layout with uniform capacity, where the
/// resource is simply `slot mod resource_count`.
pub fn interpret_uniform(
    pairs: &[(usize, usize)],
    base_costs: &CostMatrix,
    capacity: u32,
) -> Result<AssignmentResult> {
    let layout = SlotLayout::strided(&vec![capacity; base_costs.cols()])?;
    interpret(pairs, base_costs, &layout)
}
