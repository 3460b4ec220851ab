//! Error types for AssignForge

use std::fmt;

use thiserror::Error;

/// Main error type for AssignForge operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignError {
    /// Matrix or capacity dimensions disagree with the declared counts
    #[error("Dimension error in {context}: expected {expected}, found {found}")]
    Dimension {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// Negative, NaN or negative-infinite cost
    #[error("Invalid cost {value} for agent {agent} at resource {resource}")]
    InvalidCost {
        agent: usize,
        resource: usize,
        value: f64,
    },

    /// Resource declared with a capacity below one
    #[error("Invalid capacity {capacity} for resource {resource}")]
    InvalidCapacity { resource: usize, capacity: u32 },

    /// No finite-cost complete assignment exists
    #[error("Infeasible assignment: {0}")]
    Infeasible(Infeasibility),

    /// More agents landed on a resource than it has slots
    #[error("Resource {resource} holds {assigned} agents but has capacity {capacity}")]
    CapacityExceeded {
        resource: usize,
        capacity: u32,
        assigned: usize,
    },

    /// Zero agents or zero resources
    #[error("Empty input: {agents} agents, {resources} resources")]
    EmptyInput { agents: usize, resources: usize },
}

impl AssignError {
    /// Returns true if this error reports an infeasible problem.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, AssignError::Infeasible(_))
    }
}

impl From<Infeasibility> for AssignError {
    fn from(reason: Infeasibility) -> Self {
        AssignError::Infeasible(reason)
    }
}

/// Diagnostic attached to [`AssignError::Infeasible`].
///
/// Indices are rows and columns of the matrix handed to the solver. For a
/// capacitated problem rows are agents and columns are expanded slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infeasibility {
    /// More agents than slots in total.
    InsufficientCapacity { agents: usize, slots: usize },

    /// Every slot is forbidden for this agent.
    UnreachableAgent { agent: usize },

    /// Every agent is forbidden for this slot (square problems only).
    UnreachableSlot { slot: usize },

    /// These agents can only reach `reachable_slots` finite-cost slots between them.
    HallViolation {
        agents: Vec<usize>,
        reachable_slots: Vec<usize>,
    },

    /// More columns than rows: these slots can only reach
    /// `reachable_agents` finite-cost agents between them.
    SlotHallViolation {
        slots: Vec<usize>,
        reachable_agents: Vec<usize>,
    },

    /// The optimum sums finite costs to a non-finite total. Large sentinel
    /// costs belong behind a forbidden threshold instead.
    CostOverflow,
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::InsufficientCapacity { agents, slots } => {
                write!(f, "{} agents but only {} slots", agents, slots)
            }
            Infeasibility::UnreachableAgent { agent } => {
                write!(f, "agent {} has no finite-cost slot", agent)
            }
            Infeasibility::UnreachableSlot { slot } => {
                write!(f, "slot {} has no finite-cost agent", slot)
            }
            Infeasibility::HallViolation {
                agents,
                reachable_slots,
            } => write!(
                f,
                "agents {:?} compete for {} reachable slot(s) {:?}",
                agents,
                reachable_slots.len(),
                reachable_slots
            ),
            Infeasibility::SlotHallViolation {
                slots,
                reachable_agents,
            } => write!(
                f,
                "slots {:?} compete for {} reachable agent(s) {:?}",
                slots,
                reachable_agents.len(),
                reachable_agents
            ),
            Infeasibility::CostOverflow => {
                write!(f, "total cost of the optimum overflows f64")
            }
        }
    }
}

/// Result type alias for AssignForge operations
pub type Result<T> = std::result::Result<T, AssignError>;
