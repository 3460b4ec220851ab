//! Capacity expansion: many-to-one assignment as one-to-one assignment.
//!
//! A resource with capacity `k` is replicated into `k` slots that all carry
//! the resource's cost column. [`SlotLayout`] is the index mapping between
//! slots and resources; [`ExpandedCosts`] reads expanded costs lazily from
//! the base matrix so only `agents × resources` values are ever stored.
//!
//! # Layouts
//!
//! - **Strided**: `R × max_capacity` slots. Slot `s` belongs to resource
//!   `s mod R` and is replica `s / R`. Replicas beyond a resource's own
//!   capacity are surplus and forbidden.
//! - **Compact**: exactly `sum(capacities)` slots, enumerated replica by
//!   replica and skipping resources whose capacity is exhausted.
//!
//! With uniform capacities both layouts coincide.

use assignforge_config::SlotLayoutKind;
use assignforge_core::{AssignError, CostMatrix, CostSource, Result, FORBIDDEN};

/// Index mapping between expanded slots and resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotLayout {
    kind: SlotLayoutKind,
    capacities: Vec<u32>,
    max_capacity: u32,
    // Compact layout only.
    slot_resource: Vec<usize>,
}

impl SlotLayout {
    /// Creates a layout of the given kind.
    ///
    /// # Errors
    ///
    /// - [`AssignError::Dimension`] if `capacities` is empty
    /// - [`AssignError::InvalidCapacity`] if a capacity is zero
    pub fn new(kind: SlotLayoutKind, capacities: &[u32]) -> Result<Self> {
        if capacities.is_empty() {
            return Err(AssignError::Dimension {
                context: "capacity list length (minimum)",
                expected: 1,
                found: 0,
            });
        }
        if let Some((resource, &capacity)) = capacities.iter().enumerate().find(|(_, c)| **c == 0) {
            return Err(AssignError::InvalidCapacity { resource, capacity });
        }

        let max_capacity = capacities.iter().copied().max().unwrap_or(0);
        let slot_resource = match kind {
            SlotLayoutKind::Strided => Vec::new(),
            SlotLayoutKind::Compact => {
                let total = capacities.iter().map(|&c| c as usize).sum();
                let mut slots = Vec::with_capacity(total);
                for round in 0..max_capacity {
                    for (resource, &capacity) in capacities.iter().enumerate() {
                        if round < capacity {
                            slots.push(resource);
                        }
                    }
                }
                slots
            }
        };

        Ok(Self {
            kind,
            capacities: capacities.to_vec(),
            max_capacity,
            slot_resource,
        })
    }

    /// Creates the strided layout.
    pub fn strided(capacities: &[u32]) -> Result<Self> {
        Self::new(SlotLayoutKind::Strided, capacities)
    }

    /// Creates the compact layout.
    pub fn compact(capacities: &[u32]) -> Result<Self> {
        Self::new(SlotLayoutKind::Compact, capacities)
    }

    pub fn kind(&self) -> SlotLayoutKind {
        self.kind
    }

    pub fn resource_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn capacities(&self) -> &[u32] {
        &self.capacities
    }

    pub fn capacity_of(&self, resource: usize) -> u32 {
        self.capacities[resource]
    }

    pub fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Total number of expanded columns, surplus slots included.
    pub fn slot_count(&self) -> usize {
        match self.kind {
            SlotLayoutKind::Strided => self.resource_count() * self.max_capacity as usize,
            SlotLayoutKind::Compact => self.slot_resource.len(),
        }
    }

    /// Number of slots an agent may actually occupy.
    pub fn usable_slot_count(&self) -> usize {
        self.capacities.iter().map(|&c| c as usize).sum()
    }

    /// Resource owning `slot`.
    #[inline]
    pub fn resource_of(&self, slot: usize) -> usize {
        match self.kind {
            SlotLayoutKind::Strided => slot % self.resource_count(),
            SlotLayoutKind::Compact => self.slot_resource[slot],
        }
    }

    /// Replica number of `slot` within its resource.
    pub fn replica_of(&self, slot: usize) -> usize {
        match self.kind {
            SlotLayoutKind::Strided => slot / self.resource_count(),
            SlotLayoutKind::Compact => {
                let resource = self.slot_resource[slot];
                self.slot_resource[..slot]
                    .iter()
                    .filter(|&&r| r == resource)
                    .count()
            }
        }
    }

    /// Returns true if `slot` lies beyond its resource's capacity.
    #[inline]
    pub fn is_surplus(&self, slot: usize) -> bool {
        match self.kind {
            SlotLayoutKind::Strided => {
                let r = self.resource_count();
                (slot / r) as u32 >= self.capacities[slot % r]
            }
            SlotLayoutKind::Compact => false,
        }
    }

    /// Usable slots of `resource` in ascending order.
    pub fn slots_of(&self, resource: usize) -> Vec<usize> {
        (0..self.slot_count())
            .filter(|&s| self.resource_of(s) == resource && !self.is_surplus(s))
            .collect()
    }
}

/// Lazy `agents × slots` view over a base `agents × resources` matrix.
#[derive(Debug, Clone, Copy)]
pub struct ExpandedCosts<'a, C> {
    base: &'a C,
    layout: &'a SlotLayout,
}

impl<'a, C: CostSource> ExpandedCosts<'a, C> {
    /// Creates the view.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::Dimension`] if the base column count differs
    /// from the layout's resource count.
    pub fn new(base: &'a C, layout: &'a SlotLayout) -> Result<Self> {
        if base.cols() != layout.resource_count() {
            return Err(AssignError::Dimension {
                context: "cost matrix columns vs capacities",
                expected: base.cols(),
                found: layout.resource_count(),
            });
        }
        Ok(Self { base, layout })
    }

    pub fn layout(&self) -> &SlotLayout {
        self.layout
    }

    /// Copies the view into a dense matrix.
    pub fn materialize(&self) -> CostMatrix {
        CostMatrix::from_source(self)
    }
}

impl<C: CostSource> CostSource for ExpandedCosts<'_, C> {
    fn rows(&self) -> usize {
        self.base.rows()
    }

    fn cols(&self) -> usize {
        self.layout.slot_count()
    }

    #[inline]
    fn cost(&self, row: usize, slot: usize) -> f64 {
        if self.layout.is_surplus(slot) {
            FORBIDDEN
        } else {
            self.base.cost(row, self.layout.resource_of(slot))
        }
    }
}

/// Builds the expanded cost matrix with the strided layout.
///
/// Column `j` of `base_costs` is replicated at `{j, j + R, j + 2R, ...}`
/// for `capacity_per_resource[j]` replicas; the remaining replicas up to the
/// largest capacity are forbidden.
///
/// # Errors
///
/// - [`AssignError::Dimension`] if `capacity_per_resource.len()` differs
///   from the number of base columns
/// - [`AssignError::InvalidCost`] for a negative or NaN base cost
/// - [`AssignError::InvalidCapacity`] for a zero capacity
///
/// # Example
///
/// ```
/// use assignforge_core::CostMatrix;
/// use assignforge_solver::expansion::build;
///
/// let base = CostMatrix::from_rows(vec![vec![10.0], vec![20.0]]).unwrap();
/// let expanded = build(&base, &[2]).unwrap();
/// assert_eq!(expanded.row(0), &[10.0, 10.0]);
/// assert_eq!(expanded.row(1), &[20.0, 20.0]);
/// ```
pub fn build(base_costs: &CostMatrix, capacity_per_resource: &[u32]) -> Result<CostMatrix> {
    check_capacity_len(base_costs, capacity_per_resource)?;
    let layout = SlotLayout::strided(capacity_per_resource)?;
    build_with_layout(base_costs, &layout)
}

/// Builds the expanded cost matrix for an existing layout.
pub fn build_with_layout(base_costs: &CostMatrix, layout: &SlotLayout) -> Result<CostMatrix> {
    base_costs.validate()?;
    Ok(ExpandedCosts::new(base_costs, layout)?.materialize())
}

fn check_capacity_len(base_costs: &CostMatrix, capacities: &[u32]) -> Result<()> {
    if base_costs.cols() != capacities.len() {
        return Err(AssignError::Dimension {
            context: "cost matrix columns vs capacities",
            expected: base_costs.cols(),
            found: capacities.len(),
        });
    }
    Ok(())
}
