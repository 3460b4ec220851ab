//! Row and column reduction.
//!
//! Subtracting a constant from every entry of a line that every complete
//! assignment must use shifts all assignments by that constant, so the set
//! of optimal assignments is unchanged. Rows are always fully used when
//! `rows <= cols`, columns when `rows >= cols`; only those lines are reduced.

use assignforge_core::{is_forbidden, AssignError, CostMatrix, Infeasibility, Result};

/// A reduced cost matrix and the constants taken out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction {
    /// Matrix after reduction; forbidden entries stay forbidden.
    pub reduced: CostMatrix,
    /// Amount subtracted from each row (zero for unreduced rows).
    pub row_offsets: Vec<f64>,
    /// Amount subtracted from each column (zero for unreduced columns).
    pub col_offsets: Vec<f64>,
}

impl Reduction {
    /// Sum of all subtracted constants.
    ///
    /// `optimum(original) == optimum(reduced) + constant()`.
    pub fn constant(&self) -> f64 {
        self.row_offsets.iter().sum::<f64>() + self.col_offsets.iter().sum::<f64>()
    }
}

/// Reduces rows (if `rows <= cols`), then columns (if `rows >= cols`).
///
/// # Errors
///
/// Returns [`AssignError::Infeasible`] if a line that must be used is
/// entirely forbidden, and [`AssignError::EmptyInput`] for an empty matrix.
pub fn reduce(costs: &CostMatrix) -> Result<Reduction> {
    let (n, m) = (costs.rows(), costs.cols());
    if n == 0 || m == 0 {
        return Err(AssignError::EmptyInput {
            agents: n,
            resources: m,
        });
    }

    let mut reduced = costs.clone();
    let mut row_offsets = vec![0.0; n];
    let mut col_offsets = vec![0.0; m];

    if n <= m {
        for (i, offset) in row_offsets.iter_mut().enumerate() {
            let min = reduced.row(i).iter().copied().fold(f64::INFINITY, f64::min);
            if is_forbidden(min) {
                return Err(Infeasibility::UnreachableAgent { agent: i }.into());
            }
            *offset = min;
            for j in 0..m {
                reduced.set(i, j, reduced.get(i, j) - min);
            }
        }
    }

    if n >= m {
        for (j, offset) in col_offsets.iter_mut().enumerate() {
            let min = reduced.column(j).fold(f64::INFINITY, f64::min);
            if is_forbidden(min) {
                return Err(Infeasibility::UnreachableSlot { slot: j }.into());
            }
            *offset = min;
            for i in 0..n {
                reduced.set(i, j, reduced.get(i, j) - min);
            }
        }
    }

    Ok(Reduction {
        reduced,
        row_offsets,
        col_offsets,
    })
}
