//! Dense cost matrices and the read-only cost access trait.
//!
//! Costs are non-negative `f64` values. A forbidden pair is represented by
//! [`FORBIDDEN`] (positive infinity); any infinite entry is unusable by the
//! solver.

use crate::error::{AssignError, Result};

/// Cost of a forbidden agent/resource pair.
pub const FORBIDDEN: f64 = f64::INFINITY;

/// Returns true if `cost` marks a forbidden pair.
#[inline]
pub fn is_forbidden(cost: f64) -> bool {
    cost == FORBIDDEN
}

/// Read-only access to a rectangular cost table.
///
/// Implemented by [`CostMatrix`] and by lazy views (expanded slots,
/// transposition) so the solver never needs a materialized copy.
pub trait CostSource: Send + Sync {
    /// Number of rows.
    fn rows(&self) -> usize;

    /// Number of columns.
    fn cols(&self) -> usize;

    /// Cost at `(row, col)`. Callers stay within bounds.
    fn cost(&self, row: usize, col: usize) -> f64;

    /// Returns true if the table has no rows or no columns.
    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }
}

impl<C: CostSource + ?Sized> CostSource for &C {
    fn rows(&self) -> usize {
        (**self).rows()
    }

    fn cols(&self) -> usize {
        (**self).cols()
    }

    fn cost(&self, row: usize, col: usize) -> f64 {
        (**self).cost(row, col)
    }
}

/// A dense, row-major matrix of costs.
///
/// # Example
///
/// ```
/// use assignforge_core::CostMatrix;
///
/// let m = CostMatrix::from_rows(vec![vec![4.0, 1.0], vec![2.0, 0.0]]).unwrap();
/// assert_eq!(m.rows(), 2);
/// assert_eq!(m.get(1, 0), 2.0);
/// assert_eq!(m.transpose().get(0, 1), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::Dimension`] if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(AssignError::Dimension {
                context: "cost matrix data",
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a matrix filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Creates a matrix from nested rows. All rows must have equal length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n = rows.len();
        let mut data = Vec::with_capacity(n * cols);
        for row in rows {
            if row.len() != cols {
                return Err(AssignError::Dimension {
                    context: "cost matrix row",
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n,
            cols,
            data,
        })
    }

    /// Copies any cost source into a dense matrix.
    pub fn from_source(source: &impl CostSource) -> Self {
        let (rows, cols) = (source.rows(), source.cols());
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            data.extend((0..cols).map(|c| source.cost(r, c)));
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cost at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(col < self.cols, "column {} out of bounds", col);
        self.data[row * self.cols + col]
    }

    /// Returns the cost at `(row, col)`, or `None` if out of bounds.
    pub fn try_get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Sets the cost at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(col < self.cols, "column {} out of bounds", col);
        self.data[row * self.cols + col] = value;
    }

    /// Returns one row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterates over the values of one column.
    pub fn column(&self, col: usize) -> impl Iterator<Item = f64> + '_ {
        (0..self.rows).map(move |r| self.data[r * self.cols + col])
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            data.extend(self.column(c));
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Checks that every entry is a usable cost.
    ///
    /// Finite non-negative values and [`FORBIDDEN`] are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`AssignError::InvalidCost`] for the first NaN, negative or
    /// negative-infinite entry in row-major order.
    pub fn validate(&self) -> Result<()> {
        for (i, &value) in self.data.iter().enumerate() {
            if value.is_nan() || value < 0.0 {
                return Err(AssignError::InvalidCost {
                    agent: i / self.cols,
                    resource: i % self.cols,
                    value,
                });
            }
        }
        Ok(())
    }

    /// Replaces every entry `>= threshold` with [`FORBIDDEN`].
    ///
    /// Lets callers use a large finite sentinel for forbidden pairs.
    pub fn forbid_at_or_above(&mut self, threshold: f64) {
        for value in &mut self.data {
            if *value >= threshold {
                *value = FORBIDDEN;
            }
        }
    }

    /// Returns the raw row-major data.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

impl CostSource for CostMatrix {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn cost(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }
}

/// Transposed view over another cost source.
#[derive(Debug, Clone, Copy)]
pub struct Transposed<C>(pub C);

impl<C: CostSource> CostSource for Transposed<C> {
    fn rows(&self) -> usize {
        self.0.cols()
    }

    fn cols(&self) -> usize {
        self.0.rows()
    }

    #[inline]
    fn cost(&self, row: usize, col: usize) -> f64 {
        self.0.cost(col, row)
    }
}
