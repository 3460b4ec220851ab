//! Seeded random instances.
//!
//! Costs are whole numbers stored as `f64` so that sums compare exactly.

use assignforge_core::{CostMatrix, FORBIDDEN};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A `rows × cols` matrix with integer costs in `0..=max_cost`.
pub fn random_matrix(seed: u64, rows: usize, cols: usize, max_cost: u32) -> CostMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..rows * cols)
        .map(|_| rng.random_range(0..=max_cost) as f64)
        .collect();
    CostMatrix::new(rows, cols, data).expect("dimensions match by construction")
}

/// Like [`random_matrix`] but each entry is forbidden with probability
/// `forbidden_ratio`.
pub fn random_sparse_matrix(
    seed: u64,
    rows: usize,
    cols: usize,
    max_cost: u32,
    forbidden_ratio: f64,
) -> CostMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let data = (0..rows * cols)
        .map(|_| {
            if rng.random_bool(forbidden_ratio) {
                FORBIDDEN
            } else {
                rng.random_range(0..=max_cost) as f64
            }
        })
        .collect();
    CostMatrix::new(rows, cols, data).expect("dimensions match by construction")
}

/// `resources` capacities in `1..=max_capacity`.
pub fn random_capacities(seed: u64, resources: usize, max_capacity: u32) -> Vec<u32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..resources)
        .map(|_| rng.random_range(1..=max_capacity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_matrix() {
        assert_eq!(random_matrix(7, 4, 5, 50), random_matrix(7, 4, 5, 50));
        assert_ne!(random_matrix(7, 4, 5, 50), random_matrix(8, 4, 5, 50));
    }

    #[test]
    fn test_bounds() {
        let m = random_matrix(1, 6, 6, 9);
        assert!(m.as_slice().iter().all(|&c| (0.0..=9.0).contains(&c)));
        let caps = random_capacities(1, 10, 3);
        assert!(caps.iter().all(|&c| (1..=3).contains(&c)));
    }

    #[test]
    fn test_sparse_extremes() {
        let dense = random_sparse_matrix(3, 3, 3, 9, 0.0);
        assert!(dense.as_slice().iter().all(|c| c.is_finite()));
        let blocked = random_sparse_matrix(3, 3, 3, 9, 1.0);
        assert!(blocked.as_slice().iter().all(|c| c.is_infinite()));
    }
}
