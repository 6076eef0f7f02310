//! Weight matrix substrate shared by the learning rules.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// A `(n_inputs, n_outputs)` weight matrix where each column is the
/// prototype vector of one output unit.
///
/// Columns are stored contiguously so that scoring and updating a single
/// unit touches one cache-friendly slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightMatrix {
    n_inputs: usize,
    n_outputs: usize,
    /// Column-major storage: column `j` lives at `j * n_inputs..(j + 1) * n_inputs`.
    data: Vec<f64>,
}

impl WeightMatrix {
    /// Creates a matrix with all weights set to zero.
    pub fn zeros(n_inputs: usize, n_outputs: usize) -> Self {
        Self {
            n_inputs,
            n_outputs,
            data: vec![0.0; n_inputs * n_outputs],
        }
    }

    /// Creates a matrix with random weights.
    ///
    /// Weights are drawn from a normal distribution with mean 0 and std 0.1.
    pub fn random<R: Rng>(n_inputs: usize, n_outputs: usize, rng: &mut R) -> Self {
        let normal = Normal::new(0.0, 0.1).unwrap();
        let data = (0..n_inputs * n_outputs)
            .map(|_| normal.sample(rng))
            .collect();

        Self {
            n_inputs,
            n_outputs,
            data,
        }
    }

    /// Creates a matrix from explicit columns.
    ///
    /// Every column must have the same length; panics otherwise.
    pub fn from_columns(columns: &[Vec<f64>]) -> Self {
        assert!(!columns.is_empty(), "at least one column required");
        let n_inputs = columns[0].len();
        let mut data = Vec::with_capacity(n_inputs * columns.len());
        for column in columns {
            assert_eq!(column.len(), n_inputs, "ragged columns");
            data.extend_from_slice(column);
        }

        Self {
            n_inputs,
            n_outputs: columns.len(),
            data,
        }
    }

    /// Number of rows (input features).
    #[inline]
    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    /// Number of columns (output units).
    #[inline]
    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// Prototype column for unit `j`.
    #[inline]
    pub fn column(&self, j: usize) -> &[f64] {
        &self.data[j * self.n_inputs..(j + 1) * self.n_inputs]
    }

    /// Mutable prototype column for unit `j`.
    #[inline]
    pub fn column_mut(&mut self, j: usize) -> &mut [f64] {
        &mut self.data[j * self.n_inputs..(j + 1) * self.n_inputs]
    }

    /// Single weight at row `i`, column `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[j * self.n_inputs + i]
    }

    /// Mutable reference to the weight at row `i`, column `j`.
    #[inline]
    pub fn get_mut(&mut self, i: usize, j: usize) -> &mut f64 {
        &mut self.data[j * self.n_inputs + i]
    }

    /// Copies row `i` across all columns.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.n_outputs).map(|j| self.get(i, j)).collect()
    }

    /// Euclidean norm of column `j`.
    pub fn column_norm(&self, j: usize) -> f64 {
        self.column(j).iter().map(|w| w * w).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zeros() {
        let weight = WeightMatrix::zeros(3, 4);
        assert_eq!(weight.n_inputs(), 3);
        assert_eq!(weight.n_outputs(), 4);
        assert!(weight.column(2).iter().all(|&w| w == 0.0));
    }

    #[test]
    fn test_random_is_seeded() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(42);
        let mut rng_b = ChaCha8Rng::seed_from_u64(42);
        let a = WeightMatrix::random(5, 6, &mut rng_a);
        let b = WeightMatrix::random(5, 6, &mut rng_b);
        assert_eq!(a, b);
        assert!(a.column(0).iter().any(|&w| w != 0.0));
    }

    #[test]
    fn test_from_columns() {
        let weight = WeightMatrix::from_columns(&[vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(weight.get(0, 0), 1.0);
        assert_eq!(weight.get(1, 0), 2.0);
        assert_eq!(weight.get(0, 1), 3.0);
        assert_eq!(weight.column(1), &[3.0, 4.0]);
        assert_eq!(weight.row(1), vec![2.0, 4.0]);
    }

    #[test]
    fn test_column_mut() {
        let mut weight = WeightMatrix::zeros(2, 2);
        weight.column_mut(1)[0] = 7.0;
        assert_eq!(weight.get(0, 1), 7.0);
        assert_eq!(weight.get(0, 0), 0.0);
    }

    #[test]
    fn test_column_norm() {
        let weight = WeightMatrix::from_columns(&[vec![3.0, 4.0]]);
        assert!((weight.column_norm(0) - 5.0).abs() < 1e-10);
    }
}
