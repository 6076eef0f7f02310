//! Self-Organizing Feature Map.

use crate::config::SofmConfig;
use crate::error::{KohonetError, Result};
use crate::grid::{neighbours, FeatureGrid};
use crate::metric::{argmax, euclidean, Metric};
use crate::train::UnsupervisedNetwork;
use crate::weights::WeightMatrix;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A Self-Organizing Feature Map.
///
/// The map holds one prototype column per output unit, arranged on a 2D
/// feature grid. Each training sample pulls the best-matching unit and the
/// units inside the neighborhood disk around it toward the input, so that
/// inputs that are similar in feature space end up winning nearby grid
/// positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sofm {
    n_inputs: usize,
    n_outputs: usize,
    grid: FeatureGrid,
    learning_radius: usize,
    transform: Metric,
    step: f64,
    weight: WeightMatrix,
}

impl Sofm {
    /// Creates a map with randomly initialized weights.
    ///
    /// The configuration is validated eagerly; a `features_grid` whose
    /// product differs from `n_outputs` never reaches training.
    pub fn new(config: SofmConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let weight = WeightMatrix::random(config.n_inputs, config.n_outputs, &mut rng);

        Self::assemble(config, weight)
    }

    /// Creates a map with explicitly provided weights.
    pub fn with_weight(config: SofmConfig, weight: WeightMatrix) -> Result<Self> {
        config.validate()?;

        if weight.n_inputs() != config.n_inputs || weight.n_outputs() != config.n_outputs {
            return Err(KohonetError::Config(format!(
                "weight matrix is {}x{}, configuration expects {}x{}",
                weight.n_inputs(),
                weight.n_outputs(),
                config.n_inputs,
                config.n_outputs
            )));
        }

        Self::assemble(config, weight)
    }

    fn assemble(config: SofmConfig, weight: WeightMatrix) -> Result<Self> {
        let (rows, cols) = config.features_grid.unwrap_or((config.n_outputs, 1));

        Ok(Self {
            n_inputs: config.n_inputs,
            n_outputs: config.n_outputs,
            grid: FeatureGrid::new(rows, cols),
            learning_radius: config.learning_radius,
            transform: config.transform,
            step: config.step,
            weight,
        })
    }

    /// Width of the input feature vectors.
    #[inline]
    pub fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    /// Number of output units.
    #[inline]
    pub fn n_outputs(&self) -> usize {
        self.n_outputs
    }

    /// The feature grid the output units are arranged on.
    #[inline]
    pub fn grid(&self) -> FeatureGrid {
        self.grid
    }

    /// Current neighborhood radius.
    #[inline]
    pub fn learning_radius(&self) -> usize {
        self.learning_radius
    }

    /// Replaces the neighborhood radius.
    ///
    /// Shrinking schedules live outside the map; a driver typically calls
    /// this between epochs.
    pub fn set_learning_radius(&mut self, radius: usize) {
        self.learning_radius = radius;
    }

    /// The weight matrix.
    #[inline]
    pub fn weight(&self) -> &WeightMatrix {
        &self.weight
    }

    /// Scores one input row against every unit.
    pub fn score(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.transform.score(input, &self.weight)
    }

    /// Finds the best-matching unit for an input row.
    ///
    /// Ties are broken by the lowest flat unit index.
    pub fn winner(&self, input: &[f64]) -> Result<usize> {
        Ok(argmax(&self.score(input)?))
    }

    /// Raw similarity scores for a batch of rows.
    ///
    /// Rows are scored independently against a read-only weight matrix, so
    /// the batch is processed in parallel.
    pub fn predict_raw(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        data.par_iter().map(|row| self.score(row)).collect()
    }

    /// Competitive output for a batch of rows: 1.0 at the winning unit,
    /// 0.0 everywhere else.
    pub fn predict(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        self.predict_raw(data)?
            .into_iter()
            .map(|scores| {
                let mut output = vec![0.0; self.n_outputs];
                output[argmax(&scores)] = 1.0;
                Ok(output)
            })
            .collect()
    }

    /// Applies one online training step for a single sample.
    ///
    /// Finds the winner, computes the neighborhood disk around it, and
    /// moves every unit inside the disk toward the input by
    /// `step * (input - weight)`. Units outside the disk are untouched.
    /// Returns the quantization error (Euclidean distance between the
    /// input and the winner's prototype before the update).
    pub fn train_sample(&mut self, input: &[f64]) -> Result<f64> {
        let scores = self.score(input)?;
        let winner = argmax(&scores);
        let center = self.grid.coords(winner);

        let error = euclidean(input, self.weight.column(winner));

        let mask = neighbours(self.grid, center, self.learning_radius);
        for unit in mask.unit_indexes() {
            let column = self.weight.column_mut(unit);
            for (w, x) in column.iter_mut().zip(input.iter()) {
                *w += self.step * (x - *w);
            }
        }

        Ok(error)
    }

    /// Saves the map to a binary file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::storage::save_model(self, path)
    }

    /// Loads a map from a binary file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::storage::load_model(path)
    }
}

impl UnsupervisedNetwork for Sofm {
    fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    fn train_sample(&mut self, input: &[f64]) -> Result<f64> {
        Sofm::train_sample(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_config(rows: usize, cols: usize) -> SofmConfig {
        let mut config = SofmConfig::new(2, rows * cols);
        config.features_grid = Some((rows, cols));
        config.transform = Metric::NegEuclidean;
        config.seed = Some(42);
        config
    }

    #[test]
    fn test_invalid_grid_rejected_at_construction() {
        let mut config = SofmConfig::new(2, 9);
        config.features_grid = Some((2, 4));
        assert!(matches!(Sofm::new(config), Err(KohonetError::Config(_))));
    }

    #[test]
    fn test_default_grid_is_single_column() {
        let sofm = Sofm::new(SofmConfig::new(2, 5)).unwrap();
        assert_eq!(sofm.grid(), FeatureGrid::new(5, 1));
    }

    #[test]
    fn test_seeded_construction_is_deterministic() {
        let a = Sofm::new(grid_config(2, 2)).unwrap();
        let b = Sofm::new(grid_config(2, 2)).unwrap();
        assert_eq!(a.weight(), b.weight());
    }

    #[test]
    fn test_winner_tie_break_lowest_index() {
        let weight = WeightMatrix::zeros(2, 4);
        let sofm = Sofm::with_weight(grid_config(2, 2), weight).unwrap();
        // All units score identically against any input.
        assert_eq!(sofm.winner(&[0.5, -0.5]).unwrap(), 0);
    }

    #[test]
    fn test_radius_zero_updates_only_winner() {
        let weight = WeightMatrix::from_columns(&[
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
            vec![0.0, -1.0],
        ]);
        let mut config = grid_config(2, 2);
        config.step = 0.5;
        let mut sofm = Sofm::with_weight(config, weight.clone()).unwrap();

        let input = [0.9, 0.1];
        let error = sofm.train_sample(&input).unwrap();
        assert!(error > 0.0);

        assert_eq!(sofm.winner(&input).unwrap(), 0);
        assert!((sofm.weight().get(0, 0) - 0.95).abs() < 1e-10);
        assert!((sofm.weight().get(1, 0) - 0.05).abs() < 1e-10);
        for unit in 1..4 {
            assert_eq!(sofm.weight().column(unit), weight.column(unit));
        }
    }

    #[test]
    fn test_radius_one_updates_neighbourhood() {
        // 3x3 grid, winner in the center: the update must touch the center
        // and its four orthogonal neighbours, nothing else.
        let mut columns: Vec<Vec<f64>> = (0..9).map(|_| vec![0.0, 0.0]).collect();
        columns[4] = vec![1.0, 1.0];
        let weight = WeightMatrix::from_columns(&columns);

        let mut config = grid_config(3, 3);
        config.learning_radius = 1;
        config.step = 0.1;
        let mut sofm = Sofm::with_weight(config, weight).unwrap();

        sofm.train_sample(&[1.0, 1.0]).unwrap();

        let updated: Vec<usize> = (0..9)
            .filter(|&j| sofm.weight().column(j).iter().any(|&w| w != 0.0))
            .collect();
        assert_eq!(updated, vec![1, 3, 4, 5, 7]);
    }

    #[test]
    fn test_quantization_error_shrinks_with_training() {
        let mut config = grid_config(2, 2);
        config.step = 0.3;
        let mut sofm = Sofm::new(config).unwrap();

        let input = [0.7, -0.4];
        let first = sofm.train_sample(&input).unwrap();
        let mut last = first;
        for _ in 0..20 {
            last = sofm.train_sample(&input).unwrap();
        }
        assert!(last < first);
    }

    #[test]
    fn test_shape_mismatch_applies_nothing() {
        let mut sofm = Sofm::new(grid_config(2, 2)).unwrap();
        let before = sofm.weight().clone();

        let result = sofm.train_sample(&[1.0, 2.0, 3.0]);
        assert!(matches!(
            result,
            Err(KohonetError::ShapeMismatch { expected: 2, found: 3 })
        ));
        assert_eq!(sofm.weight(), &before);
    }

    #[test]
    fn test_predict_is_one_hot() {
        let sofm = Sofm::new(grid_config(2, 3)).unwrap();
        let data = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![-1.0, -1.0]];

        let output = sofm.predict(&data).unwrap();
        assert_eq!(output.len(), 3);
        for row in &output {
            assert_eq!(row.len(), 6);
            assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 1);
            assert!(row.iter().all(|&v| v == 0.0 || v == 1.0));
        }
    }

    #[test]
    fn test_predict_raw_matches_score() {
        let sofm = Sofm::new(grid_config(2, 2)).unwrap();
        let data = vec![vec![0.2, 0.8], vec![-0.5, 0.5]];

        let raw = sofm.predict_raw(&data).unwrap();
        for (row, scores) in data.iter().zip(raw.iter()) {
            assert_eq!(scores, &sofm.score(row).unwrap());
        }
    }

    #[test]
    fn test_set_learning_radius() {
        let mut sofm = Sofm::new(grid_config(3, 3)).unwrap();
        assert_eq!(sofm.learning_radius(), 0);
        sofm.set_learning_radius(2);
        assert_eq!(sofm.learning_radius(), 2);
    }
}
