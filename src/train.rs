//! Epoch driver for the unsupervised networks.

use crate::error::{KohonetError, Result};
use log::info;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A network that learns online, one sample at a time.
///
/// `train_sample` applies exactly one update and reports a per-sample
/// error signal (quantization distance for the SOFM, weight-change
/// magnitude for the Hebb rule) that the driver averages per epoch.
pub trait UnsupervisedNetwork {
    /// Width of the input rows this network accepts.
    fn n_inputs(&self) -> usize;

    /// Applies one training step and returns the per-sample error.
    fn train_sample(&mut self, input: &[f64]) -> Result<f64>;
}

/// Drives epochs of online training over a dataset.
#[derive(Debug, Clone)]
pub struct Trainer {
    /// Number of full passes over the data.
    /// Default: 100.
    pub epochs: usize,

    /// Shuffle the presentation order every epoch.
    /// Default: true.
    pub shuffle: bool,

    /// Random seed for the shuffling order.
    /// Default: None (random).
    pub seed: Option<u64>,

    /// Log progress every N epochs.
    /// Default: 10.
    pub show_epoch: usize,
}

impl Default for Trainer {
    fn default() -> Self {
        Self {
            epochs: 100,
            shuffle: true,
            seed: None,
            show_epoch: 10,
        }
    }
}

/// Per-epoch error trace produced by a training run.
#[derive(Debug, Clone)]
pub struct TrainingSummary {
    /// Mean per-sample error for each completed epoch.
    pub epoch_errors: Vec<f64>,
}

impl TrainingSummary {
    /// Error of the final epoch, if any epoch ran.
    pub fn last_error(&self) -> Option<f64> {
        self.epoch_errors.last().copied()
    }
}

impl Trainer {
    /// Creates a driver that runs the given number of epochs.
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            ..Self::default()
        }
    }

    /// Trains the network over the dataset.
    ///
    /// The whole dataset is shape-checked up front, so a malformed row is
    /// rejected before any weight is touched.
    pub fn train<N: UnsupervisedNetwork>(
        &self,
        network: &mut N,
        data: &[Vec<f64>],
    ) -> Result<TrainingSummary> {
        if data.is_empty() {
            return Err(KohonetError::Training(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        for row in data {
            if row.len() != network.n_inputs() {
                return Err(KohonetError::ShapeMismatch {
                    expected: network.n_inputs(),
                    found: row.len(),
                });
            }
        }

        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut order: Vec<usize> = (0..data.len()).collect();

        info!(
            "Training: {} epochs on {} samples",
            self.epochs,
            data.len()
        );

        let mut epoch_errors = Vec::with_capacity(self.epochs);
        for epoch in 0..self.epochs {
            if self.shuffle {
                order.shuffle(&mut rng);
            }

            let mut error_sum = 0.0;
            for &idx in &order {
                error_sum += network.train_sample(&data[idx])?;
            }
            let epoch_error = error_sum / data.len() as f64;
            epoch_errors.push(epoch_error);

            if self.show_epoch != 0
                && (epoch % self.show_epoch == 0 || epoch == self.epochs - 1)
            {
                info!(
                    "Epoch {}/{}: error={:.6}",
                    epoch + 1,
                    self.epochs,
                    epoch_error
                );
            }
        }

        Ok(TrainingSummary { epoch_errors })
    }
}
