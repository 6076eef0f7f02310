//! Hebbian associative learning.

use crate::config::HebbConfig;
use crate::error::{KohonetError, Result};
use crate::train::UnsupervisedNetwork;
use crate::weights::WeightMatrix;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// An unsupervised associative network trained with the Hebb rule.
///
/// The input features split into an unconditioned prefix and a conditioned
/// suffix. Unconditioned weights are frozen at 1.0 and encode the baseline
/// response; conditioned weights start at 0.0 and learn co-occurrence
/// between their feature and the unit output, with a multiplicative decay
/// that keeps them from growing without bound. The classic example is
/// Pavlov's dog: food (unconditioned) already triggers the response, the
/// bell (conditioned) learns to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hebb {
    n_inputs: usize,
    n_outputs: usize,
    n_unconditioned: usize,
    decay_rate: f64,
    step: f64,
    weight: WeightMatrix,
}

/// Threshold output of a unit: 1.0 for positive activation, -1.0 otherwise.
#[inline]
fn sign_step(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else {
        -1.0
    }
}

impl Hebb {
    /// Creates a network with the standard associative weight layout:
    /// 1.0 for every unconditioned row, 0.0 for every conditioned row.
    pub fn new(config: HebbConfig) -> Result<Self> {
        config.validate()?;

        let mut weight = WeightMatrix::zeros(config.n_inputs, config.n_outputs);
        for j in 0..config.n_outputs {
            for i in 0..config.n_unconditioned {
                *weight.get_mut(i, j) = 1.0;
            }
        }

        Ok(Self {
            n_inputs: config.n_inputs,
            n_outputs: config.n_outputs,
            n_unconditioned: config.n_unconditioned,
            decay_rate: config.decay_rate,
            step: config.step,
            weight,
        })
    }

    /// Creates a network with explicitly provided weights.
    pub fn with_weight(config: HebbConfig, weight: WeightMatrix) -> Result<Self> {
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

        Ok(Self {
            n_inputs: config.n_inputs,
            n_outputs: config.n_outputs,
            n_unconditioned: config.n_unconditioned,
            decay_rate: config.decay_rate,
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

    /// Number of leading unconditioned features.
    #[inline]
    pub fn n_unconditioned(&self) -> usize {
        self.n_unconditioned
    }

    /// The weight matrix.
    #[inline]
    pub fn weight(&self) -> &WeightMatrix {
        &self.weight
    }

    /// Raw activations for a batch of rows: `data . weight`.
    pub fn predict_raw(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        data.iter().map(|row| self.activate(row)).collect()
    }

    /// Thresholded output for a batch of rows, elementwise in {-1.0, 1.0}.
    pub fn predict(&self, data: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        Ok(self
            .predict_raw(data)?
            .into_iter()
            .map(|raw| raw.into_iter().map(sign_step).collect())
            .collect())
    }

    fn activate(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.n_inputs {
            return Err(KohonetError::ShapeMismatch {
                expected: self.n_inputs,
                found: input.len(),
            });
        }

        Ok((0..self.n_outputs)
            .map(|j| {
                self.weight
                    .column(j)
                    .iter()
                    .zip(input.iter())
                    .map(|(w, x)| w * x)
                    .sum()
            })
            .collect())
    }

    /// Computes the Hebb-rule delta for the conditioned weight block.
    ///
    /// For a batch of inputs `X` and matching layer outputs `Y`:
    ///
    /// ```text
    /// delta = -decay_rate * W[n_unconditioned.., ..]
    ///         + step * X[.., n_unconditioned..]^T . Y
    /// ```
    ///
    /// Pure: the network is left untouched. The result has one row per
    /// conditioned feature and one column per output unit.
    pub fn weight_delta(
        &self,
        inputs: &[Vec<f64>],
        outputs: &[Vec<f64>],
    ) -> Result<Vec<Vec<f64>>> {
        if inputs.len() != outputs.len() {
            return Err(KohonetError::Training(format!(
                "batch size mismatch: {} inputs vs {} outputs",
                inputs.len(),
                outputs.len()
            )));
        }
        for row in inputs {
            if row.len() != self.n_inputs {
                return Err(KohonetError::ShapeMismatch {
                    expected: self.n_inputs,
                    found: row.len(),
                });
            }
        }
        for row in outputs {
            if row.len() != self.n_outputs {
                return Err(KohonetError::ShapeMismatch {
                    expected: self.n_outputs,
                    found: row.len(),
                });
            }
        }

        let n_conditioned = self.n_inputs - self.n_unconditioned;
        let mut delta = vec![vec![0.0; self.n_outputs]; n_conditioned];
        for (i, delta_row) in delta.iter_mut().enumerate() {
            let feature = self.n_unconditioned + i;
            for (j, cell) in delta_row.iter_mut().enumerate() {
                let correlation: f64 = inputs
                    .iter()
                    .zip(outputs.iter())
                    .map(|(x, y)| x[feature] * y[j])
                    .sum();
                *cell = -self.decay_rate * self.weight.get(feature, j) + self.step * correlation;
            }
        }

        Ok(delta)
    }

    /// Applies one training step for a single sample.
    ///
    /// The layer output is computed with the current weights, then the
    /// conditioned block is updated in place. Unconditioned rows are never
    /// touched. Returns the summed absolute weight change.
    pub fn train_sample(&mut self, input: &[f64]) -> Result<f64> {
        let output: Vec<f64> = self.activate(input)?.into_iter().map(sign_step).collect();

        let mut change = 0.0;
        for j in 0..self.n_outputs {
            let column = self.weight.column_mut(j);
            for (i, w) in column.iter_mut().enumerate().skip(self.n_unconditioned) {
                let delta = -self.decay_rate * *w + self.step * input[i] * output[j];
                *w += delta;
                change += delta.abs();
            }
        }

        Ok(change)
    }

    /// Saves the network to a binary file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        crate::storage::save_model(self, path)
    }

    /// Loads a network from a binary file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        crate::storage::load_model(path)
    }
}

impl UnsupervisedNetwork for Hebb {
    fn n_inputs(&self) -> usize {
        self.n_inputs
    }

    fn train_sample(&mut self, input: &[f64]) -> Result<f64> {
        Hebb::train_sample(self, input)
    }
}
