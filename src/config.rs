//! Configuration for the kohonet learning networks.
//!
//! Every bound that the networks rely on is checked eagerly by the
//! `validate` methods, so an invalid setting is rejected when the network
//! is constructed and never surfaces mid-training.

use crate::error::{KohonetError, Result};
use crate::metric::Metric;
use serde::{Deserialize, Serialize};

/// Self-Organizing Feature Map configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SofmConfig {
    /// Width of the input feature vectors.
    pub n_inputs: usize,

    /// Number of output units (prototype columns).
    pub n_outputs: usize,

    /// Spatial arrangement of the output units as (rows, cols).
    /// When `None`, units form a single column: `(n_outputs, 1)`.
    pub features_grid: Option<(usize, usize)>,

    /// Radius of the neighborhood disk updated around the winner.
    /// Default: 0 (winner only).
    pub learning_radius: usize,

    /// Similarity metric used for winner selection.
    /// Default: dot product (`"linear"`).
    pub transform: Metric,

    /// Learning rate.
    /// Default: 0.1.
    pub step: f64,

    /// Random seed for weight initialization.
    /// Default: None (random).
    pub seed: Option<u64>,
}

impl SofmConfig {
    /// Creates a configuration with default hyperparameters for the given
    /// input/output sizes.
    pub fn new(n_inputs: usize, n_outputs: usize) -> Self {
        Self {
            n_inputs,
            n_outputs,
            features_grid: None,
            learning_radius: 0,
            transform: Metric::DotProduct,
            step: 0.1,
            seed: None,
        }
    }

    /// Checks every configured bound.
    pub fn validate(&self) -> Result<()> {
        if self.n_inputs == 0 {
            return Err(KohonetError::Config(
                "n_inputs must be at least 1".to_string(),
            ));
        }
        if self.n_outputs == 0 {
            return Err(KohonetError::Config(
                "n_outputs must be at least 1".to_string(),
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(KohonetError::Config(format!(
                "step must be a positive finite number, got {}",
                self.step
            )));
        }
        if let Some((rows, cols)) = self.features_grid {
            if rows * cols != self.n_outputs {
                return Err(KohonetError::Config(format!(
                    "features_grid should contain the same number of elements \
                     as the output layer: {}, but found: {} ({}x{})",
                    self.n_outputs,
                    rows * cols,
                    rows,
                    cols
                )));
            }
        }
        Ok(())
    }
}

/// Hebbian associative network configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HebbConfig {
    /// Width of the input feature vectors.
    pub n_inputs: usize,

    /// Number of output units.
    pub n_outputs: usize,

    /// Number of leading features treated as unconditioned stimulus.
    /// Their weights stay frozen at the initial value. Default: 1.
    pub n_unconditioned: usize,

    /// Multiplicative weight decay applied every update.
    /// Keeps conditioned weights from growing without bound. Default: 0.2.
    pub decay_rate: f64,

    /// Learning rate.
    /// Default: 0.1.
    pub step: f64,
}

impl HebbConfig {
    /// Creates a configuration with default hyperparameters for the given
    /// input/output sizes.
    pub fn new(n_inputs: usize, n_outputs: usize) -> Self {
        Self {
            n_inputs,
            n_outputs,
            n_unconditioned: 1,
            decay_rate: 0.2,
            step: 0.1,
        }
    }

    /// Checks every configured bound.
    pub fn validate(&self) -> Result<()> {
        if self.n_outputs == 0 {
            return Err(KohonetError::Config(
                "n_outputs must be at least 1".to_string(),
            ));
        }
        if self.n_unconditioned == 0 || self.n_unconditioned >= self.n_inputs {
            return Err(KohonetError::Config(format!(
                "n_unconditioned must be between 1 and {} (exclusive), got {}",
                self.n_inputs, self.n_unconditioned
            )));
        }
        if !self.decay_rate.is_finite() || self.decay_rate < 0.0 {
            return Err(KohonetError::Config(format!(
                "decay_rate must be non-negative and finite, got {}",
                self.decay_rate
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(KohonetError::Config(format!(
                "step must be a positive finite number, got {}",
                self.step
            )));
        }
        Ok(())
    }
}
