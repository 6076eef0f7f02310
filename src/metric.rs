//! Similarity metrics for winner selection.

use crate::error::{KohonetError, Result};
use crate::weights::WeightMatrix;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Similarity metric between an input row and each prototype column.
///
/// All variants are oriented so that a larger score means a closer match,
/// which lets the winner be picked with a single argmax regardless of the
/// configured metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Plain dot product between the input and each column.
    #[serde(rename = "linear")]
    DotProduct,
    /// Negative Euclidean distance to each column (0 iff exact match).
    #[serde(rename = "euclid")]
    NegEuclidean,
    /// Cosine of the angle between the input and each column.
    ///
    /// A zero-norm input or column makes the cosine undefined and is
    /// rejected with [`KohonetError::Degenerate`].
    #[serde(rename = "cos")]
    Cosine,
}

impl Metric {
    /// Scores the input row against every column of the weight matrix.
    ///
    /// Returns one score per output unit. The input width must match the
    /// matrix row count; a mismatch is reported before anything is computed.
    pub fn score(&self, input: &[f64], weight: &WeightMatrix) -> Result<Vec<f64>> {
        if input.len() != weight.n_inputs() {
            return Err(KohonetError::ShapeMismatch {
                expected: weight.n_inputs(),
                found: input.len(),
            });
        }

        match self {
            Metric::DotProduct => Ok((0..weight.n_outputs())
                .map(|j| dot(input, weight.column(j)))
                .collect()),
            Metric::NegEuclidean => Ok((0..weight.n_outputs())
                .map(|j| -euclidean(input, weight.column(j)))
                .collect()),
            Metric::Cosine => {
                let input_norm = norm(input);
                if input_norm == 0.0 {
                    return Err(KohonetError::Degenerate(
                        "cosine similarity of a zero-norm input".to_string(),
                    ));
                }

                (0..weight.n_outputs())
                    .map(|j| {
                        let column_norm = weight.column_norm(j);
                        if column_norm == 0.0 {
                            return Err(KohonetError::Degenerate(format!(
                                "cosine similarity against zero-norm column {}",
                                j
                            )));
                        }
                        Ok(dot(input, weight.column(j)) / (input_norm * column_norm))
                    })
                    .collect()
            }
        }
    }
}

impl FromStr for Metric {
    type Err = KohonetError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "linear" => Ok(Metric::DotProduct),
            "euclid" => Ok(Metric::NegEuclidean),
            "cos" => Ok(Metric::Cosine),
            other => Err(KohonetError::Config(format!(
                "unknown metric {:?}, expected one of: linear, euclid, cos",
                other
            ))),
        }
    }
}

/// Index of the largest score, ties broken by the first occurrence.
pub fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = i;
        }
    }
    best
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[inline]
fn norm(a: &[f64]) -> f64 {
    a.iter().map(|x| x * x).sum::<f64>().sqrt()
}
