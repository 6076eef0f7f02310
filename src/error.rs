//! Error types for the kohonet learning library.

use thiserror::Error;

/// The main error type for kohonet operations.
#[derive(Error, Debug)]
pub enum KohonetError {
    /// Invalid configuration, rejected at construction time.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input dimensions do not match the network.
    #[error("Shape mismatch: expected width {expected}, found {found}")]
    ShapeMismatch {
        /// Width the network expects.
        expected: usize,
        /// Width that was supplied.
        found: usize,
    },

    /// Numerically degenerate input (e.g. zero-norm vector under cosine).
    #[error("Numeric degeneracy: {0}")]
    Degenerate(String),

    /// Error during training.
    #[error("Training error: {0}")]
    Training(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for kohonet operations.
pub type Result<T> = std::result::Result<T, KohonetError>;

impl From<bincode::Error> for KohonetError {
    fn from(err: bincode::Error) -> Self {
        KohonetError::Serialization(err.to_string())
    }
}
