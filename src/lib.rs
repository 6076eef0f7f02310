//! # Kohonet - Competitive and Associative Learning
//!
//! Kohonet is a Rust implementation of the classic unsupervised learning
//! rules: Self-Organizing Feature Maps (Kohonen networks) and Hebbian
//! associative networks.
//!
//! ## Overview
//!
//! A [`Sofm`] maintains one prototype weight column per output unit,
//! arranged on a 2D feature grid. Every training sample selects the
//! best-matching unit under a configurable similarity metric and pulls
//! the units inside a Euclidean neighborhood disk toward the input, so
//! the grid gradually organizes itself around the structure of the data.
//!
//! A [`Hebb`] network learns associations between conditioned stimuli and
//! a fixed unconditioned response, using a decay-plus-correlation rule.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kohonet::{Metric, Sofm, SofmConfig, Trainer};
//!
//! let mut config = SofmConfig::new(2, 16);
//! config.features_grid = Some((4, 4));
//! config.learning_radius = 1;
//! config.transform = Metric::NegEuclidean;
//!
//! let mut sofm = Sofm::new(config)?;
//! let summary = Trainer::new(200).train(&mut sofm, &data)?;
//!
//! let clusters = sofm.predict(&held_out)?;
//! sofm.save("map.bin")?;
//! ```
//!
//! ## Architecture
//!
//! - [`weights`] - Shared weight-matrix substrate
//! - [`metric`] - Similarity metrics for winner selection
//! - [`grid`] - Feature-grid geometry and neighborhood masks
//! - [`sofm`] - Self-Organizing Feature Map
//! - [`hebb`] - Hebbian associative network
//! - [`train`] - Epoch driver for online learning
//! - [`storage`] - Binary persistence

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod grid;
pub mod hebb;
pub mod metric;
pub mod sofm;
pub mod storage;
pub mod train;
pub mod weights;

// Re-export commonly used types
pub use config::{HebbConfig, SofmConfig};
pub use error::{KohonetError, Result};
pub use grid::{neighbours, FeatureGrid, Mask};
pub use hebb::Hebb;
pub use metric::{argmax, Metric};
pub use sofm::Sofm;
pub use train::{Trainer, TrainingSummary, UnsupervisedNetwork};
pub use weights::WeightMatrix;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
