//! Binary persistence for trained networks.
//!
//! Models serialize their full state (weights, grid, radius, decay rate,
//! metric choice) so a restored network predicts and continues training
//! exactly like the original.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serializes a model to a binary file.
pub fn save_model<T: Serialize, P: AsRef<Path>>(model: &T, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, model)?;
    writer.flush()?;
    Ok(())
}

/// Restores a model from a binary file.
pub fn load_model<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(bincode::deserialize_from(reader)?)
}
