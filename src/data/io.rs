//! JSON persistence for prepared datasets

use super::dataset::Dataset;
use super::split::DatasetSplits;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the labeled training split
pub const LABELED_FILE: &str = "train_labeled.json";
/// File name of the validation split
pub const VALIDATION_FILE: &str = "validation.json";
/// File name of the unlabeled training split
pub const UNLABELED_FILE: &str = "train_unlabeled.json";

/// Write a dataset as JSON
pub fn save_dataset(dataset: &Dataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(dataset)?;
    fs::write(path, json).map_err(|e| Error::io(format!("writing {}", path.display()), e))
}

/// Read a dataset written by [`save_dataset`]
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let dataset: Dataset = serde_json::from_str(&json)?;
    // re-check the images/labels pairing that deserialization bypasses
    Dataset::new(dataset.images().clone(), dataset.labels().to_vec())
}

/// Persist all three splits into `dir`, returning the written paths
/// in labeled, validation, unlabeled order.
pub fn save_splits(splits: &DatasetSplits, dir: impl AsRef<Path>) -> Result<[PathBuf; 3]> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| Error::io(format!("creating {}", dir.display()), e))?;

    let paths = [dir.join(LABELED_FILE), dir.join(VALIDATION_FILE), dir.join(UNLABELED_FILE)];
    save_dataset(&splits.labeled, &paths[0])?;
    save_dataset(&splits.validation, &paths[1])?;
    save_dataset(&splits.unlabeled, &paths[2])?;
    Ok(paths)
}
