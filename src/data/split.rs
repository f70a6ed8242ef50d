//! Deterministic per-class split into labeled, validation and unlabeled sets

use super::dataset::Dataset;
use super::UNLABELED;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-class slice sizes.
///
/// For class `c`, the first `labeled_per_class` samples (source order) go to
/// the labeled split, the next `validation_per_class` to validation, and the
/// rest to the unlabeled split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Labeled training samples per class
    pub labeled_per_class: usize,
    /// Validation samples per class
    pub validation_per_class: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { labeled_per_class: 300, validation_per_class: 1000 }
    }
}

/// The three datasets produced by [`split_dataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplits {
    /// Labeled training samples, grouped by class
    pub labeled: Dataset,
    /// Validation samples, grouped by class
    pub validation: Dataset,
    /// Remaining samples in source order, all labeled `-1`
    pub unlabeled: Dataset,
}

/// Partition `source` by per-class index slicing.
///
/// Classes are visited in ascending order and each class keeps its source
/// order, so the same source always yields the same splits. A class with fewer
/// samples than requested contributes what it has.
pub fn split_dataset(source: &Dataset, config: SplitConfig, n_classes: usize) -> Result<DatasetSplits> {
    if n_classes < 2 {
        return Err(Error::InvalidClassCount(n_classes));
    }
    for (index, &label) in source.labels().iter().enumerate() {
        if label == UNLABELED {
            return Err(Error::UnlabeledSample { index });
        }
        if label < 0 || label as usize >= n_classes {
            return Err(Error::LabelOutOfRange { label, n_classes });
        }
    }

    let mut labeled_idx = Vec::new();
    let mut validation_idx = Vec::new();
    let mut taken = vec![false; source.len()];

    for class in 0..n_classes {
        let class_idx = source.indices_of(class as i64);
        let labeled_end = config.labeled_per_class.min(class_idx.len());
        let validation_end = (labeled_end + config.validation_per_class).min(class_idx.len());

        labeled_idx.extend_from_slice(&class_idx[..labeled_end]);
        validation_idx.extend_from_slice(&class_idx[labeled_end..validation_end]);
        for &i in &class_idx[..validation_end] {
            taken[i] = true;
        }
    }

    let unlabeled_idx: Vec<usize> = (0..source.len()).filter(|&i| !taken[i]).collect();

    tracing::debug!(
        labeled = labeled_idx.len(),
        validation = validation_idx.len(),
        unlabeled = unlabeled_idx.len(),
        "split dataset"
    );

    Ok(DatasetSplits {
        labeled: source.select(&labeled_idx),
        validation: source.select(&validation_idx),
        unlabeled: source.select(&unlabeled_idx).without_labels(),
    })
}
