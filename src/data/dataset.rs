//! In-memory dataset and fixed-size batch loader

use super::batch::{Batch, BatchSource};
use super::UNLABELED;
use crate::error::{Error, Result};
use ndarray::{s, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Flattened images paired with integer labels.
///
/// Immutable once built; splitting and relabeling produce new datasets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    images: Array2<f32>,
    labels: Vec<i64>,
}

impl Dataset {
    /// Create a dataset from `(n_samples, input_dim)` images and `n_samples` labels
    pub fn new(images: Array2<f32>, labels: Vec<i64>) -> Result<Self> {
        if images.nrows() != labels.len() {
            return Err(Error::LengthMismatch { left: labels.len(), right: images.nrows() });
        }
        Ok(Self { images, labels })
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the dataset has no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Flattened image dimensionality
    pub fn input_dim(&self) -> usize {
        self.images.ncols()
    }

    /// All images, one row per sample
    pub fn images(&self) -> &Array2<f32> {
        &self.images
    }

    /// All labels
    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    /// Source-order indices of every sample carrying `label`
    pub fn indices_of(&self, label: i64) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Gather the given rows, in the given order, into a new dataset
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            images: self.images.select(Axis(0), indices),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Same images with every label replaced by the unlabeled sentinel
    pub fn without_labels(&self) -> Self {
        Self { images: self.images.clone(), labels: vec![UNLABELED; self.len()] }
    }

    /// Number of samples with a given label
    pub fn count_of(&self, label: i64) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }

    /// Borrow a loader producing batches of `batch_size`
    pub fn loader(&self, batch_size: usize) -> Result<DataLoader<'_>> {
        DataLoader::new(self, batch_size)
    }
}

/// Fixed-size batch loader over a [`Dataset`].
///
/// Every batch holds `batch_size` samples except possibly the last.
#[derive(Clone, Copy, Debug)]
pub struct DataLoader<'a> {
    dataset: &'a Dataset,
    batch_size: usize,
}

impl<'a> DataLoader<'a> {
    /// Create a loader; `batch_size` must be at least 1
    pub fn new(dataset: &'a Dataset, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize(batch_size));
        }
        Ok(Self { dataset, batch_size })
    }

    /// Configured batch size
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches in one traversal
    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// The underlying dataset
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Materialize batch `index`, if it exists
    pub fn get_batch(&self, index: usize) -> Option<Batch> {
        let start = index.checked_mul(self.batch_size)?;
        if start >= self.dataset.len() {
            return None;
        }
        let end = (start + self.batch_size).min(self.dataset.len());
        Some(Batch {
            images: self.dataset.images.slice(s![start..end, ..]).to_owned().into_dyn(),
            labels: self.dataset.labels[start..end].to_vec(),
        })
    }
}

impl BatchSource for DataLoader<'_> {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
        Box::new((0..self.num_batches()).filter_map(move |i| self.get_batch(i)))
    }
}
