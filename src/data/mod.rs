//! Datasets, batches, and the deterministic labeled/validation/unlabeled split
//!
//! - `batch`: [`Batch`] and the [`BatchSource`] iteration abstraction
//! - `dataset`: in-memory [`Dataset`] and its fixed-size [`DataLoader`]
//! - `split`: per-class index slicing into the three training splits
//! - `idx`: parser for the canonical IDX image/label files
//! - `io`: JSON persistence for prepared splits

mod batch;
mod dataset;
mod idx;
mod io;
mod split;

#[cfg(test)]
mod tests;

pub use batch::{Batch, BatchSource};
pub use dataset::{DataLoader, Dataset};
pub use idx::{parse_idx_images, parse_idx_labels, read_idx_dataset};
#[cfg(test)]
pub(crate) use idx::{encode_idx_images, encode_idx_labels};
pub use io::{load_dataset, save_dataset, save_splits, LABELED_FILE, UNLABELED_FILE, VALIDATION_FILE};
pub use split::{split_dataset, DatasetSplits, SplitConfig};

/// Label sentinel for samples without ground truth.
pub const UNLABELED: i64 = -1;
