//! Batch data structure and batch iteration

use crate::error::{Error, Result};
use ndarray::{ArrayD, ArrayView2};

/// An ordered collection of images with their labels.
///
/// Images may arrive in any shape whose leading axis is the batch axis, e.g.
/// `(batch, 28, 28)` or `(batch, 784)`. They are flattened on demand through
/// [`Batch::flat_images`] without touching the stored array.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    /// Image tensor, batch axis first
    pub images: ArrayD<f32>,
    /// Integer labels, `-1` for unlabeled samples
    pub labels: Vec<i64>,
}

impl Batch {
    /// Create a new batch, checking that every image has a label
    pub fn new(images: ArrayD<f32>, labels: Vec<i64>) -> Result<Self> {
        let rows = images.shape().first().copied().unwrap_or(0);
        if rows != labels.len() {
            return Err(Error::LengthMismatch { left: labels.len(), right: rows });
        }
        Ok(Self { images, labels })
    }

    /// Number of samples in the batch
    pub fn size(&self) -> usize {
        self.labels.len()
    }

    /// Whether the batch holds no samples
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// View the images as `(batch, input_size)` without copying.
    pub fn flat_images(&self, input_size: usize) -> Result<ArrayView2<'_, f32>> {
        let shape_err = || Error::ShapeMismatch {
            expected: vec![self.size(), input_size],
            actual: self.images.shape().to_vec(),
        };

        let per_sample: usize = self.images.shape().iter().skip(1).product();
        if per_sample != input_size {
            return Err(shape_err());
        }

        self.images
            .view()
            .into_shape_with_order((self.size(), input_size))
            .map_err(|_| shape_err())
    }
}

/// A finite, restartable, ordered sequence of batches.
///
/// Each call to [`BatchSource::batches`] starts a fresh traversal.
pub trait BatchSource {
    /// Iterate the batches from the beginning
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_>;
}

impl BatchSource for [Batch] {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
        Box::new(self.iter().cloned())
    }
}

impl BatchSource for Vec<Batch> {
    fn batches(&self) -> Box<dyn Iterator<Item = Batch> + '_> {
        self.as_slice().batches()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};

    #[test]
    fn test_batch_creation() {
        let images = Array2::<f32>::zeros((3, 4)).into_dyn();
        let batch = Batch::new(images, vec![0, 1, 2]).unwrap();
        assert_eq!(batch.size(), 3);
        assert!(!batch.is_empty());
    }

    #[test]
    fn test_batch_rejects_label_count_mismatch() {
        let images = Array2::<f32>::zeros((3, 4)).into_dyn();
        let err = Batch::new(images, vec![0, 1]).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { left: 2, right: 3 }));
    }

    #[test]
    fn test_flat_images_from_square_images() {
        let images = Array3::<f32>::from_shape_fn((2, 2, 2), |(b, r, c)| (b * 4 + r * 2 + c) as f32);
        let batch = Batch::new(images.into_dyn(), vec![0, 1]).unwrap();

        let flat = batch.flat_images(4).unwrap();
        assert_eq!(flat.shape(), &[2, 4]);
        assert_eq!(flat[[1, 3]], 7.0);
        // stored tensor keeps its shape
        assert_eq!(batch.images.shape(), &[2, 2, 2]);
    }

    #[test]
    fn test_flat_images_wrong_size() {
        let batch = Batch::new(Array2::<f32>::zeros((2, 5)).into_dyn(), vec![0, 1]).unwrap();
        let err = batch.flat_images(4).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_slice_source_is_restartable() {
        let batch = Batch::new(Array2::<f32>::zeros((1, 2)).into_dyn(), vec![3]).unwrap();
        let source = vec![batch.clone(), batch];
        assert_eq!(source.batches().count(), 2);
        assert_eq!(source.batches().count(), 2);
    }
}
