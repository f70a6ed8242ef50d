//! Synthetic one-hot class codes for the categorical discriminator
//!
//! Each row picks a class uniformly from `[0, n_classes)` and one-hot encodes it.

use crate::error::{Error, Result};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default number of classes (digits 0-9)
pub const DEFAULT_CLASSES: usize = 10;

/// Draw a `(batch_size, n_classes)` one-hot matrix from `rng`.
///
/// # Example
///
/// ```
/// use alinear::sampler::sample_categorical;
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let codes = sample_categorical(&mut rng, 4, 10).unwrap();
/// assert_eq!(codes.shape(), &[4, 10]);
/// assert!(codes.rows().into_iter().all(|row| row.sum() == 1.0));
/// ```
pub fn sample_categorical<R: Rng>(
    rng: &mut R,
    batch_size: usize,
    n_classes: usize,
) -> Result<Array2<f32>> {
    if batch_size == 0 {
        return Err(Error::InvalidBatchSize(batch_size));
    }
    if n_classes < 2 {
        return Err(Error::InvalidClassCount(n_classes));
    }

    let mut codes = Array2::zeros((batch_size, n_classes));
    for mut row in codes.rows_mut() {
        row[rng.random_range(0..n_classes)] = 1.0;
    }
    Ok(codes)
}

/// Categorical sampler owning its random source.
///
/// Seeded samplers reproduce the same sequence of batches.
#[derive(Debug, Clone)]
pub struct CategoricalSampler {
    rng: StdRng,
    n_classes: usize,
}

impl CategoricalSampler {
    /// Sampler over `n_classes` seeded from the operating system
    pub fn new(n_classes: usize) -> Result<Self> {
        Self::with_rng(StdRng::from_os_rng(), n_classes)
    }

    /// Sampler over `n_classes` with a fixed seed
    pub fn seeded(seed: u64, n_classes: usize) -> Result<Self> {
        Self::with_rng(StdRng::seed_from_u64(seed), n_classes)
    }

    fn with_rng(rng: StdRng, n_classes: usize) -> Result<Self> {
        if n_classes < 2 {
            return Err(Error::InvalidClassCount(n_classes));
        }
        Ok(Self { rng, n_classes })
    }

    /// Number of classes drawn from
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Draw the next `(batch_size, n_classes)` one-hot batch
    pub fn sample(&mut self, batch_size: usize) -> Result<Array2<f32>> {
        sample_categorical(&mut self.rng, batch_size, self.n_classes)
    }
}
