//! Supervised classification accuracy over a labeled set

use crate::data::{BatchSource, UNLABELED};
use crate::device::ExecutionContext;
use crate::error::{Error, Result};
use crate::inference::infer;
use crate::model::Encoder;

/// Running correct/total counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccuracyCounter {
    correct: usize,
    total: usize,
    n_classes: Option<usize>,
}

impl AccuracyCounter {
    /// Empty counter; any non-negative label is accepted
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty counter that rejects labels outside `[0, n_classes)`
    pub fn with_classes(n_classes: usize) -> Self {
        Self { n_classes: Some(n_classes), ..Self::default() }
    }

    /// Compare one batch of predictions against ground truth
    pub fn update(&mut self, true_labels: &[i64], predicted: &[usize]) -> Result<()> {
        if true_labels.len() != predicted.len() {
            return Err(Error::LengthMismatch { left: true_labels.len(), right: predicted.len() });
        }
        for (index, &t) in true_labels.iter().enumerate() {
            if t == UNLABELED {
                return Err(Error::UnlabeledSample { index });
            }
            let limit = self.n_classes.unwrap_or(usize::MAX);
            if t < 0 || t as usize >= limit {
                return Err(Error::LabelOutOfRange { label: t, n_classes: self.n_classes.unwrap_or(0) });
            }
        }
        self.correct += true_labels.iter().zip(predicted).filter(|&(&t, &p)| t as usize == p).count();
        self.total += true_labels.len();
        Ok(())
    }

    /// Samples predicted correctly
    pub fn correct(&self) -> usize {
        self.correct
    }

    /// Samples seen
    pub fn total(&self) -> usize {
        self.total
    }

    /// `100 * correct / total`; fails if no sample was seen
    pub fn percent(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(Error::empty("accuracy needs at least one labeled sample"));
        }
        Ok(100.0 * self.correct as f64 / self.total as f64)
    }
}

/// Percentage of samples in `source` whose predicted class equals the label.
///
/// # Example
///
/// ```
/// use alinear::eval::classification_accuracy;
/// use alinear::{AffineEncoder, Dataset, ExecutionContext};
/// use ndarray::{array, Array2};
///
/// // identity weights: the predicted class is the hottest pixel
/// let mut encoder = AffineEncoder::new(Array2::eye(2) * 10.0, array![0.0, 0.0], 2).unwrap();
/// let data = Dataset::new(array![[1.0, 0.0], [0.0, 1.0]], vec![0, 0]).unwrap();
/// let loader = data.loader(2).unwrap();
///
/// let pct = classification_accuracy(&mut encoder, &loader, &ExecutionContext::cpu()).unwrap();
/// assert_eq!(pct, 50.0);
/// ```
pub fn classification_accuracy<E, S>(encoder: &mut E, source: &S, ctx: &ExecutionContext) -> Result<f64>
where
    E: Encoder + ?Sized,
    S: BatchSource + ?Sized,
{
    let mut counter: Option<AccuracyCounter> = None;
    for batch in source.batches() {
        let code = infer(encoder, &batch, ctx)?;
        counter
            .get_or_insert_with(|| AccuracyCounter::with_classes(code.n_classes()))
            .update(&batch.labels, &code.predicted_labels())?;
    }
    let counter = counter.unwrap_or_default();
    let pct = counter.percent()?;
    tracing::info!(accuracy = pct, samples = counter.total(), "classification accuracy");
    Ok(pct)
}
