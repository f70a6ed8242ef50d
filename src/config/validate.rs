//! Range checks for evaluation specifications

use super::schema::EvalSpec;
use crate::error::Error;

/// Validation error type
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Invalid n_classes: {0} (must be >= 2)")]
    InvalidClassCount(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid input size: {0} (must be > 0)")]
    InvalidInputSize(usize),

    #[error("Invalid histogram bins: {0} (must be > 0)")]
    InvalidHistogramBins(usize),

    #[error("Invalid feature sweep steps: {0} (must be >= 2)")]
    InvalidSweepSteps(usize),
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Config(format!("Invalid config: {err}"))
    }
}

/// Check numeric ranges; the first violation wins.
pub fn validate_spec(spec: &EvalSpec) -> Result<(), ValidationError> {
    if spec.model.n_classes < 2 {
        return Err(ValidationError::InvalidClassCount(spec.model.n_classes));
    }
    if spec.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.data.batch_size));
    }
    if spec.model.input_size == 0 {
        return Err(ValidationError::InvalidInputSize(spec.model.input_size));
    }
    if spec.evaluation.histogram_bins == 0 {
        return Err(ValidationError::InvalidHistogramBins(spec.evaluation.histogram_bins));
    }
    if spec.evaluation.feature_sweep_steps < 2 {
        return Err(ValidationError::InvalidSweepSteps(spec.evaluation.feature_sweep_steps));
    }
    Ok(())
}
