//! Error types with actionable diagnostics.
//!
//! Accumulation-phase failures abort an evaluation pass. Degenerate outcomes
//! found at finalize time (a cluster that was never predicted, a class with no
//! samples) are not errors; they are reported as tagged variants in the
//! finalize reports instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for alinear operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing data or evaluating a model.
#[derive(Error, Debug)]
pub enum Error {
    /// Batch size of zero requested.
    #[error("Invalid batch size: {0}\n  → batch_size must be at least 1")]
    InvalidBatchSize(usize),

    /// Class count too small to form a categorical distribution.
    #[error("Invalid class count: {0}\n  → n_classes must be at least 2")]
    InvalidClassCount(usize),

    /// An evaluator that needs at least one sample saw none.
    #[error("Empty dataset: {context}\n  → Check the dataset path and split sizes")]
    EmptyDataset { context: String },

    /// Label outside `[0, n_classes)`.
    #[error("Label {label} out of range for {n_classes} classes\n  → Check n_classes in the evaluation config")]
    LabelOutOfRange { label: i64, n_classes: usize },

    /// The unlabeled sentinel reached a metric that needs ground truth.
    #[error("Unlabeled sample (label -1) at position {index}\n  → Evaluate on the validation split, not the unlabeled split")]
    UnlabeledSample { index: usize },

    /// Paired sequences differ in length.
    #[error("Length mismatch: {left} labels vs {right} predictions")]
    LengthMismatch { left: usize, right: usize },

    /// Tensor shape does not match what a model or metric expects.
    #[error("Tensor shape mismatch: expected {expected:?}, got {actual:?}\n  → Check input_size, n_classes and style_dim against the model weights")]
    ShapeMismatch { expected: Vec<usize>, actual: Vec<usize> },

    /// Accumulate called on an engine whose result is already final.
    #[error("Accumulator already finalized\n  → Start a new evaluation pass with a fresh accumulator")]
    AlreadyFinalized,

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model weight file not found.
    #[error("Model file not found: {path}\n  → Export the trained weights or fix the path in the config")]
    ModelNotFound { path: PathBuf },

    /// IDX file is truncated or has the wrong magic number.
    #[error("Invalid IDX file: {0}")]
    InvalidIdx(String),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Create an empty-dataset error with context.
    pub fn empty(context: impl Into<String>) -> Self {
        Self::EmptyDataset { context: context.into() }
    }

    /// Check if this error is caused by user input rather than a bug.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBatchSize(_)
                | Self::InvalidClassCount(_)
                | Self::EmptyDataset { .. }
                | Self::LabelOutOfRange { .. }
                | Self::UnlabeledSample { .. }
                | Self::Config(_)
                | Self::ModelNotFound { .. }
                | Self::InvalidIdx(_)
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidBatchSize(_) => "E001",
            Self::InvalidClassCount(_) => "E002",
            Self::EmptyDataset { .. } => "E003",
            Self::LabelOutOfRange { .. } => "E004",
            Self::UnlabeledSample { .. } => "E005",
            Self::LengthMismatch { .. } => "E006",
            Self::ShapeMismatch { .. } => "E010",
            Self::AlreadyFinalized => "E020",
            Self::Config(_) => "E030",
            Self::ModelNotFound { .. } => "E031",
            Self::InvalidIdx(_) => "E040",
            Self::Io { .. } => "E050",
            Self::Serialization(_) => "E051",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_error_codes_are_unique() {
        let errors = vec![
            Error::InvalidBatchSize(0),
            Error::InvalidClassCount(1),
            Error::empty(""),
            Error::LabelOutOfRange { label: 0, n_classes: 0 },
            Error::UnlabeledSample { index: 0 },
            Error::LengthMismatch { left: 0, right: 0 },
            Error::ShapeMismatch { expected: vec![], actual: vec![] },
            Error::AlreadyFinalized,
            Error::Config(String::new()),
            Error::ModelNotFound { path: PathBuf::new() },
            Error::InvalidIdx(String::new()),
            Error::io("", std::io::Error::other("x")),
            Error::Serialization(String::new()),
        ];

        let codes: HashSet<_> = errors.iter().map(Error::code).collect();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_precondition_errors_are_user_errors() {
        assert!(Error::InvalidBatchSize(0).is_user_error());
        assert!(Error::InvalidClassCount(0).is_user_error());
        assert!(Error::empty("validation").is_user_error());
        assert!(!Error::AlreadyFinalized.is_user_error());
        assert!(!Error::ShapeMismatch { expected: vec![1], actual: vec![2] }.is_user_error());
    }

    #[test]
    fn test_messages_are_actionable() {
        let msg = Error::UnlabeledSample { index: 7 }.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains("validation split"));

        let msg = Error::LabelOutOfRange { label: 12, n_classes: 10 }.to_string();
        assert!(msg.contains("12"));
        assert!(msg.contains("10 classes"));
    }

    #[test]
    fn test_io_error_constructor() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::io("reading validation.json", io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("reading validation.json"));
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.code(), "E051");
    }
}
