//! Evaluation toolkit for semi-supervised adversarial autoencoders.
//!
//! A trained encoder maps an image to a categorical code (the cluster) and
//! a continuous style code; a decoder maps the pair back to an image. This
//! crate measures how well those clusters line up with ground-truth labels:
//! - Categorical sampling of one-hot prior codes
//! - Supervised accuracy over a labeled validation set
//! - Permutation-invariant accuracy by cluster/label alignment
//! - Per-class reconstruction loss ranking
//! - Deterministic labeled/validation/unlabeled dataset splitting
//! - Diagnostics (histograms, galleries, style sweeps) as plain data
//!
//! # Example
//!
//! ```
//! use alinear::eval::LabelAlignment;
//!
//! let mut engine = LabelAlignment::new(3).unwrap();
//! engine.accumulate(&[0, 0, 1, 2, 2], &[1, 1, 0, 2, 2]).unwrap();
//! let report = engine.finalize().unwrap();
//! assert_eq!(report.overall_accuracy(), 1.0);
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod device;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod inference;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod sampler;

pub use data::{Batch, BatchSource, DataLoader, Dataset, UNLABELED};
pub use device::{Device, ExecutionContext};
pub use error::{Error, Result};
pub use inference::{infer, predict_labels, LatentCode};
pub use model::{AffineDecoder, AffineEncoder, Decoder, Encoder, EncoderOutput, ModelMode, Module};
pub use pipeline::{evaluate_from_spec, EvaluationSummary};
pub use report::EpochLosses;
pub use sampler::{sample_categorical, CategoricalSampler};
