//! Evaluation specification schema

use crate::device::{Device, ExecutionContext};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete evaluation specification, usually read from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Model dimensions and weight files
    pub model: ModelSpec,

    /// Validation data
    pub data: DataSpec,

    /// Run settings
    #[serde(default)]
    pub evaluation: EvaluationSpec,
}

/// Model dimensions and weight files.
///
/// `n_classes` here is the single source of truth for the cluster count:
/// the sampler, the alignment engine and the ranker are all sized from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Number of categorical classes
    #[serde(default = "default_n_classes")]
    pub n_classes: usize,

    /// Width of the continuous style code
    #[serde(default = "default_style_dim")]
    pub style_dim: usize,

    /// Flattened image size
    #[serde(default = "default_input_size")]
    pub input_size: usize,

    /// Encoder weights (JSON)
    pub encoder: PathBuf,

    /// Decoder weights (JSON)
    pub decoder: PathBuf,

    /// Categorical-only decoder used to render learned modes
    #[serde(default)]
    pub mode_decoder: Option<PathBuf>,
}

/// Validation data location and batching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSpec {
    /// Validation split (JSON dataset)
    pub validation: PathBuf,

    /// Samples per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

/// Run settings for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSpec {
    /// Seed for batch selection; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Inference device
    #[serde(default)]
    pub device: Device,

    /// Where artifacts are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Member images per cluster in the class gallery
    #[serde(default = "default_top_samples")]
    pub top_samples_per_class: usize,

    /// Bins for latent histograms
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Steps in the style-coordinate sweep
    #[serde(default = "default_sweep_steps")]
    pub feature_sweep_steps: usize,
}

impl Default for EvaluationSpec {
    fn default() -> Self {
        Self {
            seed: None,
            device: Device::default(),
            output_dir: default_output_dir(),
            top_samples_per_class: default_top_samples(),
            histogram_bins: default_histogram_bins(),
            feature_sweep_steps: default_sweep_steps(),
        }
    }
}

impl EvalSpec {
    /// Execution context for the configured device
    pub fn context(&self) -> ExecutionContext {
        ExecutionContext::new(self.evaluation.device)
    }
}

fn default_n_classes() -> usize {
    10
}

fn default_style_dim() -> usize {
    2
}

fn default_input_size() -> usize {
    784
}

fn default_batch_size() -> usize {
    100
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./eval_output")
}

fn default_top_samples() -> usize {
    8
}

fn default_histogram_bins() -> usize {
    15
}

fn default_sweep_steps() -> usize {
    10
}
