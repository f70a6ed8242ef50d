//! CLI types - Cli, Command, and argument structs

use crate::data::SplitConfig;
use crate::sampler::DEFAULT_CLASSES;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Alinear: evaluation toolkit for semi-supervised adversarial autoencoders
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "alinear")]
#[command(version)]
#[command(about = "Prepare splits and evaluate semi-supervised adversarial autoencoders")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Split IDX image/label files into labeled, validation and unlabeled sets
    Prepare(PrepareArgs),

    /// Evaluate trained models against a validation split
    Evaluate(EvaluateArgs),

    /// Print one-hot categorical samples
    Sample(SampleArgs),

    /// Validate an evaluation config without running it
    Validate(ValidateArgs),
}

/// Arguments for the prepare command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PrepareArgs {
    /// IDX image file (idx3-ubyte)
    #[arg(long)]
    pub images: PathBuf,

    /// IDX label file (idx1-ubyte)
    #[arg(long)]
    pub labels: PathBuf,

    /// Directory receiving the three split files
    #[arg(short, long)]
    pub output_dir: PathBuf,

    /// Labeled training samples per class
    #[arg(long, default_value_t = 300)]
    pub labeled_per_class: usize,

    /// Validation samples per class
    #[arg(long, default_value_t = 1000)]
    pub validation_per_class: usize,

    /// Number of classes
    #[arg(long, default_value_t = DEFAULT_CLASSES)]
    pub n_classes: usize,
}

impl PrepareArgs {
    /// Split sizes requested on the command line
    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            labeled_per_class: self.labeled_per_class,
            validation_per_class: self.validation_per_class,
        }
    }
}

/// Arguments for the evaluate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// Path to YAML evaluation config
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the sample command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Rows to draw
    #[arg(short, long)]
    pub batch_size: usize,

    /// Number of classes
    #[arg(short, long, default_value_t = DEFAULT_CLASSES)]
    pub n_classes: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML evaluation config
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to an EvalSpec
pub fn apply_overrides(spec: &mut crate::config::EvalSpec, args: &EvaluateArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.evaluation.output_dir = output_dir.clone();
    }
    if let Some(batch_size) = args.batch_size {
        spec.data.batch_size = batch_size;
    }
    if let Some(seed) = args.seed {
        spec.evaluation.seed = Some(seed);
    }
}
