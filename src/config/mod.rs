//! Evaluation configuration and command-line arguments
//!
//! # Example config
//!
//! ```yaml
//! model:
//!   n_classes: 10
//!   style_dim: 2
//!   encoder: models/encoder.json
//!   decoder: models/decoder.json
//! data:
//!   validation: data/validation.json
//!   batch_size: 100
//! evaluation:
//!   seed: 42
//!   device:
//!     kind: cpu
//!   output_dir: ./eval_output
//! ```

mod args;
mod loader;
mod schema;
mod validate;


pub use args::{
    apply_overrides, parse_args, Cli, Command, EvaluateArgs, PrepareArgs, SampleArgs,
    ValidateArgs,
};
pub use loader::{load_spec, parse_spec};
pub use schema::{DataSpec, EvalSpec, EvaluationSpec, ModelSpec};
pub use validate::{validate_spec, ValidationError};
