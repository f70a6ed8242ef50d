//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_spec, EvalSpec, ValidateArgs};

/// Format model information as a string
pub fn format_model_info(spec: &EvalSpec) -> String {
    let model = &spec.model;
    let mut lines = vec![
        format!("  Classes: {}", model.n_classes),
        format!("  Style dim: {}", model.style_dim),
        format!("  Input size: {}", model.input_size),
        format!("  Encoder: {}", model.encoder.display()),
        format!("  Decoder: {}", model.decoder.display()),
    ];
    if let Some(modes) = &model.mode_decoder {
        lines.push(format!("  Mode decoder: {}", modes.display()));
    }
    lines.join("\n")
}

/// Format data and run settings as a string
pub fn format_run_info(spec: &EvalSpec) -> String {
    let eval = &spec.evaluation;
    let seed = eval.seed.map_or_else(|| "random".to_string(), |s| s.to_string());
    [
        format!("  Validation data: {}", spec.data.validation.display()),
        format!("  Batch size: {}", spec.data.batch_size),
        format!("  Device: {}", eval.device),
        format!("  Seed: {seed}"),
        format!("  Output dir: {}", eval.output_dir.display()),
    ]
    .join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_spec(&args.config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "✓ Configuration is valid");

    if args.detailed {
        log(level, LogLevel::Normal, "");
        log(level, LogLevel::Normal, &format_model_info(&spec));
        log(level, LogLevel::Normal, "");
        log(level, LogLevel::Normal, &format_run_info(&spec));
    }

    Ok(())
}
