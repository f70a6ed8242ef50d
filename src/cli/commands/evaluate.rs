//! Evaluate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{apply_overrides, load_spec, validate_spec, EvaluateArgs};
use crate::diagnostics::JsonArtifactSink;
use crate::pipeline::evaluate_from_spec;

pub fn run_evaluate(args: EvaluateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Evaluating with config: {}", args.config.display()),
    );

    let mut spec = load_spec(&args.config).map_err(|e| format!("Config error: {e}"))?;
    apply_overrides(&mut spec, &args);
    validate_spec(&spec).map_err(|e| format!("Validation failed: {e}"))?;

    let mut sink =
        JsonArtifactSink::new(&spec.evaluation.output_dir).map_err(|e| e.to_string())?;
    let summary = evaluate_from_spec(&spec, &mut sink).map_err(|e| e.to_string())?;

    log(
        level,
        LogLevel::Normal,
        &format!("✓ Supervised accuracy: {:.2}%", summary.supervised_percent),
    );
    log(level, LogLevel::Normal, &summary.alignment.to_string());
    log(level, LogLevel::Normal, &summary.ranking.to_string());
    log(
        level,
        LogLevel::Verbose,
        &format!("  Artifacts: {}", summary.artifacts.join(", ")),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("✓ Artifacts written to {}", spec.evaluation.output_dir.display()),
    );
    Ok(())
}
