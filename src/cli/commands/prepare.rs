//! Prepare command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::PrepareArgs;
use crate::data::{read_idx_dataset, save_splits, split_dataset};

pub fn run_prepare(args: PrepareArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Reading {} and {}", args.images.display(), args.labels.display()),
    );

    let source = read_idx_dataset(&args.images, &args.labels).map_err(|e| e.to_string())?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  {} samples of {} pixels", source.len(), source.input_dim()),
    );

    let splits =
        split_dataset(&source, args.split_config(), args.n_classes).map_err(|e| e.to_string())?;
    let paths = save_splits(&splits, &args.output_dir).map_err(|e| e.to_string())?;

    let sizes = [splits.labeled.len(), splits.validation.len(), splits.unlabeled.len()];
    for (path, size) in paths.iter().zip(sizes) {
        log(level, LogLevel::Normal, &format!("✓ {} ({size} samples)", path.display()));
    }
    Ok(())
}
