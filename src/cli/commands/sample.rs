//! Sample command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::SampleArgs;
use crate::sampler::CategoricalSampler;
use ndarray::Array2;
use std::io::Write;

/// Render one-hot rows as lines of space-separated 0/1 digits
pub fn format_rows(rows: &Array2<f32>) -> String {
    rows.rows()
        .into_iter()
        .map(|row| row.iter().map(|&v| if v > 0.5 { "1" } else { "0" }).collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run_sample(args: SampleArgs, level: LogLevel) -> Result<(), String> {
    write_sample(args, level, &mut std::io::stdout().lock())
}

/// Sampled rows are the command's result and are written even with `--quiet`.
pub fn write_sample<W: Write>(args: SampleArgs, level: LogLevel, out: &mut W) -> Result<(), String> {
    let mut sampler = match args.seed {
        Some(seed) => CategoricalSampler::seeded(seed, args.n_classes),
        None => CategoricalSampler::new(args.n_classes),
    }
    .map_err(|e| e.to_string())?;

    let rows = sampler.sample(args.batch_size).map_err(|e| e.to_string())?;
    log(level, LogLevel::Verbose, &format!("{} x {} one-hot rows", rows.nrows(), rows.ncols()));
    writeln!(out, "{}", format_rows(&rows)).map_err(|e| e.to_string())
}
