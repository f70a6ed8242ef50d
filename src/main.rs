//! Alinear CLI
//!
//! # Usage
//!
//! ```bash
//! # Split IDX files into labeled / validation / unlabeled sets
//! alinear prepare --images train-images-idx3-ubyte --labels train-labels-idx1-ubyte -o data/
//!
//! # Evaluate exported models
//! alinear evaluate eval.yaml
//!
//! # Validate config
//! alinear validate eval.yaml --detailed
//!
//! # Draw one-hot prior samples
//! alinear sample --batch-size 4 --seed 42
//! ```

use alinear::cli::{init_tracing, run_command, Cli, LogLevel};
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.verbose, cli.quiet));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
