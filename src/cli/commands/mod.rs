//! CLI command implementations

mod evaluate;
mod prepare;
mod sample;
mod validate;

#[cfg(test)]
mod tests;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Prepare(args) => prepare::run_prepare(args, log_level),
        Command::Evaluate(args) => evaluate::run_evaluate(args, log_level),
        Command::Sample(args) => sample::run_sample(args, log_level),
        Command::Validate(args) => validate::run_validate(args, log_level),
    }
}
