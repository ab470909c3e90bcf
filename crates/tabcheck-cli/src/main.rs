//! tabcheck command-line runner.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tabcheck_cli::logging::init_logging;
use tabcheck_cli::summary::print_summary;

mod cli;
mod commands;

use crate::cli::{Cli, Command};
use crate::commands::{RunResult, run_check, run_process, run_rules};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&cli.log_config()) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }
    // Rule failures are reported, not signalled through the exit code.
    let result = match &cli.command {
        Command::Run(args) => run_process(args).map(|result| print_run(&result)),
        Command::Check(args) => run_check(args),
        Command::Rules => run_rules(),
    };
    exit_code(result)
}

fn print_run(result: &RunResult) {
    print_summary(&result.reports);
    let Some(dirs) = &result.dirs else {
        println!("Dry run: nothing was written");
        return;
    };
    println!("Outputs: {}", dirs.output.display());
    if result.reports_written > 0 {
        println!(
            "Reports: {} ({} files)",
            dirs.reports.display(),
            result.reports_written
        );
    }
}

fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
