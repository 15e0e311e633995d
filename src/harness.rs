//! Benchmark harness entry point: argument parsing, case selection, timing
//! and reporting. Returns a process exit code.

use std::ffi::OsString;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::dispatch::message_handler::code::{expected_total, SYS};
use crate::error::HarnessError;
use crate::registry::{build_registry, BenchmarkCase, BenchmarkRegistry};
use crate::utils::runner;
use crate::utils::tui;

/// Install a stderr logger; stdout is reserved for the report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // A second harness run in the same process keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Parse `args` (program name first) and run the harness.
pub fn main_with_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let code = err.exit_code();
            let _ = err.print();
            return code;
        }
    };

    init_tracing(cli.verbose);

    let registry = build_registry();
    match run(&cli, &registry) {
        Ok(()) => 0,
        Err(e) => {
            error!("{}", e);
            1
        }
    }
}

fn select<'r>(
    cli: &Cli,
    registry: &'r BenchmarkRegistry,
) -> Result<Vec<&'r BenchmarkCase>, HarnessError> {
    match &cli.filter {
        Some(pattern) => {
            let cases = registry.matching(pattern);
            if cases.is_empty() {
                return Err(HarnessError::NoMatchingCase(pattern.clone()));
            }
            Ok(cases)
        }
        None => Ok(registry.all().iter().collect()),
    }
}

fn run(cli: &Cli, registry: &BenchmarkRegistry) -> Result<(), HarnessError> {
    if cli.list {
        tui::print_available_cases(registry);
        return Ok(());
    }

    let cases = select(cli, registry)?;

    if cli.verify {
        runner::verify_cases(&cases)?;
        tui::print_verified(cases.len(), expected_total(SYS, 0));
        return Ok(());
    }

    let config = cli.timing_config();
    tui::print_header();
    let results = runner::run_cases(&cases, &config);

    if let Some(path) = &cli.csv {
        runner::export_csv(path, &results)?;
        info!("raw samples exported to {}", path.display());
    }

    tui::print_results(&results, config.runs_per_variant);
    Ok(())
}
