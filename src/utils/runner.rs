//! Running registered cases and exporting their raw samples.

use std::io::Write;
use std::path::Path;

use crate::dispatch::message_handler::code::{expected_total, CaptureSize, SYS};
use crate::error::HarnessError;
use crate::registry::BenchmarkCase;
use crate::utils::bench::unit_name;
use crate::utils::timer::{measure_variants, TimingConfig, VariantResult};

/// Timing result of one benchmark case
#[derive(Clone, Debug)]
pub struct CaseResult {
    pub strategy: &'static str,
    pub capture: CaptureSize,
    pub timing: VariantResult,
}

/// Time the given cases, in the order given (or shuffled, per `config`).
pub fn run_cases(cases: &[&BenchmarkCase], config: &TimingConfig) -> Vec<CaseResult> {
    let variants = cases.iter().map(|c| c.build()).collect();

    tracing::info!(
        cases = cases.len(),
        runs = config.runs_per_variant,
        warmup = config.warmup_iterations,
        "measuring"
    );

    measure_variants(variants, config)
        .into_iter()
        .zip(cases)
        .map(|(timing, case)| CaseResult {
            strategy: case.strategy(),
            capture: case.capture(),
            timing,
        })
        .collect()
}

/// Run every case's self-check against the reference accumulator value.
pub fn verify_cases(cases: &[&BenchmarkCase]) -> Result<(), HarnessError> {
    let expected = expected_total(SYS, 0);
    for case in cases {
        let actual = case.check(SYS);
        if actual != expected {
            return Err(HarnessError::Verification {
                case: case.id(),
                expected,
                actual,
            });
        }
        tracing::debug!(case = %case.id(), actual, "verified");
    }
    Ok(())
}

/// Write one CSV row per raw sample.
pub fn write_csv<W: Write>(mut out: W, results: &[CaseResult]) -> std::io::Result<()> {
    let compiler = crate::driver::Compiler::current();
    let opt_level = crate::driver::OptLevel::current();

    writeln!(out, "case,strategy,capture,compiler,opt_level,unit,sample,value")?;

    for result in results {
        for (idx, value) in result.timing.samples.iter().enumerate() {
            writeln!(
                out,
                "{},{},{},{},{},{},{},{}",
                result.timing.name,
                result.strategy,
                result.capture,
                compiler,
                opt_level,
                unit_name(),
                idx,
                value
            )?;
        }
    }

    Ok(())
}

/// Export raw samples to a CSV file
pub fn export_csv(path: &Path, results: &[CaseResult]) -> Result<(), HarnessError> {
    let csv_err = |source| HarnessError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::create(path).map_err(csv_err)?;
    let mut writer = std::io::BufWriter::new(file);
    write_csv(&mut writer, results).map_err(csv_err)?;
    writer.flush().map_err(csv_err)
}
