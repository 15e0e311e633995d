use clap::Parser;
use std::path::PathBuf;

use crate::utils::timer::{PinStrategy, Schedule, TimingConfig};

/// Harness command line
#[derive(Parser, Debug)]
#[command(
    name = "callback-bench",
    version,
    about = "Callback dispatch micro-benchmark",
    long_about = "Times a message handler invoked 1000 times per call through a boxed \
                  closure, an inlined boxed closure, a generic closure, a function pointer \
                  with userdata, and a generic-to-function-pointer adapter, each with a \
                  small and a big capture."
)]
pub struct Cli {
    /// Only run cases whose id contains this text (e.g. "fn_ptr" or "/big")
    pub filter: Option<String>,

    /// List registered cases and exit
    #[arg(short, long)]
    pub list: bool,

    /// Check every selected case's result instead of timing it
    #[arg(long)]
    pub verify: bool,

    /// Samples collected per case
    #[arg(short, long, default_value_t = 30)]
    pub runs: usize,

    /// Untimed executions per case before sampling
    #[arg(short, long, default_value_t = 10)]
    pub warmup: usize,

    /// Interleave samples of all cases in random order
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for --shuffle (default: random)
    #[arg(long, requires = "shuffle")]
    pub seed: Option<u64>,

    /// When to pin the measuring thread to its CPU
    #[arg(long, value_enum, default_value_t = PinStrategy::PerExecution)]
    pub pin: PinStrategy,

    /// Export every raw sample to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn timing_config(&self) -> TimingConfig {
        let schedule = if self.shuffle {
            Schedule::Shuffled {
                seed: self.seed.unwrap_or_else(rand::random::<u64>),
            }
        } else {
            Schedule::Sequential
        };

        TimingConfig {
            runs_per_variant: self.runs,
            warmup_iterations: self.warmup,
            pin_strategy: self.pin,
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["callback-bench"]).unwrap();
        let config = cli.timing_config();
        assert_eq!(config.runs_per_variant, 30);
        assert_eq!(config.warmup_iterations, 10);
        assert_eq!(config.pin_strategy, PinStrategy::PerExecution);
        assert_eq!(config.schedule, Schedule::Sequential);
        assert!(cli.filter.is_none());
    }

    #[test]
    fn test_shuffle_with_seed() {
        let cli = Cli::try_parse_from([
            "callback-bench",
            "--shuffle",
            "--seed",
            "99",
            "--pin",
            "global",
            "-r",
            "5",
            "boxed_fn",
        ])
        .unwrap();
        let config = cli.timing_config();
        assert_eq!(config.schedule, Schedule::Shuffled { seed: 99 });
        assert_eq!(config.pin_strategy, PinStrategy::Global);
        assert_eq!(config.runs_per_variant, 5);
        assert_eq!(cli.filter.as_deref(), Some("boxed_fn"));
    }

    #[test]
    fn test_seed_requires_shuffle() {
        assert!(Cli::try_parse_from(["callback-bench", "--seed", "1"]).is_err());
    }
}
