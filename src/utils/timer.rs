//! Timing loop for benchmark cases.
//!
//! - CPU cycles or wall-clock time (via features)
//! - CPU core pinning while measuring
//! - Sequential (registration order) or shuffled execution
//! - All raw samples preserved for external analysis

use std::hint::black_box;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::bench::{to_units, Measurement};
use super::cpu_affinity::CpuPinGuard;

// ============================================================================
// Configuration
// ============================================================================

/// CPU pinning strategy during measurements
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PinStrategy {
    /// Pin once before all measurements (minimal overhead)
    Global,
    /// Pin/unpin around each sample
    #[default]
    PerExecution,
}

/// Order in which samples are taken
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Schedule {
    /// Each variant runs all its samples before the next one starts
    #[default]
    Sequential,
    /// All samples of all variants interleaved in a seeded random order
    Shuffled { seed: u64 },
}

/// Configuration for timing measurements
#[derive(Clone, Debug)]
pub struct TimingConfig {
    /// Number of samples to collect per variant (default: 30)
    pub runs_per_variant: usize,
    /// Number of warmup executions before measurement (default: 10)
    pub warmup_iterations: usize,
    /// CPU pinning strategy (default: PerExecution)
    pub pin_strategy: PinStrategy,
    /// Sample ordering (default: Sequential)
    pub schedule: Schedule,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            runs_per_variant: 30,
            warmup_iterations: 10,
            pin_strategy: PinStrategy::default(),
            schedule: Schedule::default(),
        }
    }
}

/// A variant to be measured
pub struct Variant<'a> {
    /// Unique name of the variant
    pub name: String,
    /// One timed execution. Timing happens inside the closure so the
    /// `FnMut` call itself stays outside the measured region.
    pub run: Box<dyn FnMut() -> Measurement + 'a>,
}

/// Result from measuring a single variant, in raw units
#[derive(Clone, Debug, PartialEq)]
pub struct VariantResult {
    pub name: String,
    /// Every sample, in the order it was taken
    pub samples: Vec<u64>,
    pub avg: f64,
    pub median: u64,
    pub min: u64,
    pub max: u64,
    pub std_dev: f64,
}

/// Measure variants according to `config`.
///
/// Warms every variant up, then collects `runs_per_variant` samples each.
/// Results come back in the order the variants were given.
pub fn measure_variants(mut variants: Vec<Variant>, config: &TimingConfig) -> Vec<VariantResult> {
    if variants.is_empty() {
        return Vec::new();
    }

    let samples = config.runs_per_variant;

    // One entry per sample: variant index
    let mut tasks: Vec<usize> = (0..variants.len())
        .flat_map(|v| std::iter::repeat(v).take(samples))
        .collect();
    if let Schedule::Shuffled { seed } = config.schedule {
        tasks.shuffle(&mut StdRng::seed_from_u64(seed));
        tracing::debug!(seed, tasks = tasks.len(), "shuffled sample schedule");
    }

    let mut measurements: Vec<Vec<u64>> = (0..variants.len())
        .map(|_| Vec::with_capacity(samples))
        .collect();

    let global_pin = (config.pin_strategy == PinStrategy::Global).then(CpuPinGuard::new);
    if let Some(pin) = &global_pin {
        match pin.core_id() {
            Some(core) => tracing::debug!(core, "pinned measuring thread"),
            None => tracing::warn!("could not pin measuring thread, timings may be noisier"),
        }
    }

    let mut warmed = vec![false; variants.len()];
    let mut warned_unpinned = false;

    for variant_idx in tasks {
        let variant = &mut variants[variant_idx];

        if !warmed[variant_idx] {
            for _ in 0..config.warmup_iterations {
                black_box((variant.run)());
            }
            warmed[variant_idx] = true;
        }

        let per_exec_pin =
            (config.pin_strategy == PinStrategy::PerExecution).then(CpuPinGuard::new);
        if let Some(pin) = &per_exec_pin {
            if !pin.is_pinned() && !warned_unpinned {
                tracing::warn!("could not pin measuring thread, timings may be noisier");
                warned_unpinned = true;
            }
        }

        let elapsed = (variant.run)();
        drop(per_exec_pin);

        measurements[variant_idx].push(to_units(elapsed));
    }

    drop(global_pin);

    variants
        .into_iter()
        .zip(measurements)
        .map(|(variant, samples)| compute_variant_result(variant.name, samples))
        .collect()
}

/// Compute statistics from raw samples
fn compute_variant_result(name: String, samples: Vec<u64>) -> VariantResult {
    if samples.is_empty() {
        return VariantResult {
            name,
            samples,
            avg: 0.0,
            median: 0,
            min: 0,
            max: 0,
            std_dev: 0.0,
        };
    }

    let mut sorted = samples.clone();
    sorted.sort_unstable();

    let sum: u64 = samples.iter().sum();
    let avg = sum as f64 / samples.len() as f64;

    let variance: f64 = samples
        .iter()
        .map(|&n| {
            let diff = n as f64 - avg;
            diff * diff
        })
        .sum::<f64>()
        / (samples.len() - 1).max(1) as f64;

    VariantResult {
        name,
        avg,
        median: sorted[sorted.len() / 2],
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        std_dev: variance.sqrt(),
        samples,
    }
}
