//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use crate::dispatch::message_handler::code::{CaptureSize, ITERS};
use crate::registry::BenchmarkRegistry;
use crate::utils::bench::format_units;
use crate::utils::runner::CaseResult;
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Callback Dispatch Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the list of registered cases
pub fn print_available_cases(registry: &BenchmarkRegistry) {
    println!("Available cases:");
    println!();
    for case in registry.all() {
        println!("  {:<24} - {}", case.id(), case.description());
    }
}

/// Print results, one table per capture size.
///
/// Speedup is relative to the first case shown for that capture.
pub fn print_results(results: &[CaseResult], runs: usize) {
    for capture in CaptureSize::ALL {
        let group: Vec<&CaseResult> = results.iter().filter(|r| r.capture == capture).collect();
        print_results_table(&group, capture, runs);
    }
}

/// Print results table for a single capture size
pub fn print_results_table(results: &[&CaseResult], capture: CaptureSize, runs: usize) {
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    // 12+12+12+12+9+9 = 66 columns + 6 spaces + 2 indent
    let fixed_width = 74;
    let name_col_width = term_width.saturating_sub(fixed_width).max(15);
    let table_width = name_col_width + 66 + 6;

    let baseline = results.first().map(|r| r.timing.avg).unwrap_or(1.0);

    println!(
        "  Capture: {} ({} bytes, {} calls per sample, {} runs)",
        capture,
        capture.bytes(),
        ITERS,
        runs
    );
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<n_width$} {:>12} {:>12} {:>12} {:>12} {:>9} {:>9}",
        "Strategy",
        "Average",
        "Median",
        "Min",
        "Max",
        "Speedup",
        "CV",
        n_width = name_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let timing = &result.timing;
        let speedup = if timing.avg > 0.0 { baseline / timing.avg } else { 0.0 };
        let cv = if timing.avg > 0.0 {
            timing.std_dev / timing.avg
        } else {
            0.0
        };

        println!(
            "  {:<n_width$} {:>12} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}%",
            truncate(result.strategy, name_col_width),
            format_units(timing.avg as u64),
            format_units(timing.median),
            format_units(timing.min),
            format_units(timing.max),
            speedup,
            cv * 100.0,
            n_width = name_col_width
        );
    }
    println!();
}

/// Print the outcome of `--verify`
pub fn print_verified(count: usize, expected: i32) {
    println!(
        "  {} cases verified: every accumulator equals {}",
        count, expected
    );
}
