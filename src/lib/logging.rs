//! Formatting and summary logging helpers.
//!
//! Console output is informational only. Everything here goes through the `log` macros, so
//! it lands on stderr via `env_logger` and never mixes with BAM written to stdout.

use std::time::{Duration, Instant};

use bstr::ByteSlice;

use crate::rewrite::{RunCounters, UNRECOGNIZED};

/// Formats an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use rgremap_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` decimal places.
///
/// ```
/// use rgremap_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as `45s`, `2m 15s` or `1h 30m`.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, mins, secs) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    match (hours, mins, secs) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m {s}s"),
        (h, 0, _) => format!("{h}h"),
        (h, m, _) => format!("{h}h {m}m"),
    }
}

/// Formats a throughput as records per second (or per minute when slow).
#[must_use]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} records/s", format_count(rate as u64))
    } else {
        format!("{:.1} records/min", rate * 60.0)
    }
}

/// Fraction of `part` in `total`, zero when `total` is zero.
#[must_use]
pub fn fraction(part: u64, total: u64) -> f64 {
    if total == 0 { 0.0 } else { part as f64 / total as f64 }
}

/// Logs the end-of-run summary for a read group rewrite.
///
/// # Examples
///
/// ```no_run
/// use rgremap_lib::logging::log_rewrite_summary;
/// use rgremap_lib::rewrite::RunCounters;
///
/// log_rewrite_summary(&RunCounters::default());
/// ```
pub fn log_rewrite_summary(counters: &RunCounters) {
    log::info!("RG renaming done, wrote {} records", format_count(counters.records_seen));
    log::info!(
        "{} records had an unrecognized read group ({})",
        format_count(counters.unrecognized),
        format_percent(fraction(counters.unrecognized, counters.records_seen), 2)
    );

    let known = counters
        .by_read_group
        .iter()
        .filter(|(read_group, _)| read_group.as_bytes() != UNRECOGNIZED.as_bytes());
    for (read_group, count) in known {
        log::debug!("  {}: {}", read_group.to_str_lossy(), format_count(*count));
    }
}

/// Times an operation and logs its completion with a count and rate.
///
/// ```no_run
/// use rgremap_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Rewriting read groups");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Starts the timer and logs the start of the operation.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs completion with `count` records processed.
    pub fn log_completion(&self, count: u64) {
        let elapsed = self.start_time.elapsed();
        log::info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(elapsed),
            format_rate(count, elapsed)
        );
    }
}
