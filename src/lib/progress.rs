//! Progress logging at fixed record intervals.
//!
//! The logger is owned by the single thread driving the rewrite, so the count is a plain
//! integer. Logging has no effect on what is written.

use log::info;

use crate::logging::format_count;

/// Default number of records between progress messages.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Logs `"<message> <count>"` each time the count reaches a multiple of the interval.
///
/// # Example
/// ```
/// use rgremap_lib::progress::ProgressLogger;
///
/// let mut progress = ProgressLogger::new("Rewrote records").with_interval(100);
/// for _ in 0..250 {
///     progress.record();  // logs at 100 and 200
/// }
/// progress.log_final();  // logs "Rewrote records 250 (complete)"
/// assert_eq!(progress.count(), 250);
/// ```
#[derive(Debug)]
pub struct ProgressLogger {
    message: String,
    interval: u64,
    count: u64,
}

impl ProgressLogger {
    /// Creates a logger with the default interval.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), interval: DEFAULT_PROGRESS_INTERVAL, count: 0 }
    }

    /// Sets the logging interval. An interval of zero is treated as one.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Counts one record, logging if an interval boundary was reached.
    pub fn record(&mut self) {
        self.count += 1;
        if self.on_boundary() {
            info!("{} {}", self.message, format_count(self.count));
        }
    }

    /// Logs the final count unless the last [`record`](Self::record) call already did.
    pub fn log_final(&self) {
        if self.count > 0 && !self.on_boundary() {
            info!("{} {} (complete)", self.message, format_count(self.count));
        }
    }

    /// Number of records counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    fn on_boundary(&self) -> bool {
        self.count.is_multiple_of(self.interval)
    }
}
