//! Input validation utilities
//!
//! Validation of command-line parameters and file paths, run before any file is opened.
//! All functions return [`RgRemapError::InvalidParameter`] on failure.

use std::fmt::Display;
use std::path::Path;

use crate::errors::{Result, RgRemapError};

/// Highest BGZF compression level accepted for output.
pub const MAX_COMPRESSION_LEVEL: u32 = 12;

/// Validate that a file exists
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use rgremap_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "Input BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(RgRemapError::InvalidParameter {
            parameter: description.to_string(),
            reason: format!("File does not exist: {}", path_ref.display()),
        });
    }
    Ok(())
}

/// Validate that a value is positive (> 0)
///
/// # Errors
/// Returns an error if the value is not positive
///
/// # Example
/// ```
/// use rgremap_lib::validation::validate_positive;
///
/// validate_positive(10, "progress-interval").unwrap();
/// assert!(validate_positive(0, "progress-interval").is_err());
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn validate_positive<T: Ord + Display + Default>(value: T, name: &str) -> Result<()> {
    if value <= T::default() {
        return Err(RgRemapError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("Must be positive (> 0), got: {value}"),
        });
    }
    Ok(())
}

/// Validate a worker thread count
///
/// # Errors
/// Returns an error if `threads` is zero
pub fn validate_threads(threads: usize) -> Result<()> {
    validate_positive(threads, "threads")
}

/// Validate a BGZF compression level (0-12)
///
/// # Errors
/// Returns an error if the level is above [`MAX_COMPRESSION_LEVEL`]
pub fn validate_compression_level(level: u32) -> Result<()> {
    if level > MAX_COMPRESSION_LEVEL {
        return Err(RgRemapError::InvalidParameter {
            parameter: "compression-level".to_string(),
            reason: format!("Must be between 0 and {MAX_COMPRESSION_LEVEL}, got: {level}"),
        });
    }
    Ok(())
}
