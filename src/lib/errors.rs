//! Custom error types for rgremap operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for rgremap operations
pub type Result<T> = std::result::Result<T, RgRemapError>;

/// Error type for rgremap operations.
///
/// Every variant is fatal: a run either completes over the whole input or stops at the
/// first error, leaving any output written so far in place.
#[derive(Error, Debug)]
pub enum RgRemapError {
    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// The read group mapping file could not be opened or read
    #[error("Failed to read mapping file '{}'", path.display())]
    MappingFile {
        /// Path to the mapping file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The input BAM could not be opened or its header could not be read
    #[error("Failed to open input BAM '{}'", path.display())]
    InputOpen {
        /// Path to the input (`-` for stdin)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The output BAM could not be created or its header could not be written
    #[error("Failed to open output BAM '{}'", path.display())]
    OutputOpen {
        /// Path to the output (`-` for stdout)
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A record could not be decoded from the input
    #[error("Failed to read record #{record} from input")]
    ReadRecord {
        /// One-based ordinal of the record that failed
        record: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A record could not be written to the output
    #[error("Failed to write record #{record} to output")]
    WriteRecord {
        /// One-based ordinal of the record that failed (0 when finishing the output)
        record: u64,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The metrics file could not be written
    #[error("Failed to write metrics file '{}': {reason}", path.display())]
    Metrics {
        /// Path to the metrics file
        path: PathBuf,
        /// Explanation of the failure
        reason: String,
    },
}
