//! Common CLI options shared across commands.
//!
//! Argument structures composed into command structs with `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use rgremap_lib::bam_io::{STDIO_PATH, is_stdin_path};
use rgremap_lib::validation::{
    validate_compression_level, validate_file_exists, validate_threads,
};

/// Input/output options for commands that read a BAM and write a BAM.
#[derive(Debug, Clone, Args)]
pub struct BamIoOptions {
    /// Input BAM file (`-` for stdin)
    #[arg(short = 'i', long = "input", default_value = STDIO_PATH)]
    pub input: PathBuf,

    /// Output BAM file (`-` for stdout)
    #[arg(short = 'o', long = "output", default_value = STDIO_PATH)]
    pub output: PathBuf,
}

impl Default for BamIoOptions {
    fn default() -> Self {
        Self { input: PathBuf::from(STDIO_PATH), output: PathBuf::from(STDIO_PATH) }
    }
}

impl BamIoOptions {
    /// Validates that the input file exists (skipped for stdin paths).
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_stdin_path(&self.input) {
            validate_file_exists(&self.input, "Input BAM")?;
        }
        Ok(())
    }
}

/// Options for BGZF worker threads.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of BGZF worker threads for reading and for writing.
    ///
    /// Threads only parallelize block compression; records are always
    /// rewritten and written in input order.
    #[arg(long = "threads", default_value_t = 1)]
    pub threads: usize,
}

impl Default for ThreadingOptions {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl ThreadingOptions {
    /// Validates the thread count.
    ///
    /// # Errors
    ///
    /// Returns an error if `threads` is zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_threads(self.threads)?;
        Ok(())
    }
}

/// Options for output compression.
#[derive(Debug, Clone, Args)]
pub struct CompressionOptions {
    /// Compression level for output BAM (0-12).
    ///
    /// Level 1 is fastest with larger files.
    /// Level 12 produces smallest files but is slowest.
    #[arg(long, default_value_t = 1)]
    pub compression_level: u32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self { compression_level: 1 }
    }
}

impl CompressionOptions {
    /// Validates the compression level.
    ///
    /// # Errors
    ///
    /// Returns an error if the level is above 12.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_compression_level(self.compression_level)?;
        Ok(())
    }
}
