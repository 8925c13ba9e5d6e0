//! Rewrite the read group of every record in a BAM using a CSV mapping file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rgremap_lib::mapping::DEFAULT_MAPPING_FILE;
use rgremap_lib::progress::DEFAULT_PROGRESS_INTERVAL;
use rgremap_lib::rewrite::{RewriteConfig, run};
use rgremap_lib::validation::{validate_file_exists, validate_positive};

use crate::commands::command::Command;
use crate::commands::common::{BamIoOptions, CompressionOptions, ThreadingOptions};

/// Rewrites read group tags from a mapping file.
#[derive(Debug, Parser)]
#[command(
    name = "rewrite",
    about = "\x1b[38;5;166m[READ GROUPS]\x1b[0m    \x1b[36mRewrite RG tags using a CSV mapping file\x1b[0m",
    long_about = r#"
Rewrite the read group (RG) tag of every record in a BAM file.

The mapping file has one `original,replacement` pair per line, split at the first
comma. Each record's lookup key is its RG tag; records without RG use the value of
the fb tag, a hyphen, and the value of the fc tag. Records whose key is not in the
mapping file get RG:Z:Unrecognized.

Records are written in input order with every other field unchanged. The output
header is the input header, unmodified.

Example usage:
  rgremap rewrite -i in.bam -o out.bam -c mapping.csv
  samtools view -b in.sam | rgremap rewrite -c mapping.csv > out.bam
  rgremap rewrite -i in.bam -o out.bam -c mapping.csv -m read_groups.tsv --threads 4
"#
)]
pub struct RewriteReadGroups {
    /// Input/output BAM options
    #[command(flatten)]
    pub io: BamIoOptions,

    /// CSV mapping original read groups to replacements
    #[arg(short = 'c', long = "csv", default_value = DEFAULT_MAPPING_FILE)]
    pub csv: PathBuf,

    /// Optional output TSV of record counts per output read group
    #[arg(short = 'm', long = "metrics")]
    pub metrics: Option<PathBuf>,

    /// Number of records between progress messages
    #[arg(long = "progress-interval", default_value_t = DEFAULT_PROGRESS_INTERVAL)]
    pub progress_interval: u64,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,

    /// Compression options for output BAM.
    #[command(flatten)]
    pub compression: CompressionOptions,
}

impl RewriteReadGroups {
    fn validate(&self) -> Result<()> {
        validate_file_exists(&self.csv, "Mapping file")?;
        self.io.validate()?;
        self.threading.validate()?;
        self.compression.validate()?;
        validate_positive(self.progress_interval, "progress-interval")?;
        Ok(())
    }

    fn config(&self) -> RewriteConfig {
        RewriteConfig::new(&self.io.input, &self.io.output, &self.csv)
            .with_metrics(self.metrics.as_ref())
            .with_threads(self.threading.threads)
            .with_compression_level(self.compression.compression_level)
            .with_progress_interval(self.progress_interval)
    }
}

impl Command for RewriteReadGroups {
    fn execute(&self, command_line: &str) -> Result<()> {
        info!("{command_line}");
        self.validate()?;

        let config = self.config();
        run(&config).with_context(|| {
            format!(
                "Failed to rewrite read groups of {} using {}",
                config.input.display(),
                config.mapping.display()
            )
        })?;
        Ok(())
    }
}
