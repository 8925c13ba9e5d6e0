//! Read group rewriting.
//!
//! A rewrite is a single forward pass over a record stream:
//!
//! 1. derive the record's lookup key ([`read_group_key`]: `RG`, else `fb-fc`)
//! 2. replace it with the mapped value, or [`UNRECOGNIZED`] when the key is not mapped
//! 3. write the record, with its `RG` tag set, to the sink
//!
//! Records are never reordered, dropped or duplicated, and nothing is carried from one record
//! to the next except the counters. The mapping table must be fully loaded before the first
//! record is looked up, which [`run`] guarantees by loading it before opening the input.
//!
//! # Example
//!
//! ```
//! use rgremap_lib::mapping::MappingTable;
//! use rgremap_lib::progress::ProgressLogger;
//! use rgremap_lib::rewrite::rewrite_records;
//! use rgremap_lib::sam::RecordBuilder;
//!
//! let table: MappingTable = [("X", "Y")].into_iter().collect();
//! let input = vec![
//!     Ok(RecordBuilder::new().name("r1").read_group("X").build()),
//!     Ok(RecordBuilder::new().name("r2").read_group("Q").build()),
//! ];
//!
//! let mut output = Vec::new();
//! let mut progress = ProgressLogger::new("Rewrote records");
//! let counters = rewrite_records(input, &mut output, &table, &mut progress).unwrap();
//!
//! assert_eq!(counters.records_seen, 2);
//! assert_eq!(counters.unrecognized, 1);
//! assert_eq!(output.len(), 2);
//! ```

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use bstr::BString;
use log::info;
use noodles::sam::alignment::record_buf::RecordBuf;

use crate::bam_io::{BamWriter, STDIO_PATH, create_bam_reader, create_bam_writer};
use crate::errors::{Result, RgRemapError};
use crate::logging::{OperationTimer, log_rewrite_summary};
use crate::mapping::{DEFAULT_MAPPING_FILE, MappingTable};
use crate::metrics::write_read_group_metrics;
use crate::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressLogger};
use crate::sam::{read_group_key, set_read_group};
use crate::validation::validate_compression_level;

/// Read group written when a record's key is not in the mapping table.
pub const UNRECOGNIZED: &str = "Unrecognized";

/// Counts accumulated over a rewrite.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    /// Records read, rewritten and written.
    pub records_seen: u64,
    /// Records whose key was not in the mapping table.
    pub unrecognized: u64,
    /// Records written per output read group. Sums to `records_seen`.
    pub by_read_group: BTreeMap<BString, u64>,
}

impl RunCounters {
    fn count(&mut self, read_group: &[u8], recognized: bool) {
        self.records_seen += 1;
        if !recognized {
            self.unrecognized += 1;
        }
        match self.by_read_group.get_mut(read_group) {
            Some(n) => *n += 1,
            None => {
                self.by_read_group.insert(BString::from(read_group), 1);
            }
        }
    }
}

/// Destination for rewritten records.
pub trait RecordSink {
    /// Writes one record. Records arrive in input order.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written.
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()>;
}

impl RecordSink for BamWriter {
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        BamWriter::write_record(self, record)
    }
}

/// Collects records in memory.
impl RecordSink for Vec<RecordBuf> {
    fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Resolves the read group a record should be written with.
///
/// Returns the mapped value and whether the key was found; unmapped keys resolve to
/// [`UNRECOGNIZED`].
#[must_use]
pub fn resolve_read_group<'a>(record: &RecordBuf, table: &'a MappingTable) -> (&'a [u8], bool) {
    match table.get(&read_group_key(record)) {
        Some(read_group) => (read_group, true),
        None => (UNRECOGNIZED.as_bytes(), false),
    }
}

/// Rewrites the `RG` tag of every record and forwards it to `sink`.
///
/// Stops when `records` is exhausted.
///
/// # Errors
///
/// Returns [`RgRemapError::ReadRecord`] or [`RgRemapError::WriteRecord`] on the first I/O
/// failure. Records already written stay written.
pub fn rewrite_records<I, S>(
    records: I,
    sink: &mut S,
    table: &MappingTable,
    progress: &mut ProgressLogger,
) -> Result<RunCounters>
where
    I: IntoIterator<Item = io::Result<RecordBuf>>,
    S: RecordSink + ?Sized,
{
    let mut counters = RunCounters::default();

    for result in records {
        let ordinal = counters.records_seen + 1;
        let mut record =
            result.map_err(|source| RgRemapError::ReadRecord { record: ordinal, source })?;

        let (read_group, recognized) = resolve_read_group(&record, table);
        set_read_group(&mut record, read_group);

        sink.write_record(&record)
            .map_err(|source| RgRemapError::WriteRecord { record: ordinal, source })?;

        counters.count(read_group, recognized);
        progress.record();
    }

    progress.log_final();
    Ok(counters)
}

/// Settings for a full rewrite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Input BAM, `-` for stdin.
    pub input: PathBuf,
    /// Output BAM, `-` for stdout.
    pub output: PathBuf,
    /// Read group mapping file.
    pub mapping: PathBuf,
    /// Optional per-read-group metrics TSV.
    pub metrics: Option<PathBuf>,
    /// BGZF worker threads for reading and for writing.
    pub threads: usize,
    /// BGZF compression level of the output.
    pub compression_level: u32,
    /// Records between progress messages.
    pub progress_interval: u64,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self::new(STDIO_PATH, STDIO_PATH, DEFAULT_MAPPING_FILE)
    }
}

impl RewriteConfig {
    /// Creates a config with single-threaded I/O, compression level 1 and no metrics.
    pub fn new<I, O, M>(input: I, output: O, mapping: M) -> Self
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
        M: AsRef<Path>,
    {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            mapping: mapping.as_ref().to_path_buf(),
            metrics: None,
            threads: 1,
            compression_level: 1,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Sets the metrics output path.
    #[must_use]
    pub fn with_metrics<P: AsRef<Path>>(mut self, metrics: Option<P>) -> Self {
        self.metrics = metrics.map(|p| p.as_ref().to_path_buf());
        self
    }

    /// Sets the number of BGZF worker threads.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the output compression level (0-12). [`run`] rejects anything higher.
    #[must_use]
    pub fn with_compression_level(mut self, compression_level: u32) -> Self {
        self.compression_level = compression_level;
        self
    }

    /// Sets the number of records between progress messages.
    #[must_use]
    pub fn with_progress_interval(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }
}

/// Loads the mapping table, then rewrites every record of the input into the output.
///
/// The output gets the input's header, reference sequences included, unchanged.
///
/// # Errors
///
/// Fails on the first of: a compression level above 12, unreadable mapping file, unopenable input or output, a record
/// read or write failure, or an unwritable metrics file.
pub fn run(config: &RewriteConfig) -> Result<RunCounters> {
    validate_compression_level(config.compression_level)?;
    let (table, _) = MappingTable::from_path(&config.mapping)?;

    info!("Input: {}", config.input.display());
    info!("Output: {}", config.output.display());

    let (mut reader, header) = create_bam_reader(&config.input, config.threads)?;
    let mut writer =
        create_bam_writer(&config.output, &header, config.threads, config.compression_level)?;

    let timer = OperationTimer::new("Rewriting read groups");
    let mut progress =
        ProgressLogger::new("Rewrote records").with_interval(config.progress_interval);
    let counters = rewrite_records(reader.record_bufs(&header), &mut writer, &table, &mut progress)?;

    writer.finish().map_err(|source| RgRemapError::WriteRecord { record: 0, source })?;
    timer.log_completion(counters.records_seen);
    log_rewrite_summary(&counters);

    if let Some(path) = &config.metrics {
        write_read_group_metrics(path, &counters)?;
        info!("Wrote read group metrics to {}", path.display());
    }

    Ok(counters)
}
