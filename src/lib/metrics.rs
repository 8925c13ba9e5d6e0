//! Read group rewrite metrics.
//!
//! One row per read group written to the output, including the `Unrecognized` sentinel,
//! sorted by read group. Written as TSV with `fgoxide`.

use std::path::Path;

use bstr::ByteSlice;
use fgoxide::io::DelimFile;
use serde::Serialize;

use crate::errors::{Result, RgRemapError};
use crate::logging::fraction;
use crate::rewrite::RunCounters;

/// Records written with one read group value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadGroupMetric {
    /// The `RG` value written to the output.
    pub read_group: String,
    /// Number of records written with this read group.
    pub records: u64,
    /// Fraction of all output records with this read group.
    pub fraction: f64,
}

impl ReadGroupMetric {
    /// Builds one metric row per output read group.
    #[must_use]
    pub fn from_counters(counters: &RunCounters) -> Vec<Self> {
        counters
            .by_read_group
            .iter()
            .map(|(read_group, &records)| Self {
                read_group: read_group.to_str_lossy().into_owned(),
                records,
                fraction: fraction(records, counters.records_seen),
            })
            .collect()
    }
}

/// Writes per-read-group metrics to `path` as TSV.
///
/// # Errors
///
/// Returns [`RgRemapError::Metrics`] if the file cannot be created or written.
pub fn write_read_group_metrics<P: AsRef<Path>>(path: P, counters: &RunCounters) -> Result<()> {
    let path_ref = path.as_ref();
    let metrics = ReadGroupMetric::from_counters(counters);
    DelimFile::default().write_tsv(&path_ref, &metrics).map_err(|e| RgRemapError::Metrics {
        path: path_ref.to_path_buf(),
        reason: e.to_string(),
    })
}
