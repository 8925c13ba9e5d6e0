//! Read group mapping tables.
//!
//! A mapping file is plain text with one `original,replacement` pair per line. The line is
//! split on the first comma only, so replacements may themselves contain commas. There is no
//! header row, no quoting, and no trimming: every byte other than the line terminator (`\n`)
//! is part of a key or value.
//!
//! ```
//! use rgremap_lib::mapping::MappingTable;
//!
//! let (table, summary) = MappingTable::from_reader(&b"A,1\nB,2,3\n"[..]).unwrap();
//! assert_eq!(summary.lines_read, 2);
//! assert_eq!(table.get(b"A"), Some(&b"1"[..]));
//! assert_eq!(table.get(b"B"), Some(&b"2,3"[..]));
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use bstr::{BString, ByteSlice};
use log::{info, warn};

use crate::errors::{Result, RgRemapError};
use crate::logging::format_count;

/// Default mapping file name, resolved against the working directory.
pub const DEFAULT_MAPPING_FILE: &str = "mapping.csv";

/// Separator between the original and replacement read group.
const DELIMITER: u8 = b',';

/// Counts gathered while loading a mapping file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Number of lines read, including blank and malformed ones.
    pub lines_read: u64,
    /// Lines with no comma; each maps the whole line to an empty replacement.
    pub lines_without_delimiter: u64,
}

/// Lookup from original read group to replacement read group.
///
/// Built once before any record is rewritten and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: HashMap<BString, BString>,
}

impl MappingTable {
    /// Creates an empty table. Every lookup against it misses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a table from the mapping file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RgRemapError::MappingFile`] if the file cannot be opened or read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<(Self, LoadSummary)> {
        let path = path.as_ref();
        let to_error =
            |source| RgRemapError::MappingFile { path: path.to_path_buf(), source };

        let file = File::open(path).map_err(to_error)?;
        let (table, summary) = Self::parse(BufReader::new(file)).map_err(to_error)?;

        info!(
            "Read {} lines from the mapping file {}",
            format_count(summary.lines_read),
            path.display()
        );
        if summary.lines_without_delimiter > 0 {
            warn!(
                "{} line(s) in {} had no comma; each maps the whole line to an empty read group",
                format_count(summary.lines_without_delimiter),
                path.display()
            );
        }

        Ok((table, summary))
    }

    /// Loads a table from any buffered line source.
    ///
    /// # Errors
    ///
    /// Returns [`RgRemapError::MappingFile`] (with an empty path) if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<(Self, LoadSummary)> {
        Self::parse(reader)
            .map_err(|source| RgRemapError::MappingFile { path: PathBuf::new(), source })
    }

    fn parse<R: BufRead>(mut reader: R) -> std::io::Result<(Self, LoadSummary)> {
        let mut table = Self::new();
        let mut summary = LoadSummary::default();
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if line.last() == Some(&b'\n') {
                line.pop();
            }

            let (original, replacement) = split_line(&line);
            if replacement.is_none() {
                summary.lines_without_delimiter += 1;
            }
            // Later lines win for duplicate keys.
            table.insert(original, replacement.unwrap_or_default());
            summary.lines_read += 1;
        }

        Ok((table, summary))
    }

    /// Inserts or replaces a mapping, returning the previous replacement if any.
    pub fn insert<K, V>(&mut self, original: K, replacement: V) -> Option<BString>
    where
        K: Into<BString>,
        V: Into<BString>,
    {
        self.entries.insert(original.into(), replacement.into())
    }

    /// Returns the replacement for `original`, if mapped.
    #[must_use]
    pub fn get(&self, original: &[u8]) -> Option<&[u8]> {
        self.entries.get(original.as_bstr()).map(|v| v.as_slice())
    }

    /// Number of distinct original read groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table has no mappings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MappingTable
where
    K: Into<BString>,
    V: Into<BString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (original, replacement) in iter {
            table.insert(original, replacement);
        }
        table
    }
}

/// Splits a line on its first comma. `None` for the replacement means no comma was found.
fn split_line(line: &[u8]) -> (&[u8], Option<&[u8]>) {
    match line.find_byte(DELIMITER) {
        Some(idx) => (&line[..idx], Some(&line[idx + 1..])),
        None => (line, None),
    }
}
