//! BAM file I/O utilities.
//!
//! Readers and writers are opened on a path or, for `-`, on stdin/stdout. The header read
//! from the input is handed back to the caller so it can be written to the output unchanged.
//!
//! # Threading Model
//!
//! BGZF (de)compression can use worker threads:
//!
//! - **Single-threaded**: `threads=1` (lower overhead, good for small files)
//! - **Multi-threaded**: `threads>1` (higher throughput for large files)
//!
//! Records are still decoded, rewritten and encoded in order on the calling thread; only
//! block (de)compression is spread across workers.

use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::num::NonZero;
use std::path::Path;

use noodles::bgzf::io::{
    MultithreadedReader, MultithreadedWriter, Reader as BgzfReader, Writer as BgzfWriter,
    multithreaded_writer, writer,
};
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record_buf::RecordBuf;

use crate::errors::{Result, RgRemapError};

/// Path that selects stdin or stdout.
pub const STDIO_PATH: &str = "-";

/// Byte source behind a BAM reader: a file or stdin.
pub type InputStream = Box<dyn Read + Send>;

/// Byte sink behind a BAM writer: a file or stdout.
pub type OutputStream = Box<dyn Write + Send>;

/// Enum wrapping single-threaded and multi-threaded BGZF readers.
pub enum BgzfReaderEnum {
    /// Single-threaded BGZF reader (lower overhead for small files)
    SingleThreaded(BgzfReader<InputStream>),
    /// Multi-threaded BGZF reader
    MultiThreaded(MultithreadedReader<InputStream>),
}

impl Read for BgzfReaderEnum {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.read(buf),
            BgzfReaderEnum::MultiThreaded(r) => r.read(buf),
        }
    }
}

impl BufRead for BgzfReaderEnum {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.fill_buf(),
            BgzfReaderEnum::MultiThreaded(r) => r.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            BgzfReaderEnum::SingleThreaded(r) => r.consume(amt),
            BgzfReaderEnum::MultiThreaded(r) => r.consume(amt),
        }
    }
}

/// BAM reader over either BGZF reader flavor.
pub type BamReader = noodles::bam::io::Reader<BgzfReaderEnum>;

/// Enum wrapping single-threaded and multi-threaded BGZF writers.
pub enum BgzfWriterEnum {
    /// Single-threaded BGZF writer
    SingleThreaded(BgzfWriter<OutputStream>),
    /// Multi-threaded BGZF writer
    MultiThreaded(MultithreadedWriter<OutputStream>),
}

impl Write for BgzfWriterEnum {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            BgzfWriterEnum::SingleThreaded(w) => w.write(buf),
            BgzfWriterEnum::MultiThreaded(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            BgzfWriterEnum::SingleThreaded(w) => w.flush(),
            BgzfWriterEnum::MultiThreaded(w) => w.flush(),
        }
    }
}

impl BgzfWriterEnum {
    /// Flushes remaining blocks, writes the BGZF EOF marker and flushes the sink.
    ///
    /// # Errors
    /// Returns an error if flushing or finalizing the writer fails.
    pub fn finish(self) -> io::Result<()> {
        let mut inner = match self {
            BgzfWriterEnum::SingleThreaded(w) => w.finish()?,
            BgzfWriterEnum::MultiThreaded(mut w) => w.finish()?,
        };
        inner.flush()
    }
}

/// BAM writer bound to the header it was opened with.
///
/// Keeping the header next to the writer means records are always encoded against the same
/// reference dictionary that was written to the output.
pub struct BamWriter {
    inner: noodles::bam::io::Writer<BgzfWriterEnum>,
    header: Header,
}

impl BamWriter {
    /// The header written to the output.
    #[must_use]
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Encodes and writes one record.
    ///
    /// # Errors
    /// Returns an error if the record cannot be encoded or written.
    pub fn write_record(&mut self, record: &RecordBuf) -> io::Result<()> {
        self.inner.write_alignment_record(&self.header, record)
    }

    /// Finishes the BGZF stream, writing the EOF marker.
    ///
    /// # Errors
    /// Returns an error if the final blocks cannot be written.
    pub fn finish(self) -> io::Result<()> {
        self.inner.into_inner().finish()
    }
}

/// Check if a path refers to stdin.
///
/// Returns true if the path is "-" or "/dev/stdin".
///
/// # Example
/// ```
/// use rgremap_lib::bam_io::is_stdin_path;
/// use std::path::Path;
///
/// assert!(is_stdin_path(Path::new("-")));
/// assert!(is_stdin_path(Path::new("/dev/stdin")));
/// assert!(!is_stdin_path(Path::new("input.bam")));
/// ```
pub fn is_stdin_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == STDIO_PATH || path_str == "/dev/stdin"
}

/// Check if a path refers to stdout.
///
/// Returns true if the path is "-" or "/dev/stdout".
///
/// # Example
/// ```
/// use rgremap_lib::bam_io::is_stdout_path;
///
/// assert!(is_stdout_path("-"));
/// assert!(!is_stdout_path("output.bam"));
/// ```
pub fn is_stdout_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == STDIO_PATH || path_str == "/dev/stdout"
}

/// Open a BAM reader and read its header.
///
/// # Arguments
/// * `path` - Path to the input BAM file, or `-` for stdin
/// * `threads` - Number of threads for BGZF decompression (1 = single-threaded)
///
/// # Returns
/// A tuple of (reader, header)
///
/// # Errors
/// Returns [`RgRemapError::InputOpen`] if the file cannot be opened or the header cannot be
/// read.
///
/// # Example
/// ```no_run
/// use rgremap_lib::bam_io::create_bam_reader;
///
/// let (mut reader, header) = create_bam_reader("input.bam", 1).unwrap();
/// ```
pub fn create_bam_reader<P: AsRef<Path>>(path: P, threads: usize) -> Result<(BamReader, Header)> {
    let path_ref = path.as_ref();
    let to_error = |source| RgRemapError::InputOpen { path: path_ref.to_path_buf(), source };

    let stream: InputStream = if is_stdin_path(path_ref) {
        Box::new(io::stdin())
    } else {
        Box::new(File::open(path_ref).map_err(to_error)?)
    };

    let bgzf_reader = match NonZero::new(threads).filter(|n| n.get() > 1) {
        Some(worker_count) => BgzfReaderEnum::MultiThreaded(
            MultithreadedReader::with_worker_count(worker_count, stream),
        ),
        None => BgzfReaderEnum::SingleThreaded(BgzfReader::new(stream)),
    };

    let mut reader = noodles::bam::io::Reader::from(bgzf_reader);
    let header = reader.read_header().map_err(to_error)?;

    Ok((reader, header))
}

/// Create a BAM writer and write the header in one operation.
///
/// # Arguments
/// * `path` - Path for the output BAM file, or `-` for stdout
/// * `header` - SAM header to write (copied into the writer)
/// * `threads` - Number of threads for BGZF compression (1 = single-threaded)
/// * `compression_level` - BGZF compression level (0-12)
///
/// # Errors
/// Returns [`RgRemapError::OutputOpen`] if the file cannot be created or the header cannot
/// be written.
///
/// # Example
/// ```no_run
/// use rgremap_lib::bam_io::create_bam_writer;
/// use noodles::sam::Header;
///
/// let header = Header::default();
/// let mut writer = create_bam_writer("output.bam", &header, 1, 6).unwrap();
/// ```
pub fn create_bam_writer<P: AsRef<Path>>(
    path: P,
    header: &Header,
    threads: usize,
    compression_level: u32,
) -> Result<BamWriter> {
    let path_ref = path.as_ref();
    let to_error = |source| RgRemapError::OutputOpen { path: path_ref.to_path_buf(), source };

    let stream: OutputStream = if is_stdout_path(path_ref) {
        Box::new(io::stdout())
    } else {
        Box::new(File::create(path_ref).map_err(to_error)?)
    };

    let level = u8::try_from(compression_level).ok().and_then(writer::CompressionLevel::new);

    let bgzf_writer = match NonZero::new(threads).filter(|n| n.get() > 1) {
        Some(worker_count) => {
            let mut builder =
                multithreaded_writer::Builder::default().set_worker_count(worker_count);
            if let Some(level) = level {
                builder = builder.set_compression_level(level);
            }
            BgzfWriterEnum::MultiThreaded(builder.build_from_writer(stream))
        }
        None => {
            let mut builder = writer::Builder::default();
            if let Some(level) = level {
                builder = builder.set_compression_level(level);
            }
            BgzfWriterEnum::SingleThreaded(builder.build_from_writer(stream))
        }
    };

    let mut inner = noodles::bam::io::Writer::from(bgzf_writer);
    inner.write_header(header).map_err(to_error)?;

    Ok(BamWriter { inner, header: header.clone() })
}
