//! Utilities for generating test BAM data programmatically.

use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::Path;

use bstr::BString;
use noodles::bam;
use noodles::sam::Header;
use noodles::sam::alignment::io::Write as AlignmentWrite;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::header::record::value::Map;
use noodles::sam::header::record::value::map::{
    Header as HeaderRecord, ReadGroup, ReferenceSequence,
};
use rgremap_lib::sam::RecordBuilder;

/// Creates a header with one reference sequence and the given `@RG` lines.
pub fn create_minimal_header(ref_name: &str, ref_len: usize, read_groups: &[&str]) -> Header {
    let reference_sequence = Map::<ReferenceSequence>::new(
        NonZeroUsize::new(ref_len).expect("reference length must be non-zero"),
    );

    let mut builder = Header::builder()
        .set_header(Map::<HeaderRecord>::default())
        .add_reference_sequence(BString::from(ref_name), reference_sequence);
    for id in read_groups {
        builder = builder.add_read_group(BString::from(*id), Map::<ReadGroup>::default());
    }
    builder.build()
}

/// Creates `count` mapped records named `{base_name}_{i}`, all with read group `read_group`.
pub fn create_read_group_records(base_name: &str, read_group: &str, count: usize) -> Vec<RecordBuf> {
    (0..count)
        .map(|i| {
            RecordBuilder::new()
                .name(&format!("{base_name}_{i}"))
                .sequence("ACGTACGT")
                .reference_sequence_id(0)
                .alignment_start(100 + i)
                .mapping_quality(60)
                .read_group(read_group)
                .build()
        })
        .collect()
}

/// Creates an unmapped record with no `RG` tag, keyed by its `fb` and `fc` tags.
pub fn create_flow_barcode_record(name: &str, fb: &str, fc: &str) -> RecordBuf {
    RecordBuilder::new().name(name).sequence("TTTTGGGG").flow_barcodes(fb, fc).build()
}

/// Writes `records` to a BAM at `path`.
pub fn write_bam(path: &Path, header: &Header, records: &[RecordBuf]) {
    let mut writer = bam::io::Writer::new(File::create(path).expect("Failed to create BAM file"));
    writer.write_header(header).expect("Failed to write header");
    for record in records {
        writer.write_alignment_record(header, record).expect("Failed to write record");
    }
    writer.finish(header).expect("Failed to finish BAM");
}

/// Reads the header and all records of the BAM at `path`.
pub fn read_bam(path: &Path) -> (Header, Vec<RecordBuf>) {
    let mut reader = bam::io::reader::Builder.build_from_path(path).expect("Failed to open BAM");
    let header = reader.read_header().expect("Failed to read header");
    let records = reader
        .record_bufs(&header)
        .collect::<std::io::Result<Vec<_>>>()
        .expect("Failed to read records");
    (header, records)
}

/// Writes a mapping file with one `original,replacement` line per pair.
pub fn write_mapping(path: &Path, pairs: &[(&str, &str)]) {
    let mut file = File::create(path).expect("Failed to create mapping file");
    for (original, replacement) in pairs {
        writeln!(file, "{original},{replacement}").expect("Failed to write mapping line");
    }
}
