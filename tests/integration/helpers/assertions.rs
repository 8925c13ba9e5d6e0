//! Custom assertion helpers for integration tests.

#![allow(dead_code)]

use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record_buf::RecordBuf;
use noodles::sam::alignment::record_buf::data::field::Value;

/// Asserts that a record has a specific RG tag value.
///
/// # Panics
///
/// Panics if the RG tag is missing, not a string, or has an unexpected value.
pub fn assert_rg_tag(record: &RecordBuf, expected: &str) {
    let rg_value = record.data().get(&Tag::READ_GROUP).expect("Record should have RG tag");

    match rg_value {
        Value::String(s) => {
            let s_bytes: &[u8] = s.as_ref();
            assert_eq!(
                s_bytes,
                expected.as_bytes(),
                "RG tag mismatch for record {:?}",
                record.name()
            );
        }
        _ => panic!("RG tag should be a string"),
    }
}

/// Asserts that two record lists are identical except for their RG tags.
///
/// # Panics
///
/// Panics if the lists differ in length, order, or any field other than RG.
pub fn assert_same_except_read_group(input: &[RecordBuf], output: &[RecordBuf]) {
    assert_eq!(input.len(), output.len(), "record count changed");
    for (before, after) in input.iter().zip(output) {
        assert_eq!(before.name(), after.name(), "record order changed");
        assert_eq!(before.flags(), after.flags());
        assert_eq!(before.reference_sequence_id(), after.reference_sequence_id());
        assert_eq!(before.alignment_start(), after.alignment_start());
        assert_eq!(before.mapping_quality(), after.mapping_quality());
        assert_eq!(before.cigar(), after.cigar());
        assert_eq!(before.sequence(), after.sequence());
        assert_eq!(before.quality_scores(), after.quality_scores());

        for (tag, value) in before.data().iter() {
            if tag != Tag::READ_GROUP {
                assert_eq!(after.data().get(&tag), Some(value), "tag {tag:?} changed");
            }
        }
    }
}
