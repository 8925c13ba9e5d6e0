//! Builder for creating test SAM/BAM records.
//!
//! [`RecordBuilder`] creates individual `RecordBuf`s through a chainable interface. Records
//! are unmapped unless a reference sequence is set, in which case an all-match CIGAR is
//! generated from the sequence length.
//!
//! ```rust
//! use rgremap_lib::sam::builder::RecordBuilder;
//!
//! let record = RecordBuilder::new()
//!     .name("read1")
//!     .sequence("ACGT")
//!     .read_group("lane1")
//!     .build();
//!
//! let fallback = RecordBuilder::new()
//!     .name("read2")
//!     .flow_barcodes("ACGTACGT", "7")
//!     .build();
//! ```

use noodles::core::Position;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::alignment::record_buf::data::field::Value as BufValue;
use noodles::sam::alignment::record_buf::{QualityScores, RecordBuf, Sequence};

/// Base quality used when a sequence is set without explicit qualities.
pub const DEFAULT_BASE_QUALITY: u8 = 30;

/// Builder for individual BAM/SAM records.
///
/// All fields have defaults; only what a test cares about needs to be set.
#[derive(Debug, Default)]
pub struct RecordBuilder {
    name: Option<Vec<u8>>,
    flags: Option<Flags>,
    reference_sequence_id: Option<usize>,
    alignment_start: Option<usize>,
    mapping_quality: Option<u8>,
    sequence: Vec<u8>,
    qualities: Vec<u8>,
    tags: Vec<(Tag, BufValue)>,
}

impl RecordBuilder {
    /// Creates a new builder for an unmapped record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read name.
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.as_bytes().to_vec());
        self
    }

    /// Sets the sequence, generating qualities if none were given.
    #[must_use]
    pub fn sequence(mut self, seq: &str) -> Self {
        self.sequence = seq.as_bytes().to_vec();
        if self.qualities.is_empty() {
            self.qualities = vec![DEFAULT_BASE_QUALITY; seq.len()];
        }
        self
    }

    /// Sets the quality scores (raw Phred values, not ASCII).
    #[must_use]
    pub fn qualities(mut self, quals: &[u8]) -> Self {
        self.qualities = quals.to_vec();
        self
    }

    /// Sets all flags at once.
    #[must_use]
    pub fn flags(mut self, flags: Flags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Sets the reference sequence ID (0-based). Makes the record mapped.
    #[must_use]
    pub fn reference_sequence_id(mut self, id: usize) -> Self {
        self.reference_sequence_id = Some(id);
        self
    }

    /// Sets the alignment start position (1-based).
    #[must_use]
    pub fn alignment_start(mut self, pos: usize) -> Self {
        self.alignment_start = Some(pos);
        self
    }

    /// Sets the mapping quality.
    #[must_use]
    pub fn mapping_quality(mut self, mapq: u8) -> Self {
        self.mapping_quality = Some(mapq);
        self
    }

    /// Adds a SAM tag. Tags that are not exactly two characters are ignored.
    #[must_use]
    pub fn tag<V: Into<BufValue>>(mut self, tag: &str, value: V) -> Self {
        if let [a, b] = tag.as_bytes() {
            self.tags.push((Tag::new(*a, *b), value.into()));
        }
        self
    }

    /// Adds an `RG` tag.
    #[must_use]
    pub fn read_group(self, read_group: &str) -> Self {
        self.tag("RG", read_group)
    }

    /// Adds the `fb` and `fc` tags used to derive a key for records without `RG`.
    #[must_use]
    pub fn flow_barcodes(self, fb: &str, fc: &str) -> Self {
        self.tag("fb", fb).tag("fc", fc)
    }

    /// Builds the `RecordBuf`.
    ///
    /// # Panics
    ///
    /// Panics if the alignment start is zero or the mapping quality is 255 (both invalid).
    #[must_use]
    pub fn build(self) -> RecordBuf {
        let mut record = RecordBuf::default();

        if let Some(name) = self.name {
            *record.name_mut() = Some(name.into());
        }

        let mapped = self.reference_sequence_id.is_some();
        *record.flags_mut() =
            self.flags.unwrap_or(if mapped { Flags::empty() } else { Flags::UNMAPPED });

        if let Some(ref_id) = self.reference_sequence_id {
            *record.reference_sequence_id_mut() = Some(ref_id);
            if !self.sequence.is_empty() {
                *record.cigar_mut() =
                    [Op::new(Kind::Match, self.sequence.len())].into_iter().collect();
            }
        }
        if let Some(pos) = self.alignment_start {
            *record.alignment_start_mut() =
                Some(Position::try_from(pos).expect("alignment_start must be >= 1"));
        }
        if let Some(mapq) = self.mapping_quality {
            *record.mapping_quality_mut() =
                Some(MappingQuality::new(mapq).expect("mapping_quality must not be 255"));
        }

        *record.sequence_mut() = Sequence::from(self.sequence);
        *record.quality_scores_mut() = QualityScores::from(self.qualities);

        for (tag, value) in self.tags {
            record.data_mut().insert(tag, value);
        }

        record
    }
}
