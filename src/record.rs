//! Segment records, the durable unit of the pipeline
//!
//! A record carries one aligned source/hypothesis/references unit. Identity
//! is assigned positionally at creation time (`segment_NNN`) and records are
//! never reordered afterwards, so downstream consumers can rely on both the
//! label and the order.

use serde::{Deserialize, Serialize};

/// Zero-padding width for segment numbers (`segment_001`).
const SEGMENT_ID_WIDTH: usize = 3;

/// Build the label for the segment at `position` (0-based).
///
/// Labels are 1-based and zero-padded to three digits: `segment_001`,
/// `segment_042`, `segment_100`. Beyond 999 the number simply grows
/// (`segment_1000`).
#[must_use]
pub fn segment_id(position: usize) -> String {
    format!("segment_{:0width$}", position + 1, width = SEGMENT_ID_WIDTH)
}

/// One aligned source/hypothesis/references unit.
///
/// Serializes to a single JSON object per store line:
/// `{"id": ..., "src": ..., "hyp": ..., "ref": [...]}`. The reference list
/// preserves reference-file order and may be empty for a given segment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SegmentRecord {
    id: String,
    src: String,
    hyp: String,
    #[serde(rename = "ref")]
    refs: Vec<String>,
}

impl SegmentRecord {
    /// Create a record with an explicit id.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        src: impl Into<String>,
        hyp: impl Into<String>,
        refs: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            src: src.into(),
            hyp: hyp.into(),
            refs,
        }
    }

    /// Create the record for `position` (0-based), generating its
    /// `segment_NNN` label.
    #[must_use]
    pub fn at_position(
        position: usize,
        src: impl Into<String>,
        hyp: impl Into<String>,
        refs: Vec<String>,
    ) -> Self {
        Self::new(segment_id(position), src, hyp, refs)
    }

    /// Get the segment id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the source sentence.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Get the hypothesis (machine translation) sentence.
    #[must_use]
    pub fn hyp(&self) -> &str {
        &self.hyp
    }

    /// Get the reference translations, in reference-file order.
    #[must_use]
    pub fn refs(&self) -> &[String] {
        &self.refs
    }
}
