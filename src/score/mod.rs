//! Scoring capabilities
//!
//! Metrics are interchangeable capabilities behind a narrow trait, so an
//! alternate metric can be substituted without touching the corpus,
//! alignment or record layers. Two ship with the crate: corpus BLEU
//! ([`BleuScorer`]) and a COMET-style learned metric behind a process
//! boundary ([`CometScorer`]).

mod bleu;
mod comet;

pub use bleu::{to_rectangular, BleuScorer};
pub use comet::{CometScorer, DEFAULT_COMET_COMMAND, DEFAULT_COMET_MODEL};

use crate::record::SegmentRecord;
use crate::Result;

/// Result of scoring a batch of records.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    system: f64,
    segments: Option<Vec<f64>>,
}

impl ScoreOutcome {
    /// An aggregate-only outcome.
    #[must_use]
    pub const fn aggregate(system: f64) -> Self {
        Self {
            system,
            segments: None,
        }
    }

    /// An outcome carrying per-segment scores aligned 1:1 with the scored
    /// records.
    #[must_use]
    pub fn with_segments(system: f64, segments: Vec<f64>) -> Self {
        Self {
            system,
            segments: Some(segments),
        }
    }

    /// System-level (aggregate) score.
    #[must_use]
    pub const fn system(&self) -> f64 {
        self.system
    }

    /// Per-segment scores, when the metric produces them.
    #[must_use]
    pub fn segments(&self) -> Option<&[f64]> {
        self.segments.as_deref()
    }
}

/// A translation quality metric.
///
/// Implementations score a whole batch in one call and either return a
/// complete outcome or an error; partial results are never surfaced.
pub trait Scorer {
    /// Short metric name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Score a batch of records.
    ///
    /// # Errors
    /// `Error::ScorerFailure` when the metric cannot produce a result for
    /// the batch.
    fn score(&self, records: &[SegmentRecord]) -> Result<ScoreOutcome>;
}
