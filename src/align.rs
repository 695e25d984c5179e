//! Reference alignment
//!
//! Combines N parallel reference corpora into one reference set per source
//! line. Structurally the reshape is a transpose: reference corpora arrive
//! as `[num_ref_files][num_lines]` and scoring consumes
//! `[num_lines][num_ref_files]`.
//!
//! Line counts are validated across every input before anything else
//! happens. Alignment is all-or-nothing: on mismatch the caller gets an
//! error and no partial output exists anywhere.

use crate::corpus::Corpus;
use crate::record::SegmentRecord;
use crate::{Error, Result};

/// Pick the i-th line from each reference corpus, in argument order.
///
/// Input shape `[num_ref_files][num_lines]`, output shape
/// `[num_lines][num_ref_files]`. The number of lines is taken from the
/// first corpus; `AlignedCorpus::align` rejects ragged inputs before this
/// runs.
#[must_use]
pub fn transpose_references(references: &[Corpus]) -> Vec<Vec<String>> {
    let num_lines = references.first().map_or(0, Corpus::len);
    let mut sets = vec![Vec::with_capacity(references.len()); num_lines];

    for corpus in references {
        for (i, line) in corpus.lines().enumerate().take(num_lines) {
            sets[i].push(line.to_string());
        }
    }

    sets
}

/// Source/hypothesis/reference-set triples validated to agree on line
/// counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedCorpus {
    sources: Vec<String>,
    hypotheses: Vec<String>,
    reference_sets: Vec<Vec<String>>,
}

impl AlignedCorpus {
    /// Validate line counts and transpose references into per-line sets.
    ///
    /// The count check runs before any side effect in the pipeline, so a
    /// mismatch leaves nothing behind and conversion can simply be re-run.
    ///
    /// # Errors
    /// `Error::AlignmentMismatch` naming the first corpus whose line count
    /// disagrees with the source corpus, with expected vs. actual counts.
    pub fn align(sources: Corpus, hypotheses: Corpus, references: &[Corpus]) -> Result<Self> {
        let expected = sources.len();

        if hypotheses.len() != expected {
            return Err(Error::AlignmentMismatch {
                corpus: label("hypothesis", &hypotheses),
                expected,
                actual: hypotheses.len(),
            });
        }
        for (i, reference) in references.iter().enumerate() {
            if reference.len() != expected {
                return Err(Error::AlignmentMismatch {
                    corpus: label(&format!("reference #{}", i + 1), reference),
                    expected,
                    actual: reference.len(),
                });
            }
        }

        // Transpose of zero corpora has no length to infer; every line
        // simply gets an empty reference set.
        let reference_sets = if references.is_empty() {
            vec![Vec::new(); expected]
        } else {
            transpose_references(references)
        };

        Ok(Self {
            sources: sources.into_lines(),
            hypotheses: hypotheses.into_lines(),
            reference_sets,
        })
    }

    /// Number of aligned lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// True when no lines are aligned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source sentences in line order.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Hypothesis sentences in line order.
    #[must_use]
    pub fn hypotheses(&self) -> &[String] {
        &self.hypotheses
    }

    /// Per-line reference sets, each in reference-file order.
    #[must_use]
    pub fn reference_sets(&self) -> &[Vec<String>] {
        &self.reference_sets
    }

    /// Consume the alignment into per-position records with generated
    /// `segment_NNN` labels.
    #[must_use]
    pub fn into_records(self) -> Vec<SegmentRecord> {
        self.sources
            .into_iter()
            .zip(self.hypotheses)
            .zip(self.reference_sets)
            .enumerate()
            .map(|(i, ((src, hyp), refs))| SegmentRecord::at_position(i, src, hyp, refs))
            .collect()
    }
}

fn label(role: &str, corpus: &Corpus) -> String {
    corpus.path().map_or_else(
        || role.to_string(),
        |path| format!("{role} ({})", path.display()),
    )
}
