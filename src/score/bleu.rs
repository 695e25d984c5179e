//! Corpus BLEU, the lexical n-gram metric
//!
//! Classic 4-gram corpus BLEU over whitespace tokens with multi-reference
//! support: clipped n-gram counts against the best reference, geometric
//! mean of the precisions (zero if any order has no match), and a brevity
//! penalty computed from the closest reference length. Scores are on the
//! conventional 0-100 scale.
//!
//! The metric consumes the rectangular ref-major shape produced by
//! [`to_rectangular`]. An empty string in a reference slot means "no
//! reference available" for that line and contributes neither n-grams nor
//! length statistics.

use std::collections::HashMap;

use super::{ScoreOutcome, Scorer};
use crate::record::SegmentRecord;
use crate::{Error, Result};

/// Highest n-gram order used by the metric.
const MAX_NGRAM: usize = 4;

/// Corpus BLEU scorer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BleuScorer;

impl BleuScorer {
    /// Create the scorer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Scorer for BleuScorer {
    fn name(&self) -> &'static str {
        "BLEU"
    }

    fn score(&self, records: &[SegmentRecord]) -> Result<ScoreOutcome> {
        if records.is_empty() {
            return Err(Error::ScorerFailure(
                "cannot score an empty record batch".to_string(),
            ));
        }

        let hypotheses: Vec<&str> = records.iter().map(SegmentRecord::hyp).collect();
        let reference_sets: Vec<Vec<String>> =
            records.iter().map(|r| r.refs().to_vec()).collect();
        let rectangular = to_rectangular(&reference_sets);

        Ok(ScoreOutcome::aggregate(corpus_bleu(
            &hypotheses,
            &rectangular,
        )))
    }
}

/// Reshape ragged per-line reference sets into the rectangular ref-major
/// matrix the corpus metric consumes.
///
/// Input shape `[num_lines][refs_for_line]`, output shape
/// `[num_ref_slots][num_lines]` where `num_ref_slots` is the largest set
/// size observed. Lines with fewer references are padded with empty
/// strings, meaning "no reference available" in that slot.
#[must_use]
pub fn to_rectangular(reference_sets: &[Vec<String>]) -> Vec<Vec<String>> {
    let num_slots = reference_sets.iter().map(Vec::len).max().unwrap_or(0);

    (0..num_slots)
        .map(|slot| {
            reference_sets
                .iter()
                .map(|set| set.get(slot).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Score a hypothesis stream against rectangular ref-major references.
///
/// Statistics are pooled over the whole corpus before the precisions are
/// formed; this is corpus BLEU, not an average of sentence scores.
#[allow(clippy::cast_precision_loss)]
fn corpus_bleu(hypotheses: &[&str], references: &[Vec<String>]) -> f64 {
    let mut correct = [0usize; MAX_NGRAM];
    let mut total = [0usize; MAX_NGRAM];
    let mut hyp_len = 0usize;
    let mut ref_len = 0usize;

    for (i, hyp) in hypotheses.iter().enumerate() {
        let hyp_tokens: Vec<&str> = hyp.split_whitespace().collect();
        let line_refs: Vec<Vec<&str>> = references
            .iter()
            .filter_map(|slot| {
                let text = slot.get(i).map_or("", String::as_str);
                if text.is_empty() {
                    None
                } else {
                    Some(text.split_whitespace().collect())
                }
            })
            .collect();

        hyp_len += hyp_tokens.len();
        ref_len += closest_reference_length(hyp_tokens.len(), &line_refs);

        for n in 1..=MAX_NGRAM {
            let hyp_counts = ngram_counts(&hyp_tokens, n);
            total[n - 1] += hyp_counts.values().sum::<usize>();
            correct[n - 1] += clipped_matches(&hyp_counts, &line_refs, n);
        }
    }

    if hyp_len == 0 {
        return 0.0;
    }

    let precisions: Vec<f64> = (0..MAX_NGRAM)
        .map(|k| {
            if total[k] == 0 {
                0.0
            } else {
                correct[k] as f64 / total[k] as f64
            }
        })
        .collect();

    brevity_penalty(hyp_len, ref_len) * geometric_mean(&precisions) * 100.0
}

/// Count n-grams of order `n`, keyed by their space-joined form.
fn ngram_counts(tokens: &[&str], n: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    if n == 0 || tokens.len() < n {
        return counts;
    }
    for window in tokens.windows(n) {
        *counts.entry(window.join(" ")).or_insert(0) += 1;
    }
    counts
}

/// Hypothesis n-gram matches, each clipped to the highest count any single
/// reference gives that n-gram.
fn clipped_matches(
    hyp_counts: &HashMap<String, usize>,
    line_refs: &[Vec<&str>],
    n: usize,
) -> usize {
    let mut max_ref_counts: HashMap<String, usize> = HashMap::new();
    for reference in line_refs {
        for (ngram, count) in ngram_counts(reference, n) {
            let entry = max_ref_counts.entry(ngram).or_insert(0);
            *entry = (*entry).max(count);
        }
    }

    hyp_counts
        .iter()
        .map(|(ngram, count)| {
            max_ref_counts
                .get(ngram)
                .map_or(0, |ref_count| (*count).min(*ref_count))
        })
        .sum()
}

/// Length of the reference closest to `hyp_len`; ties go to the shorter
/// reference. No references means no length contribution.
fn closest_reference_length(hyp_len: usize, line_refs: &[Vec<&str>]) -> usize {
    let mut closest = 0usize;
    let mut best_diff = usize::MAX;

    for reference in line_refs {
        let len = reference.len();
        let diff = hyp_len.abs_diff(len);
        if diff < best_diff || (diff == best_diff && len < closest) {
            best_diff = diff;
            closest = len;
        }
    }

    closest
}

/// Geometric mean, zero whenever any value is zero (no smoothing).
#[allow(clippy::cast_precision_loss)]
fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() || values.iter().any(|&v| v <= 0.0) {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}

/// `exp(1 - ref_len / hyp_len)` when the hypothesis is shorter, 1 otherwise.
#[allow(clippy::cast_precision_loss)]
fn brevity_penalty(hyp_len: usize, ref_len: usize) -> f64 {
    if hyp_len >= ref_len {
        1.0
    } else {
        (1.0 - ref_len as f64 / hyp_len as f64).exp()
    }
}
