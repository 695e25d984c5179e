//! Pipeline orchestration
//!
//! Two entry points mirror the tool's two stages: `run_convert` turns
//! parallel text files into the record store, `run_evaluate` scores a store
//! and writes reports. Everything is synchronous and single-threaded; the
//! learned-metric call is one blocking invocation and nothing is retried.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::align::AlignedCorpus;
use crate::corpus::Corpus;
use crate::record::SegmentRecord;
use crate::report::ReportWriter;
use crate::score::{BleuScorer, CometScorer, ScoreOutcome, Scorer};
use crate::store::RecordStore;
use crate::Result;

/// Convert parallel text files into a record store.
///
/// Reads the source, hypothesis and reference corpora, validates that all
/// of them agree on line counts, zips them into `segment_NNN` records and
/// writes the line-delimited store. Validation happens before any output
/// exists, so a mismatch leaves nothing behind.
///
/// # Errors
/// `FileNotFound` for any missing input, `AlignmentMismatch` on count
/// disagreement, and IO/serialization failures while writing.
pub fn run_convert(src: &Path, hyp: &Path, refs: &[PathBuf], output: &Path) -> Result<()> {
    let sources = Corpus::from_path(src)?;
    let hypotheses = Corpus::from_path(hyp)?;
    let references = refs
        .iter()
        .map(Corpus::from_path)
        .collect::<Result<Vec<_>>>()?;

    let aligned = AlignedCorpus::align(sources, hypotheses, &references)?;
    info!(
        lines = aligned.len(),
        reference_files = references.len(),
        "aligned parallel corpora"
    );

    let records = aligned.into_records();
    RecordStore::new(output).write(&records)?;

    println!(
        "Converted {} segments to: {}",
        records.len(),
        output.display()
    );
    Ok(())
}

/// Evaluation configuration.
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    /// Record store to score.
    pub input: PathBuf,
    /// Directory receiving the report files.
    pub out_dir: PathBuf,
    /// Quality-estimation model identifier.
    pub comet_model: String,
    /// Scoring backend command.
    pub comet_command: String,
    /// Abort on the first malformed store line instead of skipping it.
    pub strict: bool,
}

/// Score a record store and write reports.
///
/// Loads the store (leniently by default, fail-closed with `strict`), runs
/// the lexical and learned metrics, prints the aggregate scores and writes
/// the summary reports plus the per-segment detail table when segment
/// scores are available. An empty store is a warning, not an error, and
/// produces no reports.
///
/// # Errors
/// `FileNotFound` if the store is missing, `MalformedRecord` in strict
/// mode, `ScorerFailure` from either metric, and IO/CSV failures while
/// reporting.
pub fn run_evaluate(options: &EvaluateOptions) -> Result<()> {
    let store = RecordStore::new(&options.input);
    let records = if options.strict {
        store.load_strict()?
    } else {
        store.load()?
    };

    if records.is_empty() {
        warn!(
            "no records loaded from {}; nothing to score",
            options.input.display()
        );
        return Ok(());
    }
    info!(records = records.len(), "loaded record store");

    let lexical = BleuScorer::new();
    let learned = CometScorer::new(&options.comet_model, &options.comet_command);
    let reports = ReportWriter::new(&options.out_dir);

    score_and_report(&records, &lexical, &learned, &reports)?;
    Ok(())
}

/// Run both metrics over `records` and write all reports.
///
/// The metrics are taken as capabilities, so callers can substitute
/// alternates without touching the loading or reporting sides. Returns the
/// lexical and learned outcomes in that order.
///
/// # Errors
/// The first metric or report failure, unchanged.
pub fn score_and_report(
    records: &[SegmentRecord],
    lexical: &dyn Scorer,
    learned: &dyn Scorer,
    reports: &ReportWriter,
) -> Result<(ScoreOutcome, ScoreOutcome)> {
    let lexical_outcome = lexical.score(records)?;
    println!("{} score: {:.2}", lexical.name(), lexical_outcome.system());

    let learned_outcome = learned.score(records)?;
    println!("{} score: {:.4}", learned.name(), learned_outcome.system());

    let (summary_csv, summary_md) =
        reports.write_summary(lexical_outcome.system(), learned_outcome.system())?;
    println!("Summary written to: {}", summary_csv.display());
    println!("Summary written to: {}", summary_md.display());

    if let Some(segments) = learned_outcome.segments() {
        let details = reports.write_details(records, segments)?;
        println!("Details written to: {}", details.display());
    }

    Ok((lexical_outcome, learned_outcome))
}
