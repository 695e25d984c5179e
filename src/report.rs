//! Report rendering
//!
//! Every evaluation writes the two-row summary table (metric name and
//! formatted score) as both CSV and Markdown. When a metric produced
//! per-segment scores, a detail table keyed by record id is written as
//! well. Reports are plain files in the output directory and are
//! overwritten on each run.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::record::SegmentRecord;
use crate::Result;

/// Summary table file name.
pub const SUMMARY_CSV: &str = "evaluation_summary.csv";
/// Markdown twin of the summary table.
pub const SUMMARY_MD: &str = "evaluation_summary.md";
/// Per-segment detail table, written only when segment scores exist.
pub const DETAILS_CSV: &str = "evaluation_details.csv";

/// Delimiter joining multiple references into one detail cell.
const REFERENCE_JOIN: &str = "; ";

/// Writes evaluation artifacts into an output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    out_dir: PathBuf,
}

impl ReportWriter {
    /// Report into `out_dir`; the directory is created on first write.
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// The output directory.
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Write the summary table as CSV and Markdown, returning the two paths
    /// written. BLEU is formatted to 2 decimal places, COMET to 4.
    ///
    /// # Errors
    /// Any IO or CSV failure.
    pub fn write_summary(&self, bleu: f64, comet: f64) -> Result<(PathBuf, PathBuf)> {
        fs::create_dir_all(&self.out_dir)?;
        let rows = [
            ("BLEU", format!("{bleu:.2}")),
            ("COMET", format!("{comet:.4}")),
        ];

        let csv_path = self.out_dir.join(SUMMARY_CSV);
        let mut writer = csv::Writer::from_path(&csv_path)?;
        writer.write_record(["Metric", "Score"])?;
        for (metric, score) in &rows {
            writer.write_record([*metric, score.as_str()])?;
        }
        writer.flush()?;

        let md_path = self.out_dir.join(SUMMARY_MD);
        let mut md = String::new();
        md.push_str("# Translation Quality Evaluation Results\n\n");
        md.push_str(&format!(
            "Generated: {}\n\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str("| Metric | Score |\n");
        md.push_str("|--------|-------|\n");
        for (metric, score) in &rows {
            md.push_str(&format!("| {metric} | {score} |\n"));
        }
        fs::write(&md_path, md)?;

        Ok((csv_path, md_path))
    }

    /// Write the per-segment detail table. Rows carry the record id, so a
    /// row stays attributable to its segment no matter how the file is
    /// later sorted or filtered. Scores must align 1:1 with `records`.
    ///
    /// # Errors
    /// Any IO or CSV failure.
    pub fn write_details(
        &self,
        records: &[SegmentRecord],
        segment_scores: &[f64],
    ) -> Result<PathBuf> {
        debug_assert_eq!(
            records.len(),
            segment_scores.len(),
            "segment scores must align with records"
        );

        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(DETAILS_CSV);
        let mut writer = csv::Writer::from_path(&path)?;
        writer.write_record(["ID", "Source", "Hypothesis", "Reference", "COMET_Score"])?;

        for (record, score) in records.iter().zip(segment_scores) {
            let reference = record.refs().join(REFERENCE_JOIN);
            let score = score.to_string();
            writer.write_record([
                record.id(),
                record.src(),
                record.hyp(),
                reference.as_str(),
                score.as_str(),
            ])?;
        }
        writer.flush()?;

        Ok(path)
    }
}
