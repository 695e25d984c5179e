//! Error types for Puntaje
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Puntaje error types
#[derive(Error, Debug)]
pub enum Error {
    /// A required input file does not exist
    #[error("input file not found: {}", path.display())]
    FileNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Parallel corpora disagree on line counts (conversion precondition)
    #[error("line count mismatch: {corpus} has {actual} lines, expected {expected}\nSource, hypothesis and every reference file must have one line per segment")]
    AlignmentMismatch {
        /// Which input is out of step
        corpus: String,
        /// Line count of the source corpus
        expected: usize,
        /// Line count actually found
        actual: usize,
    },

    /// A record store line is invalid JSON or lacks a required key
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the store file
        line: usize,
        /// What was wrong with the line
        reason: String,
    },

    /// The scoring backend failed (launch, prediction, or reply decoding)
    #[error("scorer failure: {0}")]
    ScorerFailure(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV report error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
