//! Line-oriented corpus reading
//!
//! A corpus is an ordered sequence of sentences, one per line. Position is
//! the segment index, so line order is semantically meaningful and must
//! survive every transformation downstream.

use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// An ordered sequence of sentences read from a line-oriented text file.
///
/// One entry per line with trailing whitespace (including the line
/// terminator) stripped. Blank lines are preserved as empty strings so
/// positions stay aligned across parallel files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    path: Option<PathBuf>,
    lines: Vec<String>,
}

impl Corpus {
    /// Read a corpus from a UTF-8 text file.
    ///
    /// # Errors
    /// Returns `Error::FileNotFound` if the path does not exist, or an IO
    /// error for any other read failure.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)?;
        let lines = text
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect();

        Ok(Self {
            path: Some(path.to_path_buf()),
            lines,
        })
    }

    /// Build a corpus from lines already in memory.
    ///
    /// Lines are taken verbatim; no whitespace stripping is applied.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { path: None, lines }
    }

    /// Path this corpus was read from, if it came from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when the corpus has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if in bounds.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Iterate over lines in file order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Consume the corpus, yielding its lines in file order.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
