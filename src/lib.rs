//! # Puntaje: Machine Translation Quality Evaluation
//!
//! Puntaje converts parallel text files (source, hypothesis, one or more
//! reference translations) into a line-delimited JSON record store, scores
//! the store with corpus BLEU and a COMET-style learned metric, and renders
//! summary and per-segment reports.
//!
//! ## Pipeline
//!
//! ```text
//! src.txt ──┐
//! hyp.txt ──┼─> Corpus -> AlignedCorpus -> SegmentRecord -> RecordStore
//! ref*.txt ─┘                                                   │
//!       ReportWriter <- Scorer (BLEU, COMET) <- load <──────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use puntaje::align::AlignedCorpus;
//! use puntaje::corpus::Corpus;
//! use puntaje::store::RecordStore;
//!
//! # fn main() -> puntaje::Result<()> {
//! let sources = Corpus::from_path("data/src.txt")?;
//! let hypotheses = Corpus::from_path("data/hyp.txt")?;
//! let references = vec![Corpus::from_path("data/ref1.txt")?];
//!
//! let aligned = AlignedCorpus::align(sources, hypotheses, &references)?;
//! RecordStore::new("data/converted.jsonl").write(&aligned.into_records())?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod align;
pub mod corpus;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod score;
pub mod store;

pub use error::{Error, Result};
