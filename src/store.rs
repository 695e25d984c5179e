//! Line-delimited JSON record store
//!
//! The store is the durable hand-off between conversion and scoring: UTF-8
//! text, one JSON object per line, non-ASCII preserved literally. Writing
//! is deterministic, so identical records always produce a byte-identical
//! file.

use crate::record::{segment_id, SegmentRecord};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A record store at a fixed filesystem location.
///
/// Construction does no IO; `write` and `load` do.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

/// Lenient parse shape: `id` may be absent (synthesized at load), the
/// `src`/`hyp`/`ref` keys are required.
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: Option<String>,
    src: String,
    hyp: String,
    #[serde(rename = "ref")]
    refs: Vec<String>,
}

impl RecordStore {
    /// Point a store at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `records` as one JSON object per line, creating missing parent
    /// directories and overwriting any existing file.
    ///
    /// # Errors
    /// Any IO or serialization failure.
    pub fn write(&self, records: &[SegmentRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut out = BufWriter::new(File::create(&self.path)?);
        for record in records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    /// Load records leniently: a line that is invalid JSON or lacks a
    /// required key is skipped with a warning and loading continues. A
    /// present `id` is kept verbatim; an absent one is synthesized from the
    /// record's position among the loaded records.
    ///
    /// # Errors
    /// `Error::FileNotFound` if the store file does not exist. Read
    /// failures are fatal; malformed lines are not.
    pub fn load(&self) -> Result<Vec<SegmentRecord>> {
        self.load_inner(false)
    }

    /// Load records strictly: the first malformed line aborts the load.
    ///
    /// # Errors
    /// `Error::FileNotFound` if the store file does not exist, or
    /// `Error::MalformedRecord` for the first bad line.
    pub fn load_strict(&self) -> Result<Vec<SegmentRecord>> {
        self.load_inner(true)
    }

    fn load_inner(&self, strict: bool) -> Result<Vec<SegmentRecord>> {
        if !self.path.exists() {
            return Err(Error::FileNotFound {
                path: self.path.clone(),
            });
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut records = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            match serde_json::from_str::<RawRecord>(&line) {
                Ok(raw) => {
                    let id = raw.id.unwrap_or_else(|| segment_id(records.len()));
                    records.push(SegmentRecord::new(id, raw.src, raw.hyp, raw.refs));
                }
                Err(err) => {
                    if strict {
                        return Err(Error::MalformedRecord {
                            line: idx + 1,
                            reason: err.to_string(),
                        });
                    }
                    warn!("skipping malformed record at line {}: {err}: {line}", idx + 1);
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> RecordStore {
        RecordStore::new(std::env::temp_dir().join(name))
    }

    fn sample_records() -> Vec<SegmentRecord> {
        vec![
            SegmentRecord::at_position(0, "s1", "h1", vec!["r1a".to_string(), "r1b".to_string()]),
            SegmentRecord::at_position(1, "s2", "h2", vec!["r2a".to_string()]),
        ]
    }

    #[test]
    fn test_write_then_load_round_trip() {
        let store = temp_store("puntaje_store_round_trip.jsonl");
        let records = sample_records();
        store.write(&records).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_write_is_deterministic() {
        let store = temp_store("puntaje_store_deterministic.jsonl");
        let records = sample_records();

        store.write(&records).unwrap();
        let first = fs::read(store.path()).unwrap();
        store.write(&records).unwrap();
        let second = fs::read(store.path()).unwrap();
        assert_eq!(first, second);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let dir = std::env::temp_dir().join("puntaje_store_nested/deep");
        let store = RecordStore::new(dir.join("records.jsonl"));
        store.write(&sample_records()).unwrap();
        assert!(store.path().exists());

        fs::remove_dir_all(std::env::temp_dir().join("puntaje_store_nested")).ok();
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let store = temp_store("puntaje_store_overwrite.jsonl");
        store.write(&sample_records()).unwrap();
        store
            .write(&[SegmentRecord::at_position(0, "only", "one", vec![])])
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].src(), "only");

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let store = RecordStore::new("/nonexistent/records.jsonl");
        assert!(matches!(store.load(), Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_load_skips_invalid_json() {
        let store = temp_store("puntaje_store_bad_json.jsonl");
        fs::write(
            store.path(),
            concat!(
                r#"{"id":"segment_001","src":"s1","hyp":"h1","ref":["r1"]}"#,
                "\n",
                "not json at all\n",
                r#"{"id":"segment_003","src":"s3","hyp":"h3","ref":["r3"]}"#,
                "\n",
            ),
        )
        .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id(), "segment_001");
        assert_eq!(loaded[1].id(), "segment_003");

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_load_skips_records_missing_required_keys() {
        let store = temp_store("puntaje_store_missing_keys.jsonl");
        fs::write(
            store.path(),
            concat!(
                r#"{"id":"segment_001","src":"s1","ref":["r1"]}"#,
                "\n",
                r#"{"src":"s2","hyp":"h2","ref":["r2"]}"#,
                "\n",
            ),
        )
        .unwrap();

        // First line lacks "hyp" and is dropped; second lacks only "id",
        // which is synthesized.
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), "segment_001");
        assert_eq!(loaded[0].src(), "s2");

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_load_strict_fails_on_first_bad_line() {
        let store = temp_store("puntaje_store_strict.jsonl");
        fs::write(
            store.path(),
            concat!(
                r#"{"id":"segment_001","src":"s1","hyp":"h1","ref":[]}"#,
                "\n",
                "garbage\n",
            ),
        )
        .unwrap();

        match store.load_strict() {
            Err(Error::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_load_preserves_unicode() {
        let store = temp_store("puntaje_store_unicode.jsonl");
        let records = vec![SegmentRecord::at_position(
            0,
            "你好，世界",
            "héllo wörld",
            vec!["añjo".to_string()],
        )];
        store.write(&records).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("你好，世界"));

        let loaded = store.load().unwrap();
        assert_eq!(loaded, records);

        fs::remove_file(store.path()).ok();
    }

    #[test]
    fn test_empty_store_loads_no_records() {
        let store = temp_store("puntaje_store_empty.jsonl");
        store.write(&[]).unwrap();
        assert!(store.load().unwrap().is_empty());

        fs::remove_file(store.path()).ok();
    }
}
