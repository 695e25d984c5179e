//! COMET-style learned quality estimation behind a process boundary
//!
//! The neural metric is an external collaborator that owns model
//! resolution, download-and-cache and batching. This adapter fixes the
//! wire contract: the whole batch goes to the backend's stdin as one JSON
//! record per line (`{"src": ..., "mt": ..., "ref": [...]}`), and the
//! backend replies on stdout with a single JSON object
//! (`{"scores": [...], "system_score": ...}`). The backend's stderr passes
//! through so model download progress stays visible.
//!
//! Any failure is fatal for the batch; partial results are never salvaged.

use std::io::Write;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ScoreOutcome, Scorer};
use crate::record::SegmentRecord;
use crate::{Error, Result};

/// Default pretrained quality-estimation model identifier.
pub const DEFAULT_COMET_MODEL: &str = "eamt22-cometinho-da";

/// Default scoring backend command.
pub const DEFAULT_COMET_COMMAND: &str = "comet-score";

/// One scoring request line sent to the backend.
#[derive(Debug, Serialize)]
struct CometRequest<'a> {
    src: &'a str,
    mt: &'a str,
    #[serde(rename = "ref")]
    refs: &'a [String],
}

/// The backend's reply.
#[derive(Debug, Deserialize)]
struct CometResponse {
    scores: Vec<f64>,
    system_score: f64,
}

/// Learned quality-estimation scorer invoking an external backend command.
#[derive(Debug, Clone)]
pub struct CometScorer {
    model: String,
    command: String,
}

impl CometScorer {
    /// Create a scorer for `model`, invoked through `command`.
    #[must_use]
    pub fn new(model: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            command: command.into(),
        }
    }

    /// The model identifier passed to the backend via `--model`.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The backend command.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }
}

impl Default for CometScorer {
    fn default() -> Self {
        Self::new(DEFAULT_COMET_MODEL, DEFAULT_COMET_COMMAND)
    }
}

impl Scorer for CometScorer {
    fn name(&self) -> &'static str {
        "COMET"
    }

    fn score(&self, records: &[SegmentRecord]) -> Result<ScoreOutcome> {
        if records.is_empty() {
            return Err(Error::ScorerFailure(
                "cannot score an empty record batch".to_string(),
            ));
        }

        let payload = encode_requests(records)?;
        info!(
            model = %self.model,
            records = records.len(),
            "invoking learned scoring backend"
        );

        let mut child = Command::new(&self.command)
            .arg("--model")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|err| {
                Error::ScorerFailure(format!(
                    "failed to launch scoring backend '{}': {err}",
                    self.command
                ))
            })?;

        // Send the whole batch, then close stdin so the backend can reply.
        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes()).map_err(|err| {
                Error::ScorerFailure(format!(
                    "failed to send records to '{}': {err}",
                    self.command
                ))
            })?;
        }

        let output = child.wait_with_output().map_err(|err| {
            Error::ScorerFailure(format!(
                "scoring backend '{}' did not finish: {err}",
                self.command
            ))
        })?;

        if !output.status.success() {
            return Err(Error::ScorerFailure(format!(
                "scoring backend '{}' exited with {}",
                self.command, output.status
            )));
        }

        let response = decode_response(&output.stdout)?;
        if response.scores.len() != records.len() {
            return Err(Error::ScorerFailure(format!(
                "scoring backend returned {} segment scores for {} records",
                response.scores.len(),
                records.len()
            )));
        }

        Ok(ScoreOutcome::with_segments(
            response.system_score,
            response.scores,
        ))
    }
}

fn encode_requests(records: &[SegmentRecord]) -> Result<String> {
    let mut payload = String::with_capacity(records.len() * 64);
    for record in records {
        let request = CometRequest {
            src: record.src(),
            mt: record.hyp(),
            refs: record.refs(),
        };
        payload.push_str(&serde_json::to_string(&request)?);
        payload.push('\n');
    }
    Ok(payload)
}

fn decode_response(stdout: &[u8]) -> Result<CometResponse> {
    serde_json::from_slice(stdout).map_err(|err| {
        Error::ScorerFailure(format!("unparseable scoring backend reply: {err}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scorer_configuration() {
        let scorer = CometScorer::default();
        assert_eq!(scorer.model(), DEFAULT_COMET_MODEL);
        assert_eq!(scorer.command(), DEFAULT_COMET_COMMAND);
        assert_eq!(scorer.name(), "COMET");
    }

    #[test]
    fn test_encode_requests_one_line_per_record() {
        let records = vec![
            SegmentRecord::at_position(0, "s1", "h1", vec!["r1".to_string()]),
            SegmentRecord::at_position(1, "s2", "h2", vec!["r2a".to_string(), "r2b".to_string()]),
        ];
        let payload = encode_requests(&records).unwrap();
        let lines: Vec<&str> = payload.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"src":"s1","mt":"h1","ref":["r1"]}"#);
        assert_eq!(lines[1], r#"{"src":"s2","mt":"h2","ref":["r2a","r2b"]}"#);
        assert!(payload.ends_with('\n'));
    }

    #[test]
    fn test_encode_requests_keeps_unicode_literal() {
        let records = vec![SegmentRecord::at_position(
            0,
            "你好",
            "héllo",
            vec!["mundo".to_string()],
        )];
        let payload = encode_requests(&records).unwrap();
        assert!(payload.contains("你好"));
        assert!(!payload.contains("\\u"));
    }

    #[test]
    fn test_decode_response() {
        let reply = br#"{"scores": [0.71, 0.82], "system_score": 0.765}"#;
        let response = decode_response(reply).unwrap();
        assert_eq!(response.scores, vec![0.71, 0.82]);
        assert!((response.system_score - 0.765).abs() < f64::EPSILON);
    }

    #[test]
    fn test_decode_garbage_is_a_scorer_failure() {
        let result = decode_response(b"model loading... 42%");
        assert!(matches!(result, Err(Error::ScorerFailure(_))));
    }

    #[test]
    fn test_empty_batch_is_a_scorer_failure() {
        let result = CometScorer::default().score(&[]);
        assert!(matches!(result, Err(Error::ScorerFailure(_))));
    }

    #[test]
    fn test_missing_backend_is_a_scorer_failure() {
        let scorer = CometScorer::new("some-model", "/nonexistent/backend-command");
        let records = vec![SegmentRecord::at_position(0, "s", "h", vec!["r".to_string()])];
        let result = scorer.score(&records);
        assert!(matches!(result, Err(Error::ScorerFailure(_))));
    }
}
