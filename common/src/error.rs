use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the peer list.
///
/// Both variants are fatal for the run: a missing or corrupt peer list is an
/// operator-actionable configuration problem, not a transient condition, so
/// nothing is probed and nothing is published.
#[derive(Debug, Error)]
pub enum PeerListError {
    #[error("peer list {path:?} not found: {source}")]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt peer list: line {line_no} ({line:?}): {reason}")]
    CorruptLine {
        line_no: usize,
        line: String,
        reason: String,
    },
}

impl PeerListError {
    pub fn corrupt(line_no: usize, line: &str, reason: impl Into<String>) -> Self {
        Self::CorruptLine {
            line_no,
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
