//! Pipeline error type shared by all stages.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ground-truth records are label data; a field that fails numeric
    /// parsing aborts the run rather than silently shrinking the label set.
    #[error("malformed ground-truth record in {} line {line}: {reason}", path.display())]
    TruthRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Observation timestamps drive the alignment; an unparseable one
    /// signals a broader format problem and is never swallowed.
    #[error("observation timestamp {timestamp:?}: {reason}")]
    Timestamp { timestamp: String, reason: String },

    #[error("writing dataset: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
