use std::path::PathBuf;

use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::song::RecordError;

/// Fatal pipeline error. Every variant terminates the run; skippable records
/// never reach this type.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON on line {line}: {source}")]
    InvalidJson {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize output row: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid record NO. {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error(transparent)]
    Summarize(#[from] LlmError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {url}: HTTP status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Input file {} does not exist and no download URL is configured", .0.display())]
    MissingInput(PathBuf),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}
