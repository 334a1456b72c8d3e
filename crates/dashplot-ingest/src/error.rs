// File: crates/dashplot-ingest/src/error.rs
// Summary: Ingestion error taxonomy; the Display text is what ends up in fallback notes.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("HTTP {status}")]
    Http { status: u16 },
    #[error("fetch failed: {0}")]
    Transport(String),
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Empty file")]
    EmptyTable,
    #[error("empty log")]
    EmptyLog,
    #[error("no host:value pairs found")]
    NoPingPairs,
    /// A `.txt` file that is not a ping log; carries its first lines.
    #[error("unrecognized text file")]
    UnrecognizedText { preview: String },
}

impl IngestError {
    /// Failures that only the ping-log reader produces.
    pub fn is_ping_log(&self) -> bool {
        matches!(self, Self::EmptyLog | Self::NoPingPairs)
    }
}
