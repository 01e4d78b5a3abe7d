use std::path::PathBuf;
use thiserror::Error;

/// The corpus source could not be turned into a snapshot.
///
/// Individual bad records never produce this error; they are skipped.
#[derive(Debug, Error)]
pub enum CorpusLoadError {
    #[error("Failed to read corpus at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corpus is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported corpus shape: {0}")]
    Shape(String),

    #[error("None of the {total} corpus records could be loaded")]
    NoValidRecords { total: usize },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    CorpusLoad(#[from] CorpusLoadError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Session store unavailable: {0}")]
    SessionUnavailable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
