// error.rs - Error types for file-backed stores.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// A persisted file exists but does not parse.
    #[error("corrupt file {path}: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },

    /// Failed to serialize data for writing.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A report file name pattern failed to compile.
    #[error("invalid file name pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// No entry with this id exists.
    #[error("no entry with id '{0}'")]
    NotFound(String),
}

impl ArchiveError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ArchiveError::IoError {
            path: path.display().to_string(),
            source,
        }
    }
}
