//! Error types shared by the ingestion pipeline and the catalogue.
//!
//! Missing or malformed optional fields are not errors: the scanner and
//! builder fall back to defaults. Only the conditions below are signaled.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Errors raised by the ingestion pipeline, the catalogue and the snapshot store
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A document could not be read or turned into an entry
    #[error("File operation failed for {}: {message}", path.display())]
    FileOperation { path: PathBuf, message: String },

    /// A chapter document has no usable body text
    #[error("Chapter content error: {message}")]
    ChapterContent { message: String },

    /// No work with this id exists in the catalogue
    #[error("Work with ID {id} not found")]
    WorkNotFound { id: i64 },

    /// The id cannot be stored without exhausting the id counter
    #[error("Work ID {id} is out of range")]
    IdOutOfRange { id: i64 },

    /// A saved catalogue snapshot is unreadable or does not verify
    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LibraryError {
    /// Whether this error concerns a chapter body rather than the document as a whole
    pub fn is_chapter_content(&self) -> bool {
        matches!(self, LibraryError::ChapterContent { .. })
    }
}
