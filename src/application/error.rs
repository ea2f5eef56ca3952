//! Application-level errors (document storage and configuration)

use std::path::PathBuf;
use thiserror::Error;

/// Application errors are real failures, unlike the absorbed edit
/// outcomes of the domain layer: the document file or configuration
/// could not be handled.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("cannot read board {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write board {path}: {message}")]
    WriteDocument { path: PathBuf, message: String },

    #[error("malformed board {path}: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    #[error("board already exists: {0}")]
    DocumentExists(PathBuf),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
