//! Error types for `SigCore`
//!
//! Structural problems in dump text (malformed lines, unbalanced brackets)
//! are never errors; parsers skip them. The variants below cover what can
//! actually abort a pipeline run: getting the text in the first place.

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `SigCore` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Resource Errors ====================
    /// The requested resource does not exist in the fetcher's backing store.
    #[error("resource not found: {resource}")]
    ResourceNotFound {
        /// The resource name as requested (e.g. `client_funcs.c`).
        resource: String,
    },

    /// The resource root is not a usable directory.
    #[error("invalid path: {path}")]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
    },

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),

    // ==================== Parsing Errors ====================
    /// JSON parsing or serialization error (hazedumper dumps).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `SigCore` operations.
pub type Result<T> = std::result::Result<T, Error>;
