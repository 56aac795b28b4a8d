//! Error types for the models crate.
//!
//! Only loading a catalog snapshot from disk can fail; the domain types
//! themselves are plain data.

use thiserror::Error;

/// Errors that can occur while loading and validating a catalog snapshot
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot is not valid JSON or does not match the expected shape
    #[error("Parse error in {file}: {reason}")]
    ParseError { file: String, reason: String },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// The same movie id appears twice in one snapshot
    #[error("Duplicate movie id {0}")]
    DuplicateMovie(u64),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
