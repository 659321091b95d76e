//! Error types for dataset discovery and loading.
//!
//! Missing columns are never errors; they are skipped by the aggregator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or parsing a results file.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Results folder does not exist or is not a directory.
    #[error("results folder not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read results folder {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Requested file does not exist or is not a CSV file.
    #[error("dataset not found: {name}")]
    MissingFile { name: String },

    /// Failed to open or read the file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but is not valid tabular data.
    #[error("failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    /// File has no header row.
    #[error("no header row in {name}")]
    NoHeader { name: String },
}

impl ReportError {
    /// Whether this error means the requested dataset is not available.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReportError::MissingFile { .. })
    }
}

/// Result alias for dataset operations.
pub type Result<T> = std::result::Result<T, ReportError>;
