//! Error types for data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering, reading or writing tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open or create a file.
    #[error("failed to access file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// The extension is neither CSV nor Parquet.
    #[error("unsupported file format for {path}; only CSV and Parquet files are supported")]
    UnsupportedFormat { path: PathBuf },

    /// CSV delimiters must be a single ASCII character.
    #[error("invalid CSV delimiter {delimiter:?}; expected a single ASCII character")]
    InvalidDelimiter { delimiter: char },

    /// Polars failed to parse the file.
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// Polars failed to serialize the table.
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
