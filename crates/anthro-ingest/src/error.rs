//! Error types for table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading an input table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input path does not exist.
    #[error("input not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to open a file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory holds no Parquet part files.
    #[error("no parquet files in {path}")]
    EmptyDirectory { path: PathBuf },

    /// File extension is neither CSV nor Parquet.
    #[error("unsupported input format: {path}")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Failed to decode Parquet with Polars.
    #[error("failed to read parquet {path}: {message}")]
    ParquetRead { path: PathBuf, message: String },

    // === Schema Errors ===
    /// A required column is absent from the table.
    #[error("required column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    /// Parquet parts of one table disagree on their schema.
    #[error("schema mismatch between parquet parts in {path}: {message}")]
    SchemaMismatch { path: PathBuf, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
