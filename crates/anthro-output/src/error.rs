//! Output error types.

use std::path::PathBuf;

use anthro_ingest::IngestError;
use anthro_model::OutputFormat;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while persisting or verifying the summary table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// File system error.
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to encode the frame.
    #[error("failed to encode {format:?} output {path}: {source}")]
    Encode {
        format: OutputFormat,
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// The finished temp file could not replace the destination.
    #[error("failed to move {temp_path} into place at {target_path}: {source}")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The written file could not be read back.
    #[error("written output is unreadable: {0}")]
    ReadBack(#[from] IngestError),

    /// The written file holds a different number of rows than the frame.
    #[error("{path} holds {found} rows, expected {expected}")]
    RowCountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
