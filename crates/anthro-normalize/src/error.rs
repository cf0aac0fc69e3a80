//! Error types for measurement normalization.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Errors raised while normalizing measurement columns.
///
/// Unparseable values are never errors: they become nulls.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The caller asked for a column the frame does not have.
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// The column cannot be read as text.
    #[error("column '{column}' has unsupported type {dtype}")]
    UnsupportedType { column: String, dtype: DataType },

    /// A rule pattern failed to compile.
    #[error("invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
