//! Error types for joining and aggregation.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// A join or group column is absent.
    #[error("column '{column}' not found in {table}")]
    MissingColumn { column: String, table: String },

    /// A measurement column still holds raw text.
    #[error("column '{column}' must be normalized to Float64 before aggregation, found {dtype}")]
    NotNormalized { column: String, dtype: DataType },

    /// Duplicate biography identifiers under the reject policy.
    #[error("{count} athlete ids occur more than once in the biography table (e.g. {})", .sample.join(", "))]
    DuplicateIds { count: usize, sample: Vec<String> },

    /// A summary row could not be converted into a typed record.
    #[error("invalid summary row {row}: {reason}")]
    InvalidSummary { row: usize, reason: String },

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type for join and aggregation operations.
pub type Result<T> = std::result::Result<T, AggregateError>;
