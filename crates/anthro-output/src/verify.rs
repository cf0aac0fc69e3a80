//! Read-back check of a written summary.

use std::path::Path;

use anthro_ingest::{read_csv_table, read_parquet_file, require_columns};
use anthro_model::OutputFormat;
use anthro_model::columns::SUMMARY_COLUMNS;

use crate::error::{OutputError, Result};

/// Re-read a written summary and check its columns and row count.
pub fn verify_written(path: &Path, format: OutputFormat, expected_rows: usize) -> Result<()> {
    let df = match format {
        OutputFormat::Parquet => read_parquet_file(path)?,
        OutputFormat::Csv => read_csv_table(path)?,
    };
    require_columns(&df, &SUMMARY_COLUMNS, "summary output")?;
    if df.height() != expected_rows {
        return Err(OutputError::RowCountMismatch {
            path: path.to_path_buf(),
            expected: expected_rows,
            found: df.height(),
        });
    }
    tracing::debug!(path = %path.display(), rows = df.height(), "summary verified");
    Ok(())
}
