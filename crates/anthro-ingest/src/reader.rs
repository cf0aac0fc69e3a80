//! Table reading for CSV files, Parquet files and Parquet part directories.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvReadOptions, DataFrame, ParquetReader, SerReader};

use crate::error::{IngestError, Result};

/// On-disk layout of an input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSource {
    Csv,
    Parquet,
    /// Directory of `*.parquet` part files, as written by a distributed engine.
    ParquetDir,
}

impl TableSource {
    /// Classify a path by its kind and extension.
    pub fn detect(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(IngestError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if path.is_dir() {
            return Ok(Self::ParquetDir);
        }
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Ok(Self::Csv),
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => Ok(Self::Parquet),
            _ => Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read an input table, dispatching on its layout.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let df = match TableSource::detect(path)? {
        TableSource::Csv => read_csv_table(path)?,
        TableSource::Parquet => read_parquet_file(path)?,
        TableSource::ParquetDir => read_parquet_dir(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "table loaded"
    );
    Ok(df)
}

/// Reads a CSV file with a single header row.
///
/// Every column is read as text: measurement fields must reach the parser
/// verbatim, and identifiers must not be coerced differently per file.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a single Parquet file.
pub fn read_parquet_file(path: &Path) -> Result<DataFrame> {
    let file = File::open(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    ParquetReader::new(file)
        .finish()
        .map_err(|e| IngestError::ParquetRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads and stacks all Parquet parts of a directory in file-name order.
///
/// Hidden files and marker files (`.crc`, `_SUCCESS`) are skipped.
pub fn read_parquet_dir(dir: &Path) -> Result<DataFrame> {
    let parts = list_parquet_parts(dir)?;
    let mut combined: Option<DataFrame> = None;
    for part in &parts {
        let df = read_parquet_file(part)?;
        match combined.as_mut() {
            Some(existing) => {
                existing
                    .vstack_mut(&df)
                    .map_err(|e| IngestError::SchemaMismatch {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    })?;
            }
            None => combined = Some(df),
        }
    }
    tracing::debug!(path = %dir.display(), parts = parts.len(), "parquet parts stacked");
    combined.ok_or_else(|| IngestError::EmptyDirectory {
        path: dir.to_path_buf(),
    })
}

/// Lists the Parquet part files of a directory, sorted by name.
pub fn list_parquet_parts(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;
    let mut parts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || name.starts_with('_') {
            continue;
        }
        let is_parquet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
        if is_parquet {
            parts.push(path);
        }
    }
    parts.sort();
    Ok(parts)
}
