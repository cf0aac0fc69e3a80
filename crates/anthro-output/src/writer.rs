//! Atomic summary writer.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, ParquetWriter, SerWriter};

use anthro_model::OutputFormat;

use crate::error::{OutputError, Result};

/// Sibling path the encoder writes to before the final rename.
pub fn temp_path_for(path: &Path, format: OutputFormat) -> PathBuf {
    path.with_extension(format!("{}.tmp", format.extension()))
}

/// Write the summary table to `path`, replacing any previous output.
///
/// The frame is encoded into a temp file next to the destination, synced,
/// then renamed over `path`. Readers see either the previous table or the
/// complete new one; a failed run leaves the previous table in place and
/// removes its temp file.
/// Parent directories are created as needed.
pub fn write_summary(df: &DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path, format);
    if let Err(err) = encode(df, &temp_path, format) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(OutputError::AtomicWriteFailed {
            temp_path,
            target_path: path.to_path_buf(),
            source,
        });
    }

    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = df.height(),
        "summary written"
    );
    Ok(())
}

fn encode(df: &DataFrame, temp_path: &Path, format: OutputFormat) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|source| OutputError::Io {
        operation: "create",
        path: temp_path.to_path_buf(),
        source,
    })?;

    let mut frame = df.clone();
    let encoded = match format {
        OutputFormat::Parquet => ParquetWriter::new(&mut file).finish(&mut frame).map(|_| ()),
        OutputFormat::Csv => CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut frame),
    };
    encoded.map_err(|source| OutputError::Encode {
        format,
        path: temp_path.to_path_buf(),
        source,
    })?;

    file.sync_all().map_err(|source| OutputError::Io {
        operation: "sync",
        path: temp_path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_keeps_directory() {
        let path = Path::new("gold/avg_stats.parquet");
        assert_eq!(
            temp_path_for(path, OutputFormat::Parquet),
            PathBuf::from("gold/avg_stats.parquet.tmp")
        );
        assert_eq!(
            temp_path_for(Path::new("out.csv"), OutputFormat::Csv),
            PathBuf::from("out.csv.tmp")
        );
    }
}
