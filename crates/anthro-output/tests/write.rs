//! Integration tests for summary persistence.

use std::fs;
use std::path::Path;

use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series, TimeUnit};
use tempfile::TempDir;

use anthro_ingest::read_parquet_file;
use anthro_model::OutputFormat;
use anthro_output::{OutputError, temp_path_for, verify_written, write_summary};

fn summary(sports: &[&str]) -> DataFrame {
    let n = sports.len();
    let timestamp = Series::new("timestamp".into(), vec![1_723_400_000_000_000i64; n])
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .unwrap();
    DataFrame::new(vec![
        Series::new("sport".into(), sports.to_vec()).into_column(),
        Series::new("medal".into(), vec!["Gold"; n]).into_column(),
        Series::new("sex".into(), vec!["F"; n]).into_column(),
        Series::new("country_noc".into(), vec!["NED"; n]).into_column(),
        Series::new("avg_height".into(), vec![170.5; n]).into_column(),
        Series::new("avg_weight".into(), vec![64.25; n]).into_column(),
        timestamp.into_column(),
    ])
    .unwrap()
}

fn sports_in(path: &Path) -> Vec<String> {
    read_parquet_file(path)
        .unwrap()
        .column("sport")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect()
}

#[test]
fn parquet_output_is_created_with_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gold").join("avg_stats.parquet");
    let df = summary(&["Hockey", "Cycling"]);

    write_summary(&df, &path, OutputFormat::Parquet).unwrap();

    assert!(path.is_file());
    assert!(!temp_path_for(&path, OutputFormat::Parquet).exists());
    verify_written(&path, OutputFormat::Parquet, 2).unwrap();
    let back = read_parquet_file(&path).unwrap();
    assert_eq!(
        back.column("timestamp").unwrap().dtype(),
        &DataType::Datetime(TimeUnit::Microseconds, None)
    );
}

#[test]
fn second_run_replaces_previous_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avg_stats.parquet");

    write_summary(&summary(&["Hockey", "Cycling", "Rowing"]), &path, OutputFormat::Parquet)
        .unwrap();
    write_summary(&summary(&["Sailing"]), &path, OutputFormat::Parquet).unwrap();

    assert_eq!(sports_in(&path), vec!["Sailing"]);
}

#[test]
fn failed_write_keeps_previous_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avg_stats.parquet");
    write_summary(&summary(&["Hockey"]), &path, OutputFormat::Parquet).unwrap();

    // A directory squatting on the temp path makes the encoder fail to open it.
    fs::create_dir(temp_path_for(&path, OutputFormat::Parquet)).unwrap();
    let err = write_summary(&summary(&["Sailing"]), &path, OutputFormat::Parquet).unwrap_err();

    assert!(matches!(err, OutputError::Io { operation: "create", .. }));
    assert_eq!(sports_in(&path), vec!["Hockey"]);
}

#[test]
fn failed_rename_removes_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avg_stats.parquet");
    // A non-empty directory at the destination cannot be replaced by a file.
    fs::create_dir(&path).unwrap();
    fs::write(path.join("keep"), b"x").unwrap();

    let err = write_summary(&summary(&["Sailing"]), &path, OutputFormat::Parquet).unwrap_err();

    assert!(matches!(err, OutputError::AtomicWriteFailed { .. }));
    assert!(!temp_path_for(&path, OutputFormat::Parquet).exists());
    assert!(path.join("keep").exists());
}

#[test]
fn csv_output_has_header_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avg_stats.csv");

    write_summary(&summary(&["Hockey", "Cycling"]), &path, OutputFormat::Csv).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("sport,medal,sex,country_noc,avg_height,avg_weight,timestamp")
    );
    assert_eq!(lines.count(), 2);
    verify_written(&path, OutputFormat::Csv, 2).unwrap();
}

#[test]
fn verify_reports_row_count_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("avg_stats.parquet");
    write_summary(&summary(&["Hockey"]), &path, OutputFormat::Parquet).unwrap();

    let err = verify_written(&path, OutputFormat::Parquet, 3).unwrap_err();
    assert!(matches!(
        err,
        OutputError::RowCountMismatch {
            expected: 3,
            found: 1,
            ..
        }
    ));
}
