//! Input table loading.
//!
//! Loads the biography and event-result tables produced by the upstream
//! stage into Polars DataFrames.
//!
//! # Accepted layouts
//!
//! - **CSV**: single header row, every column read as text
//! - **Parquet**: a single file
//! - **Parquet directory**: all `*.parquet` parts, stacked in name order
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use anthro_ingest::{load_bio_table, load_results_table};
//!
//! let bios = load_bio_table(Path::new("silver/athlete_bio"))?;
//! let results = load_results_table(Path::new("silver/athlete_event_results"))?;
//! ```

mod error;
mod reader;
mod schema;

use std::path::Path;

use anthro_model::columns::{BIO_REQUIRED, RESULTS_REQUIRED};
use polars::prelude::DataFrame;

// === Error Types ===
pub use error::{IngestError, Result};

// === Reading ===
pub use reader::{
    TableSource, list_parquet_parts, read_csv_table, read_parquet_dir, read_parquet_file,
    read_table,
};

// === Schema ===
pub use schema::require_columns;

/// Load the biography table and check its required columns.
pub fn load_bio_table(path: &Path) -> Result<DataFrame> {
    let df = read_table(path)?;
    require_columns(&df, &BIO_REQUIRED, "athlete_bio")?;
    Ok(df)
}

/// Load the event-result table and check its required columns.
pub fn load_results_table(path: &Path) -> Result<DataFrame> {
    let df = read_table(path)?;
    require_columns(&df, &RESULTS_REQUIRED, "athlete_event_results")?;
    Ok(df)
}
