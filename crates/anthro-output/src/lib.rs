//! Summary table persistence.
//!
//! Writes the aggregated summary as Parquet (default) or CSV. Each run fully
//! replaces the previous table through a temp-file-and-rename write, and the
//! result can be read back to confirm it landed intact.

mod error;
mod verify;
mod writer;

pub use error::{OutputError, Result};
pub use verify::verify_written;
pub use writer::{temp_path_for, write_summary};
