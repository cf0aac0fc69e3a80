//! Joining and aggregation.
//!
//! - **join**: inner join of event results with biographies on `athlete_id`
//! - **aggregate**: per-group mean height and weight, stamped with the run time

mod aggregate;
mod error;
mod join;

pub use aggregate::{aggregate, summaries};
pub use error::{AggregateError, Result};
pub use join::{DuplicateIds, duplicate_ids, join_results_with_bios};
