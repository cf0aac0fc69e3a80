use chrono::{DateTime, Utc};

use anthro_aggregate::DuplicateIds;
use anthro_model::{GroupSummary, OutputOptions};
use anthro_normalize::IrregularValues;

/// Outcome of a full pipeline run.
#[derive(Debug)]
pub struct RunReport {
    pub bio_rows: usize,
    pub result_rows: usize,
    pub joined_rows: usize,
    /// Biography rows left without a height or weight after parsing.
    pub incomplete_rows: usize,
    pub irregular: Vec<IrregularValues>,
    pub groups: Vec<GroupSummary>,
    pub output: OutputOptions,
    pub computed_at: DateTime<Utc>,
}

/// Outcome of `anthro inspect`: input diagnostics, nothing written.
#[derive(Debug)]
pub struct InspectReport {
    pub bio_rows: usize,
    pub result_rows: usize,
    pub matched_rows: usize,
    pub incomplete_rows: usize,
    pub irregular: Vec<IrregularValues>,
    pub duplicate_ids: DuplicateIds,
}
