//! Inner join of event results with athlete biographies.

use std::collections::BTreeSet;

use polars::prelude::{
    DataFrame, DataType, IntoLazy, JoinArgs, JoinType, LazyFrame, col, len, lit,
};

use anthro_model::DuplicateIdPolicy;
use anthro_model::columns::{ATHLETE_ID, BIO_OWNED, COUNTRY_NOC, bio_prefixed, results_prefixed};

use crate::error::{AggregateError, Result};

/// Number of duplicate ids quoted in errors and logs.
const DUPLICATE_SAMPLE: usize = 5;

/// Athlete ids that occur more than once in a biography table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateIds {
    pub count: usize,
    /// First few duplicate ids, sorted.
    pub sample: Vec<String>,
}

impl DuplicateIds {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Find the athlete ids that would fan out the join. Null ids never match
/// and are not counted.
pub fn duplicate_ids(bios: &DataFrame) -> Result<DuplicateIds> {
    require(bios, ATHLETE_ID, "athlete_bio")?;
    let counts = bios
        .clone()
        .lazy()
        .filter(col(ATHLETE_ID).is_not_null())
        .group_by([col(ATHLETE_ID)])
        .agg([len().alias("n")])
        .filter(col("n").gt(lit(1)))
        .select([col(ATHLETE_ID).cast(DataType::String)])
        .collect()?;

    let ids: BTreeSet<String> = counts
        .column(ATHLETE_ID)?
        .str()?
        .into_iter()
        .map(|id| id.unwrap_or("<null>").to_string())
        .collect();
    Ok(DuplicateIds {
        count: ids.len(),
        sample: ids.into_iter().take(DUPLICATE_SAMPLE).collect(),
    })
}

/// Join event results with biographies on `athlete_id`.
///
/// Inner join: ids present on only one side produce no row. A biography id
/// that occurs `n` times yields `n` joined rows per matching result under
/// [`DuplicateIdPolicy::FanOut`] and fails the join under
/// [`DuplicateIdPolicy::Reject`].
///
/// Columns are disambiguated before joining. An event-result column named
/// `height`, `weight` or `sex` becomes `results_<name>`, so the joined frame
/// keeps the biography's measurements and sex. On the biography side,
/// `country_noc` always becomes `bio_country_noc`, and every other non-key
/// column whose name still exists in `results` gets the same `bio_` prefix.
/// When `results` carries no `country_noc`, the joined frame takes it from
/// the biography side so the group key is complete.
pub fn join_results_with_bios(
    results: &DataFrame,
    bios: &DataFrame,
    policy: DuplicateIdPolicy,
) -> Result<DataFrame> {
    require(results, ATHLETE_ID, "athlete_event_results")?;
    require(bios, ATHLETE_ID, "athlete_bio")?;

    let duplicates = duplicate_ids(bios)?;
    if !duplicates.is_empty() {
        match policy {
            DuplicateIdPolicy::Reject => {
                return Err(AggregateError::DuplicateIds {
                    count: duplicates.count,
                    sample: duplicates.sample,
                });
            }
            DuplicateIdPolicy::FanOut => tracing::warn!(
                count = duplicates.count,
                sample = ?duplicates.sample,
                "duplicate athlete ids in biography table, joined rows will fan out"
            ),
        }
    }

    let mut results = move_aside_bio_owned(results)?;
    let mut bios = disambiguate_bio_columns(&results, bios)?;
    align_key_types(&mut results, &mut bios)?;

    let results_have_country = results.column(COUNTRY_NOC).is_ok();
    let mut joined: LazyFrame = results.lazy().join(
        bios.lazy(),
        [col(ATHLETE_ID)],
        [col(ATHLETE_ID)],
        JoinArgs::new(JoinType::Inner),
    );
    if !results_have_country {
        joined = joined.with_column(col(bio_prefixed(COUNTRY_NOC)).alias(COUNTRY_NOC));
    }
    let joined = joined.collect()?;

    tracing::info!(rows = joined.height(), "results joined with biographies");
    Ok(joined)
}

/// Rename event-result columns that shadow biography-owned columns.
fn move_aside_bio_owned(results: &DataFrame) -> Result<DataFrame> {
    let mut renamed = results.clone();
    for name in BIO_OWNED {
        if renamed.column(name).is_ok() {
            let target = results_prefixed(name);
            tracing::debug!(from = %name, to = %target, "renaming event-result column");
            renamed.rename(name, target.into())?;
        }
    }
    Ok(renamed)
}

/// Rename biography columns that would be ambiguous after the join.
fn disambiguate_bio_columns(results: &DataFrame, bios: &DataFrame) -> Result<DataFrame> {
    let result_names: BTreeSet<String> = results
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let bio_names: Vec<String> = bios
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut renamed = bios.clone();
    for name in bio_names {
        if name == ATHLETE_ID {
            continue;
        }
        if name == COUNTRY_NOC || result_names.contains(&name) {
            let target = bio_prefixed(&name);
            tracing::debug!(from = %name, to = %target, "renaming biography column");
            renamed.rename(&name, target.into())?;
        }
    }
    Ok(renamed)
}

/// Cast both join keys to text when their types differ, e.g. an integer id
/// from Parquet against a text id from CSV.
fn align_key_types(results: &mut DataFrame, bios: &mut DataFrame) -> Result<()> {
    let left = results.column(ATHLETE_ID)?.dtype().clone();
    let right = bios.column(ATHLETE_ID)?.dtype().clone();
    if left == right {
        return Ok(());
    }
    tracing::debug!(results = %left, bios = %right, "casting athlete ids to text for join");
    let left_key = results.column(ATHLETE_ID)?.cast(&DataType::String)?;
    results.with_column(left_key)?;
    let right_key = bios.column(ATHLETE_ID)?.cast(&DataType::String)?;
    bios.with_column(right_key)?;
    Ok(())
}

fn require(df: &DataFrame, column: &str, table: &str) -> Result<()> {
    if df.column(column).is_err() {
        return Err(AggregateError::MissingColumn {
            column: column.to_string(),
            table: table.to_string(),
        });
    }
    Ok(())
}
