//! Grouped measurement averages.

use chrono::DateTime;
use polars::prelude::{
    AnyValue, DataFrame, DataType, Expr, IntoLazy, SortMultipleOptions, TimeUnit, col, lit,
};

use anthro_model::columns::{AVG_HEIGHT, AVG_WEIGHT, GROUP_KEY, HEIGHT, SUMMARY_COLUMNS, TIMESTAMP, WEIGHT};
use anthro_model::{GroupKey, GroupSummary, RunContext};

use crate::error::{AggregateError, Result};

/// Average height and weight per `(sport, medal, sex, country_noc)`.
///
/// Only rows with both a height and a weight take part; incomplete rows are
/// dropped, never imputed. Every group present in the remaining rows appears
/// exactly once, whatever its size. All rows carry `ctx.computed_at` in the
/// `timestamp` column (microsecond precision, UTC without a zone tag).
///
/// Output columns follow [`SUMMARY_COLUMNS`], rows are sorted by the group
/// key with nulls first.
///
/// # Errors
///
/// [`AggregateError::NotNormalized`] when `height` or `weight` is not Float64,
/// [`AggregateError::MissingColumn`] when a key or measurement column is absent.
pub fn aggregate(joined: &DataFrame, ctx: &RunContext) -> Result<DataFrame> {
    for column in GROUP_KEY.iter().chain([HEIGHT, WEIGHT].iter()) {
        if joined.column(column).is_err() {
            return Err(AggregateError::MissingColumn {
                column: (*column).to_string(),
                table: "joined results".to_string(),
            });
        }
    }
    for column in [HEIGHT, WEIGHT] {
        let dtype = joined.column(column)?.dtype();
        if dtype != &DataType::Float64 {
            return Err(AggregateError::NotNormalized {
                column: column.to_string(),
                dtype: dtype.clone(),
            });
        }
    }

    let keys: Vec<Expr> = GROUP_KEY.iter().map(|name| col(*name)).collect();
    let timestamp = lit(ctx.timestamp_micros())
        .cast(DataType::Datetime(TimeUnit::Microseconds, None))
        .alias(TIMESTAMP);

    let summary = joined
        .clone()
        .lazy()
        .filter(col(HEIGHT).is_not_null().and(col(WEIGHT).is_not_null()))
        .group_by(keys.clone())
        .agg([
            col(HEIGHT).mean().alias(AVG_HEIGHT),
            col(WEIGHT).mean().alias(AVG_WEIGHT),
        ])
        .with_column(timestamp)
        .select(SUMMARY_COLUMNS.iter().map(|name| col(*name)).collect::<Vec<_>>())
        .sort_by_exprs(keys, SortMultipleOptions::default())
        .collect()?;

    tracing::info!(
        input_rows = joined.height(),
        groups = summary.height(),
        computed_at = %ctx.computed_at,
        "measurements aggregated"
    );
    Ok(summary)
}

/// Convert an [`aggregate`] output frame into typed summary rows.
pub fn summaries(summary: &DataFrame) -> Result<Vec<GroupSummary>> {
    let sports = text_values(summary, GROUP_KEY[0])?;
    let medals = text_values(summary, GROUP_KEY[1])?;
    let sexes = text_values(summary, GROUP_KEY[2])?;
    let countries = text_values(summary, GROUP_KEY[3])?;
    let heights = float_values(summary, AVG_HEIGHT)?;
    let weights = float_values(summary, AVG_WEIGHT)?;
    let stamps = summary.column(TIMESTAMP)?;

    let mut rows = Vec::with_capacity(summary.height());
    for idx in 0..summary.height() {
        let invalid = |reason: &str| AggregateError::InvalidSummary {
            row: idx,
            reason: reason.to_string(),
        };
        let avg_height = heights[idx].ok_or_else(|| invalid("avg_height is null"))?;
        let avg_weight = weights[idx].ok_or_else(|| invalid("avg_weight is null"))?;
        let micros = match stamps.get(idx)? {
            AnyValue::Datetime(value, unit, _) => match unit {
                TimeUnit::Nanoseconds => value / 1_000,
                TimeUnit::Microseconds => value,
                TimeUnit::Milliseconds => value * 1_000,
            },
            other => return Err(invalid(&format!("timestamp has unexpected value {other}"))),
        };
        let computed_at =
            DateTime::from_timestamp_micros(micros).ok_or_else(|| invalid("timestamp out of range"))?;
        rows.push(GroupSummary {
            key: GroupKey {
                sport: sports[idx].clone(),
                medal: medals[idx].clone(),
                sex: sexes[idx].clone(),
                country_noc: countries[idx].clone(),
            },
            avg_height,
            avg_weight,
            computed_at,
        });
    }
    Ok(rows)
}

fn text_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    Ok(df.column(name)?.f64()?.into_iter().collect())
}
