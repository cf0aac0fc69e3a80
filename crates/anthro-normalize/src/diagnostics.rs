//! Data-quality diagnostics for measurement columns.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, DataType, Expr, IntoLazy, col};

use crate::error::{NormalizeError, Result};
use crate::parser::{Measurement, ValueParser};

/// Distinct raw values of a column that need attention before parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrregularValues {
    pub column: String,
    /// Number of distinct irregular values found.
    pub total: usize,
    /// Up to `limit` of those values, sorted.
    pub samples: Vec<String>,
}

impl IrregularValues {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// A raw value is irregular when it carries whitespace (even if it still
/// parses) or when it is neither a single number nor a range.
pub fn is_irregular(parser: &ValueParser, raw: &str) -> bool {
    raw.chars().any(char::is_whitespace)
        || matches!(
            parser.classify(raw),
            Measurement::Missing | Measurement::Unrecognized
        )
}

/// Collect the irregular raw values of a text column. Nulls are skipped.
pub fn irregular_values(
    df: &DataFrame,
    column: &str,
    parser: &ValueParser,
    limit: usize,
) -> Result<IrregularValues> {
    let source = df
        .column(column)
        .map_err(|_| NormalizeError::ColumnNotFound(column.to_string()))?;
    let text = if source.dtype() == &DataType::String {
        source.clone()
    } else {
        source.cast(&DataType::String)?
    };

    let found: BTreeSet<&str> = text
        .str()?
        .into_iter()
        .flatten()
        .filter(|raw| is_irregular(parser, raw))
        .collect();

    Ok(IrregularValues {
        column: column.to_string(),
        total: found.len(),
        samples: found.into_iter().take(limit).map(str::to_string).collect(),
    })
}

/// Number of rows with a null in any of `columns`.
pub fn count_incomplete(df: &DataFrame, columns: &[&str]) -> Result<usize> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(NormalizeError::ColumnNotFound((*column).to_string()));
        }
    }
    let Some(any_null) = columns
        .iter()
        .map(|name| col(*name).is_null())
        .reduce(Expr::or)
    else {
        return Ok(0);
    };
    let incomplete = df.clone().lazy().filter(any_null).collect()?;
    Ok(incomplete.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(
                "height".into(),
                [
                    Some("180"),
                    Some("87 - 90"),
                    Some("abc"),
                    None,
                    Some(""),
                    Some("abc"),
                    Some("72 "),
                ],
            )
            .into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_irregular_values_are_distinct_and_sorted() {
        let parser = ValueParser::new().unwrap();
        let report = irregular_values(&frame(), "height", &parser, 10).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.samples, vec!["", "72 ", "87 - 90", "abc"]);
    }

    #[test]
    fn test_irregular_values_respect_limit() {
        let parser = ValueParser::new().unwrap();
        let report = irregular_values(&frame(), "height", &parser, 1).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.samples.len(), 1);
    }

    #[test]
    fn test_count_incomplete_any_null() {
        let df = DataFrame::new(vec![
            Series::new("height".into(), [Some(1.0), None, Some(3.0), None]).into_column(),
            Series::new("weight".into(), [Some(1.0), Some(2.0), None, None]).into_column(),
        ])
        .unwrap();
        assert_eq!(count_incomplete(&df, &["height", "weight"]).unwrap(), 3);
        assert_eq!(count_incomplete(&df, &["height"]).unwrap(), 2);
        assert_eq!(count_incomplete(&df, &[]).unwrap(), 0);
        assert!(count_incomplete(&df, &["sex"]).is_err());
    }
}
