//! Column-level normalization of measurement text.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

use crate::error::{NormalizeError, Result};
use crate::parser::ValueParser;

/// Replace a text column with its parsed Float64 form.
///
/// Returns a new frame; `df` is left untouched. Other columns, the row count
/// and the row order are unchanged, and the column keeps its position.
///
/// - a String column is parsed value by value with `parser`
/// - a Float64 or Float32 column keeps its finite non-negative values;
///   NaN, infinities and negatives become null
/// - integer and all-null columns are read as text, then parsed
///
/// # Errors
///
/// [`NormalizeError::ColumnNotFound`] when `column` is absent. This is a
/// caller error and is never recovered from.
pub fn normalize_column(df: &DataFrame, column: &str, parser: &ValueParser) -> Result<DataFrame> {
    let source = df
        .column(column)
        .map_err(|_| NormalizeError::ColumnNotFound(column.to_string()))?;

    let dtype = source.dtype().clone();
    let text = match dtype {
        DataType::Float64 | DataType::Float32 => {
            let widened = source.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = widened
                .f64()?
                .into_iter()
                .map(|value| value.filter(|v| v.is_finite() && *v >= 0.0))
                .collect();
            return replace_column(df, Series::new(column.into(), values));
        }
        DataType::String => source.clone(),
        ref other if other.is_integer() || matches!(other, DataType::Null) => {
            source.cast(&DataType::String)?
        }
        other => {
            return Err(NormalizeError::UnsupportedType {
                column: column.to_string(),
                dtype: other,
            });
        }
    };

    let values: Vec<Option<f64>> = text.str()?.into_iter().map(|raw| parser.parse(raw)).collect();
    replace_column(df, Series::new(column.into(), values))
}

fn replace_column(df: &DataFrame, parsed: Series) -> Result<DataFrame> {
    tracing::debug!(
        column = %parsed.name(),
        rows = parsed.len(),
        nulls = parsed.null_count(),
        "column normalized"
    );

    let mut out = df.clone();
    out.with_column(parsed)?;
    Ok(out)
}

/// Normalize each listed column once, in order.
pub fn normalize_columns(
    df: &DataFrame,
    columns: &[&str],
    parser: &ValueParser,
) -> Result<DataFrame> {
    let mut current = df.clone();
    for column in columns {
        current = normalize_column(&current, column, parser)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom};

    #[test]
    fn test_integer_column_is_parsed_through_text() {
        let df = DataFrame::new(vec![
            Series::new("height".into(), [Some(180i64), None, Some(175)]).into_column(),
        ])
        .unwrap();
        let parser = ValueParser::new().unwrap();
        let out = normalize_column(&df, "height", &parser).unwrap();

        let heights = out.column("height").unwrap();
        assert_eq!(heights.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = heights.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(180.0), None, Some(175.0)]);
    }

    #[test]
    fn test_float_column_drops_nan_infinite_and_negative() {
        let df = DataFrame::new(vec![
            Series::new(
                "weight".into(),
                [Some(f64::NAN), Some(-70.0), Some(f64::INFINITY), Some(80.0), None],
            )
            .into_column(),
        ])
        .unwrap();
        let parser = ValueParser::new().unwrap();
        let out = normalize_column(&df, "weight", &parser).unwrap();

        let weights = out.column("weight").unwrap();
        let values: Vec<Option<f64>> = weights.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![None, None, None, Some(80.0), None]);
    }

    #[test]
    fn test_float32_column_is_widened_and_cleaned() {
        let df = DataFrame::new(vec![
            Series::new("height".into(), [Some(180.5f32), Some(-1.0), Some(f32::NAN)])
                .into_column(),
        ])
        .unwrap();
        let parser = ValueParser::new().unwrap();
        let out = normalize_column(&df, "height", &parser).unwrap();

        let heights = out.column("height").unwrap();
        assert_eq!(heights.dtype(), &DataType::Float64);
        let values: Vec<Option<f64>> = heights.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(180.5), None, None]);
    }

    #[test]
    fn test_boolean_column_is_unsupported() {
        let df = DataFrame::new(vec![Series::new("weight".into(), [true]).into_column()]).unwrap();
        let parser = ValueParser::new().unwrap();
        let err = normalize_column(&df, "weight", &parser).unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedType { .. }));
    }
}
