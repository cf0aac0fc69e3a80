//! Required-column checks.

use polars::prelude::DataFrame;

use crate::error::{IngestError, Result};

/// Fails on the first column of `required` that `df` lacks.
///
/// `table` names the table in the error message.
pub fn require_columns(df: &DataFrame, required: &[&str], table: &str) -> Result<()> {
    for column in required {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                table: table.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{NamedFrom, Series, IntoColumn};

    #[test]
    fn test_require_columns_reports_first_missing() {
        let df = DataFrame::new(vec![
            Series::new("athlete_id".into(), ["1"]).into_column(),
            Series::new("sport".into(), ["Judo"]).into_column(),
        ])
        .unwrap();

        assert!(require_columns(&df, &["athlete_id", "sport"], "results").is_ok());
        let err = require_columns(&df, &["athlete_id", "medal", "sex"], "results").unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingColumn { ref column, .. } if column == "medal"
        ));
    }
}
