//! Measurement normalization.
//!
//! Turns the free-text `height` and `weight` columns of the biography table
//! into nullable Float64 columns:
//!
//! - **parser**: ordered rule list classifying one raw value
//! - **column**: applies the parser to a whole DataFrame column
//! - **diagnostics**: irregular raw values and incomplete-row counts

mod column;
pub mod diagnostics;
mod error;
pub mod parser;

pub use column::{normalize_column, normalize_columns};
pub use diagnostics::{IrregularValues, count_incomplete, irregular_values};
pub use error::{NormalizeError, Result};
pub use parser::{Measurement, ParseRule, RuleKind, Separator, ValueParser};
