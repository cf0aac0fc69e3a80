//! Configuration options for a pipeline run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Storage encoding of the summary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Parquet,
    Csv,
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Parquet => "parquet",
            Self::Csv => "csv",
        }
    }

    /// Infer the format from a path extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("parquet") {
            Some(Self::Parquet)
        } else if ext.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else {
            None
        }
    }
}

/// Treatment of athlete identifiers that occur more than once in the
/// biography table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateIdPolicy {
    /// Keep the inner-join fan-out: one joined row per matching pair.
    #[default]
    FanOut,
    /// Fail the run before joining.
    Reject,
}

/// Locations of the two input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Biography table: a CSV file, a Parquet file or a directory of Parquet parts.
    pub bio: PathBuf,
    /// Event-result table, same accepted layouts as `bio`.
    pub results: PathBuf,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            bio: PathBuf::from("silver/athlete_bio"),
            results: PathBuf::from("silver/athlete_event_results"),
        }
    }
}

/// Destination of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gold/avg_stats.parquet"),
            format: OutputFormat::Parquet,
        }
    }
}

/// Options controlling one pipeline run.
///
/// Every field has a default, so a configuration file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub input: InputOptions,
    pub output: OutputOptions,
    pub duplicate_ids: DuplicateIdPolicy,
    /// Maximum number of irregular raw values reported per measurement column.
    pub diagnostics_limit: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input: InputOptions::default(),
            output: OutputOptions::default(),
            duplicate_ids: DuplicateIdPolicy::default(),
            diagnostics_limit: 20,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_inputs(mut self, bio: impl Into<PathBuf>, results: impl Into<PathBuf>) -> Self {
        self.input.bio = bio.into();
        self.input.results = results.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        self.output.path = path.into();
        self.output.format = format;
        self
    }

    #[must_use]
    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("gold/avg.PARQUET")),
            Some(OutputFormat::Parquet)
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("avg.csv")),
            Some(OutputFormat::Csv)
        );
        assert_eq!(OutputFormat::from_path(Path::new("gold/avg_stats")), None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let options: PipelineOptions = toml::from_str(
            r#"
            duplicate_ids = "reject"

            [output]
            format = "csv"
            "#,
        )
        .unwrap();
        assert_eq!(options.duplicate_ids, DuplicateIdPolicy::Reject);
        assert_eq!(options.output.format, OutputFormat::Csv);
        assert_eq!(options.output.path, PathBuf::from("gold/avg_stats.parquet"));
        assert_eq!(options.input, InputOptions::default());
        assert_eq!(options.diagnostics_limit, 20);
    }
}
