//! Pipeline options from a TOML file plus command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use anthro_model::{DuplicateIdPolicy, OutputFormat, PipelineOptions};

/// Values given on the command line; each one beats the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub bio: Option<PathBuf>,
    pub results: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub reject_duplicate_ids: bool,
    pub diagnostics_limit: Option<usize>,
}

/// Parse a TOML options file. Missing keys keep their defaults.
pub fn load_options(path: &Path) -> Result<PipelineOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("parse config file {}", path.display()))
}

/// Defaults, then the config file when given, then `overrides`.
///
/// Without an explicit `--format`, a new output path with a `.csv` or
/// `.parquet` extension selects the format.
pub fn resolve_options(config: Option<&Path>, overrides: &Overrides) -> Result<PipelineOptions> {
    let mut options = match config {
        Some(path) => load_options(path)?,
        None => PipelineOptions::default(),
    };

    if let Some(bio) = &overrides.bio {
        options.input.bio.clone_from(bio);
    }
    if let Some(results) = &overrides.results {
        options.input.results.clone_from(results);
    }
    if let Some(output) = &overrides.output {
        options.output.path.clone_from(output);
        if let Some(format) = OutputFormat::from_path(output) {
            options.output.format = format;
        }
    }
    if let Some(format) = overrides.format {
        options.output.format = format;
    }
    if overrides.reject_duplicate_ids {
        options.duplicate_ids = DuplicateIdPolicy::Reject;
    }
    if let Some(limit) = overrides.diagnostics_limit {
        options.diagnostics_limit = limit;
    }
    Ok(options)
}
