//! CLI argument definitions for the `anthro` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use anthro_cli::config::Overrides;
use anthro_model::OutputFormat;

#[derive(Parser)]
#[command(
    name = "anthro",
    version,
    about = "Average athlete height and weight per sport, medal, sex and country",
    long_about = "Join athlete biographies with event results, normalize free-text \
                  height and weight values, and write the per-group averages.\n\n\
                  Inputs may be CSV files, Parquet files or directories of Parquet parts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the summary table and write it.
    Run(RunArgs),

    /// Report irregular measurements and join coverage without writing output.
    Inspect(InspectArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// TOML file with pipeline options; flags given here take precedence.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Biography table (CSV, Parquet file or Parquet directory).
    #[arg(long = "bio", value_name = "PATH")]
    pub bio: Option<PathBuf>,

    /// Event-result table (CSV, Parquet file or Parquet directory).
    #[arg(long = "results", value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// Maximum irregular values reported per measurement column.
    #[arg(long = "diagnostics-limit", value_name = "N")]
    pub diagnostics_limit: Option<usize>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Summary destination (default: gold/avg_stats.parquet).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output encoding; inferred from the --output extension when omitted.
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,

    /// Fail when an athlete id occurs more than once in the biography table.
    ///
    /// By default such ids fan out the join: every matching result row is
    /// repeated once per biography row.
    #[arg(long = "reject-duplicate-ids")]
    pub reject_duplicate_ids: bool,
}

#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

impl InputArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            bio: self.bio.clone(),
            results: self.results.clone(),
            diagnostics_limit: self.diagnostics_limit,
            ..Overrides::default()
        }
    }
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            format: self.format.map(OutputFormat::from),
            reject_duplicate_ids: self.reject_duplicate_ids,
            ..self.input.overrides()
        }
    }
}

impl InspectArgs {
    pub fn overrides(&self) -> Overrides {
        self.input.overrides()
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Parquet,
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Parquet => OutputFormat::Parquet,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
