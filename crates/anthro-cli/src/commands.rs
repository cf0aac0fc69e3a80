//! Subcommand handlers: resolve options, build the run context, call the pipeline.

use anyhow::Result;
use tracing::info_span;

use anthro_cli::config::resolve_options;
use anthro_cli::pipeline::{inspect, run_pipeline};
use anthro_cli::types::{InspectReport, RunReport};
use anthro_model::RunContext;

use crate::cli::{InspectArgs, RunArgs};

pub fn run_pipeline_command(args: &RunArgs) -> Result<RunReport> {
    let options = resolve_options(args.input.config.as_deref(), &args.overrides())?;
    let ctx = RunContext::now().with_duplicate_ids(options.duplicate_ids);
    let run_span = info_span!("run", computed_at = %ctx.computed_at);
    let _run_guard = run_span.enter();
    run_pipeline(&options, &ctx)
}

pub fn run_inspect(args: &InspectArgs) -> Result<InspectReport> {
    let options = resolve_options(args.input.config.as_deref(), &args.overrides())?;
    inspect(&options)
}
