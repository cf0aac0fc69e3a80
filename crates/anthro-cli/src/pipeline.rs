//! Pipeline stages: ingest, normalize, aggregate, output.
//!
//! Each stage is a plain function over frames; [`run_pipeline`] chains them
//! inside one `info_span!` per stage and [`inspect`] runs the diagnostics
//! without writing anything.

use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use anthro_aggregate::{aggregate, duplicate_ids, join_results_with_bios, summaries};
use anthro_ingest::{load_bio_table, load_results_table};
use anthro_model::columns::MEASUREMENTS;
use anthro_model::{DuplicateIdPolicy, InputOptions, OutputOptions, PipelineOptions, RunContext};
use anthro_normalize::{
    IrregularValues, ValueParser, count_incomplete, irregular_values, normalize_columns,
};
use anthro_output::{verify_written, write_summary};

use crate::types::{InspectReport, RunReport};

/// Both input tables as loaded.
#[derive(Debug)]
pub struct IngestResult {
    pub bios: DataFrame,
    pub results: DataFrame,
}

/// Biographies with numeric measurements, plus what the parser saw.
#[derive(Debug)]
pub struct NormalizeResult {
    pub bios: DataFrame,
    pub irregular: Vec<IrregularValues>,
    pub incomplete_rows: usize,
}

pub fn ingest(input: &InputOptions) -> Result<IngestResult> {
    let bios = load_bio_table(&input.bio)
        .with_context(|| format!("load biographies from {}", input.bio.display()))?;
    let results = load_results_table(&input.results)
        .with_context(|| format!("load event results from {}", input.results.display()))?;
    Ok(IngestResult { bios, results })
}

/// Irregular raw values of every measurement column, at most `limit` each.
pub fn scan_irregular(
    bios: &DataFrame,
    parser: &ValueParser,
    limit: usize,
) -> Result<Vec<IrregularValues>> {
    MEASUREMENTS
        .iter()
        .map(|column| {
            irregular_values(bios, column, parser, limit)
                .with_context(|| format!("scan {column} values"))
        })
        .collect()
}

pub fn normalize(bios: &DataFrame, parser: &ValueParser, limit: usize) -> Result<NormalizeResult> {
    let irregular = scan_irregular(bios, parser, limit)?;
    for report in irregular.iter().filter(|report| !report.is_empty()) {
        warn!(
            column = %report.column,
            distinct = report.total,
            samples = ?report.samples,
            "irregular measurement values"
        );
    }

    let normalized =
        normalize_columns(bios, &MEASUREMENTS, parser).context("normalize measurements")?;
    let incomplete_rows =
        count_incomplete(&normalized, &MEASUREMENTS).context("count incomplete rows")?;
    if incomplete_rows > 0 {
        warn!(
            incomplete_rows,
            "biography rows without a usable height or weight are left out of the averages"
        );
    }
    Ok(NormalizeResult {
        bios: normalized,
        irregular,
        incomplete_rows,
    })
}

/// Write the summary, replacing earlier output, and read it back.
pub fn output(summary: &DataFrame, options: &OutputOptions) -> Result<()> {
    write_summary(summary, &options.path, options.format)
        .with_context(|| format!("write summary to {}", options.path.display()))?;
    verify_written(&options.path, options.format, summary.height())
        .context("verify written summary")?;
    Ok(())
}

/// Run every stage once. `ctx` supplies the run timestamp and the duplicate
/// id policy.
pub fn run_pipeline(options: &PipelineOptions, ctx: &RunContext) -> Result<RunReport> {
    let parser = ValueParser::new().context("compile measurement rules")?;

    let ingest_span = info_span!(
        "ingest",
        bio = %options.input.bio.display(),
        results = %options.input.results.display()
    );
    let ingest_start = Instant::now();
    let IngestResult { bios, results } = ingest_span.in_scope(|| ingest(&options.input))?;
    info!(
        bio_rows = bios.height(),
        result_rows = results.height(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let normalize_start = Instant::now();
    let normalized = info_span!("normalize")
        .in_scope(|| normalize(&bios, &parser, options.diagnostics_limit))?;
    info!(
        row_count = normalized.bios.height(),
        incomplete_rows = normalized.incomplete_rows,
        duration_ms = normalize_start.elapsed().as_millis(),
        "normalize complete"
    );

    let aggregate_start = Instant::now();
    let (joined_rows, summary) = info_span!("aggregate").in_scope(|| -> Result<_> {
        let joined = join_results_with_bios(&results, &normalized.bios, ctx.duplicate_ids)
            .context("join event results with biographies")?;
        debug!(columns = ?joined.get_column_names(), "joined columns");
        let summary = aggregate(&joined, ctx).context("aggregate measurements")?;
        Ok((joined.height(), summary))
    })?;
    let groups = summaries(&summary).context("read summary rows")?;
    info!(
        joined_rows,
        groups = groups.len(),
        duration_ms = aggregate_start.elapsed().as_millis(),
        "aggregate complete"
    );

    let output_start = Instant::now();
    info_span!("output", path = %options.output.path.display())
        .in_scope(|| output(&summary, &options.output))?;
    info!(
        path = %options.output.path.display(),
        duration_ms = output_start.elapsed().as_millis(),
        "output complete"
    );

    Ok(RunReport {
        bio_rows: bios.height(),
        result_rows: results.height(),
        joined_rows,
        incomplete_rows: normalized.incomplete_rows,
        irregular: normalized.irregular,
        groups,
        output: options.output.clone(),
        computed_at: ctx.computed_at,
    })
}

/// Load both tables and report data quality without writing output.
pub fn inspect(options: &PipelineOptions) -> Result<InspectReport> {
    let parser = ValueParser::new().context("compile measurement rules")?;
    let IngestResult { bios, results } =
        info_span!("ingest").in_scope(|| ingest(&options.input))?;

    info_span!("inspect").in_scope(|| -> Result<InspectReport> {
        let normalized = normalize(&bios, &parser, options.diagnostics_limit)?;
        let duplicates = duplicate_ids(&bios).context("find duplicate athlete ids")?;
        let joined = join_results_with_bios(&results, &normalized.bios, DuplicateIdPolicy::FanOut)
            .context("join event results with biographies")?;
        Ok(InspectReport {
            bio_rows: bios.height(),
            result_rows: results.height(),
            matched_rows: joined.height(),
            incomplete_rows: normalized.incomplete_rows,
            irregular: normalized.irregular,
            duplicate_ids: duplicates,
        })
    })
}
