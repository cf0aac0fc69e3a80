//! End-to-end tests for the pipeline stages.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use anthro_cli::pipeline::{inspect, run_pipeline};
use anthro_ingest::{read_csv_table, read_parquet_file};
use anthro_model::{DuplicateIdPolicy, GroupKey, OutputFormat, PipelineOptions, RunContext};

const BIOS: &str = "\
athlete_id,name,sex,height,weight,country_noc
1,A. Adams,M,87-90,72,USA
2,B. Brown,M,190,\"85,90\",USA
3,C. Chen,F,,58,CHN
4,D. Diaz,F,168 cm,61,ESP
";

const RESULTS: &str = "\
athlete_id,sport,event,medal
1,Judo,Judo -81kg,Gold
2,Judo,Judo +100kg,Gold
3,Diving,3m Springboard,Silver
4,Rowing,Single Sculls,
9,Rowing,Single Sculls,Bronze
";

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new(bios: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("athlete_bio.csv"), bios).unwrap();
        fs::write(dir.path().join("athlete_event_results.csv"), RESULTS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self, output: &Path, format: OutputFormat) -> PipelineOptions {
        PipelineOptions::new()
            .with_inputs(
                self.path("athlete_bio.csv"),
                self.path("athlete_event_results.csv"),
            )
            .with_output(output, format)
    }
}

fn ctx() -> RunContext {
    RunContext::at(Utc.with_ymd_and_hms(2024, 8, 11, 20, 0, 0).unwrap())
}

#[test]
fn run_writes_one_group_per_complete_key() {
    let fixture = Fixture::new(BIOS);
    let output = fixture.path("gold/avg_stats.parquet");
    let options = fixture.options(&output, OutputFormat::Parquet);

    let report = run_pipeline(&options, &ctx()).unwrap();

    assert_eq!(report.bio_rows, 4);
    assert_eq!(report.result_rows, 5);
    assert_eq!(report.joined_rows, 4);
    assert_eq!(report.incomplete_rows, 2);
    assert_eq!(report.groups.len(), 1);
    let group = &report.groups[0];
    assert_eq!(group.key, GroupKey::new("Judo", Some("Gold"), "M", "USA"));
    assert!((group.avg_height - 139.25).abs() < 1e-9);
    assert!((group.avg_weight - 79.75).abs() < 1e-9);
    assert_eq!(group.computed_at, ctx().computed_at);

    let written = read_parquet_file(&output).unwrap();
    assert_eq!(written.height(), 1);
}

#[test]
fn irregular_values_are_reported() {
    let fixture = Fixture::new(BIOS);
    let output = fixture.path("avg_stats.parquet");
    let report = run_pipeline(&fixture.options(&output, OutputFormat::Parquet), &ctx()).unwrap();

    let height = report
        .irregular
        .iter()
        .find(|r| r.column == "height")
        .unwrap();
    assert!(height.samples.contains(&"168 cm".to_string()));
    let weight = report
        .irregular
        .iter()
        .find(|r| r.column == "weight")
        .unwrap();
    assert!(weight.is_empty());
}

#[test]
fn rerun_overwrites_csv_output() {
    let fixture = Fixture::new(BIOS);
    let output = fixture.path("avg_stats.csv");
    fs::write(&output, "stale,content\n1,2\n3,4\n5,6\n").unwrap();

    run_pipeline(&fixture.options(&output, OutputFormat::Csv), &ctx()).unwrap();
    run_pipeline(&fixture.options(&output, OutputFormat::Csv), &ctx()).unwrap();

    let written = read_csv_table(&output).unwrap();
    assert_eq!(written.height(), 1);
    assert_eq!(written.width(), 7);
}

#[test]
fn duplicate_ids_fail_under_reject_policy() {
    let bios = format!("{BIOS}2,B. Brown,M,191,86,USA\n");
    let fixture = Fixture::new(&bios);
    let output = fixture.path("avg_stats.parquet");
    let ctx = ctx().with_duplicate_ids(DuplicateIdPolicy::Reject);

    let err = run_pipeline(&fixture.options(&output, OutputFormat::Parquet), &ctx).unwrap_err();

    assert!(format!("{err:#}").contains("occur more than once"));
    assert!(!output.exists());
}

#[test]
fn missing_input_leaves_no_output() {
    let fixture = Fixture::new(BIOS);
    let output = fixture.path("avg_stats.parquet");
    let options = PipelineOptions::new()
        .with_inputs(fixture.path("nope.csv"), fixture.path("athlete_event_results.csv"))
        .with_output(&output, OutputFormat::Parquet);

    let err = run_pipeline(&options, &ctx()).unwrap_err();

    assert!(format!("{err:#}").contains("load biographies"));
    assert!(!output.exists());
}

#[test]
fn inspect_reports_without_writing() {
    let bios = format!("{BIOS}2,B. Brown,M,191,86,USA\n");
    let fixture = Fixture::new(&bios);
    let output = fixture.path("avg_stats.parquet");

    let report = inspect(&fixture.options(&output, OutputFormat::Parquet)).unwrap();

    assert_eq!(report.bio_rows, 5);
    assert_eq!(report.matched_rows, 5);
    assert_eq!(report.duplicate_ids.sample, vec!["2"]);
    assert_eq!(report.incomplete_rows, 2);
    assert!(!output.exists());
}
