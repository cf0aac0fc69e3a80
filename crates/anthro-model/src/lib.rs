//! Data model for the athlete measurement summary pipeline.
//!
//! Shared by every crate in the workspace:
//!
//! - **columns**: column names of the input and output tables
//! - **summary**: group keys and per-group summary rows
//! - **context**: the explicit per-run context handed to each stage
//! - **options**: pipeline configuration, loadable from TOML

pub mod columns;
pub mod context;
pub mod options;
pub mod summary;

pub use context::RunContext;
pub use options::{DuplicateIdPolicy, InputOptions, OutputFormat, OutputOptions, PipelineOptions};
pub use summary::{GroupKey, GroupSummary};
