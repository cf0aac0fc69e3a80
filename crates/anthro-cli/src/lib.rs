//! Library side of the `anthro` binary: configuration, logging and the
//! pipeline stages, kept here so integration tests can drive them.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
