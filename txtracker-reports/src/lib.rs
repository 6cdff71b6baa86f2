//! Wallet transaction report generator.
//!
//! Fetches a wallet's external, internal, ERC-20 and ERC-721 activity from
//! an Etherscan-compatible explorer, normalizes each category into the
//! shared [`ReportRow`] shape and writes one CSV report per category.
//!
//! - [`pipeline`]: concurrent per-category orchestration.
//! - [`normalize`]: record-to-row projection and timestamp formatting.
//! - [`report`]: [`ReportRow`] and the [`Exportable`] column metadata.
//! - [`export`]: generic CSV writer for any [`Exportable`] row type.
//! - [`config`]: `config.toml` loading.
//!
//! [`ReportRow`]: report::ReportRow
//! [`Exportable`]: report::Exportable

pub mod config;
pub mod error;
pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod report;

pub use error::{CategoryError, PipelineError, ReportError};
pub use pipeline::{CategoryStatus, ReportPipeline, RunReport, RunStatus};
