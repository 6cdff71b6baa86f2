//! Error types for report generation.

use std::path::PathBuf;

use thiserror::Error;
use txtracker::ReportCategory;

/// Result alias for a single report stage.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failure of one stage of a category report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Building the request or talking to the explorer failed.
    #[error(transparent)]
    Provider(#[from] txtracker::ProviderError),

    /// The response envelope or the category's record list did not decode.
    #[error("malformed explorer response: {0}")]
    SchemaDecode(#[from] serde_json::Error),

    /// A record carried a timestamp that is not a Unix-seconds integer.
    #[error("invalid timestamp `{value}`")]
    InvalidTimestamp {
        /// The offending field value.
        value: String,
    },

    /// Creating the output directory or writing the report failed.
    #[error("cannot write {}: {source}", path.display())]
    Filesystem {
        /// File or directory being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The category task panicked or was aborted before finishing.
    #[error("report task did not complete: {0}")]
    Task(String),
}

impl ReportError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>, source: impl Into<std::io::Error>) -> Self {
        Self::Filesystem {
            path: path.into(),
            source: source.into(),
        }
    }
}

/// A [`ReportError`] tagged with the category whose task raised it.
#[derive(Debug, Error)]
#[error("{category} report failed: {source}")]
pub struct CategoryError {
    /// Category whose task failed.
    pub category: ReportCategory,
    /// What went wrong.
    #[source]
    pub source: ReportError,
}

/// Aggregate failure of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// At least one category failed; the others may still have written
    /// their reports.
    #[error("{failed} of {total} report(s) failed; first failure: {first}")]
    Failed {
        /// Number of failed categories.
        failed: usize,
        /// Number of categories that ran.
        total: usize,
        /// First failure in registry order.
        #[source]
        first: CategoryError,
    },
}
