//! Concurrent report generation.
//!
//! For each [`ReportCategory`] the pipeline spawns one task that:
//! 1. Builds the list URL and fetches the raw response.
//! 2. Decodes the outer [`Envelope`], leaving `result` undecoded.
//! 3. Normalizes `result` into [`ReportRow`]s.
//! 4. Writes `<wallet>_<slug>_report.csv` under the output directory.
//!
//! Tasks share only the provider handle and the wallet address. A failing
//! task never stops its siblings; every outcome is collected once all
//! tasks have finished, in registry order.
//!
//! [`ReportRow`]: crate::report::ReportRow

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::task::JoinHandle;
use txtracker::{DataProvider, Envelope, ReportCategory};

use crate::error::{CategoryError, PipelineError, ReportError, Result};
use crate::export;
use crate::normalize;

/// Default report directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "files/reports";

/// What a successful category task produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryStatus {
    /// A report file was written.
    Written {
        /// Path of the report.
        path: PathBuf,
        /// Number of data rows (header excluded).
        rows: usize,
    },
    /// The explorer returned no activity; no file was written.
    Empty,
}

/// Outcome of one category task.
#[derive(Debug)]
pub struct CategoryOutcome {
    /// Category the task ran for.
    pub category: ReportCategory,
    /// Its result.
    pub result: std::result::Result<CategoryStatus, CategoryError>,
}

/// Overall state of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Every category succeeded.
    AllSucceeded,
    /// At least one category failed.
    PartiallyFailed,
}

/// Per-category outcomes of one pipeline run, in registry order.
#[derive(Debug)]
pub struct RunReport {
    /// One entry per category that ran.
    pub outcomes: Vec<CategoryOutcome>,
}

impl RunReport {
    /// Whether every category succeeded.
    #[must_use]
    pub fn status(&self) -> RunStatus {
        if self.outcomes.iter().all(|o| o.result.is_ok()) {
            RunStatus::AllSucceeded
        } else {
            RunStatus::PartiallyFailed
        }
    }

    /// Failures in registry order.
    pub fn failures(&self) -> impl Iterator<Item = &CategoryError> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
    }

    /// Paths of the reports that were written.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(CategoryStatus::Written { path, .. }) => Some(path.as_path()),
            _ => None,
        })
    }

    /// Collapse the run into a single result.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Failed`] if any category failed, carrying
    /// the failure count and the first failure in registry order.
    pub fn into_result(self) -> std::result::Result<(), PipelineError> {
        let total = self.outcomes.len();
        let mut failures = self.outcomes.into_iter().filter_map(|o| o.result.err());
        match failures.next() {
            None => Ok(()),
            Some(first) => Err(PipelineError::Failed {
                failed: 1 + failures.count(),
                total,
                first,
            }),
        }
    }
}

/// Fetch–normalize–write pipeline for one wallet.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    provider: Arc<dyn DataProvider>,
    wallet_address: Arc<str>,
    output_dir: PathBuf,
    categories: Vec<ReportCategory>,
}

impl ReportPipeline {
    /// Create a pipeline covering every category.
    #[must_use]
    pub fn new(
        provider: Arc<dyn DataProvider>,
        wallet_address: impl Into<Arc<str>>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            wallet_address: wallet_address.into(),
            output_dir: output_dir.into(),
            categories: ReportCategory::ALL.to_vec(),
        }
    }

    /// Restrict the run to `categories` (duplicates are ignored, registry
    /// order is kept).
    #[must_use]
    pub fn with_categories(mut self, categories: &[ReportCategory]) -> Self {
        self.categories = ReportCategory::ALL
            .iter()
            .copied()
            .filter(|c| categories.contains(c))
            .collect();
        self
    }

    /// Path the report for `category` is written to.
    #[must_use]
    pub fn report_path(&self, category: ReportCategory) -> PathBuf {
        self.output_dir.join(category.file_name(&self.wallet_address))
    }

    /// Run every category concurrently and wait for all of them.
    pub async fn run(&self) -> RunReport {
        tracing::info!(
            wallet = %self.wallet_address,
            reports = self.categories.len(),
            "starting report generation"
        );

        let handles: Vec<(ReportCategory, JoinHandle<Result<CategoryStatus>>)> = self
            .categories
            .iter()
            .map(|&category| {
                let provider = Arc::clone(&self.provider);
                let wallet = Arc::clone(&self.wallet_address);
                let path = self.report_path(category);
                let handle = tokio::spawn(async move {
                    generate_report(provider.as_ref(), &wallet, category, &path).await
                });
                (category, handle)
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (category, handle) in handles {
            let result = handle
                .await
                .unwrap_or_else(|e| Err(ReportError::Task(e.to_string())))
                .map_err(|source| CategoryError { category, source });

            match &result {
                Ok(CategoryStatus::Written { path, rows }) => {
                    tracing::info!(%category, rows, path = %path.display(), "report written");
                }
                Ok(CategoryStatus::Empty) => {
                    tracing::info!(%category, wallet = %self.wallet_address, "no transactions found");
                }
                Err(e) => tracing::error!(%category, error = %e.source, "report generation failed"),
            }
            outcomes.push(CategoryOutcome { category, result });
        }

        let report = RunReport { outcomes };
        let failed = report.failures().count();
        tracing::info!(
            succeeded = report.outcomes.len() - failed,
            failed,
            "report generation finished"
        );
        report
    }
}

/// Produce the report for a single category.
///
/// # Errors
///
/// Returns the first failing stage's error; nothing is written unless the
/// response decoded and normalized cleanly.
pub async fn generate_report(
    provider: &dyn DataProvider,
    wallet_address: &str,
    category: ReportCategory,
    path: &Path,
) -> Result<CategoryStatus> {
    let tag = category.tag();
    let url = provider.build_request_url(category.action(), wallet_address);
    tracing::debug!(%category, %url, "fetching");

    let body = provider.fetch_transaction_data(&url, tag).await?;
    let envelope = Envelope::from_json(&body)?;
    if !envelope.is_ok() {
        tracing::debug!(
            %category,
            status = %envelope.status,
            message = %envelope.message,
            "explorer reported a non-OK status"
        );
    }

    let rows = normalize::normalize(category, &envelope.result)?;
    if rows.is_empty() {
        return Ok(CategoryStatus::Empty);
    }

    let written = export::write_csv(path, &rows)?;
    Ok(CategoryStatus::Written {
        path: path.to_path_buf(),
        rows: written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(category: ReportCategory) -> CategoryOutcome {
        CategoryOutcome {
            category,
            result: Err(CategoryError {
                category,
                source: ReportError::InvalidTimestamp {
                    value: "x".to_owned(),
                },
            }),
        }
    }

    fn empty(category: ReportCategory) -> CategoryOutcome {
        CategoryOutcome {
            category,
            result: Ok(CategoryStatus::Empty),
        }
    }

    #[test]
    fn all_ok_run_succeeds() {
        let report = RunReport {
            outcomes: ReportCategory::ALL.iter().map(|&c| empty(c)).collect(),
        };
        assert_eq!(report.status(), RunStatus::AllSucceeded, "status");
        assert!(report.into_result().is_ok(), "no failures");
    }

    #[test]
    fn failures_are_counted_and_first_is_in_registry_order() {
        let report = RunReport {
            outcomes: vec![
                empty(ReportCategory::ExternalTransfer),
                failed(ReportCategory::InternalTransfer),
                empty(ReportCategory::Erc20Transfer),
                failed(ReportCategory::Erc721Transfer),
            ],
        };
        assert_eq!(report.status(), RunStatus::PartiallyFailed, "status");

        let PipelineError::Failed {
            failed,
            total,
            first,
        } = report.into_result().unwrap_err();
        assert_eq!(failed, 2, "failed count");
        assert_eq!(total, 4, "total count");
        assert_eq!(first.category, ReportCategory::InternalTransfer, "first failure");
    }

    #[test]
    fn category_subset_keeps_registry_order() {
        #[derive(Debug)]
        struct Unused;

        #[async_trait::async_trait]
        impl DataProvider for Unused {
            fn build_request_url(&self, _: &str, _: &str) -> reqwest::Url {
                unreachable!("not called")
            }

            async fn fetch_transaction_data(
                &self,
                _: &reqwest::Url,
                _: &str,
            ) -> txtracker::Result<String> {
                unreachable!("not called")
            }
        }

        let pipeline = ReportPipeline::new(Arc::new(Unused), "0xw", "out").with_categories(&[
            ReportCategory::Erc721Transfer,
            ReportCategory::ExternalTransfer,
            ReportCategory::Erc721Transfer,
        ]);
        assert_eq!(
            pipeline.categories,
            [ReportCategory::ExternalTransfer, ReportCategory::Erc721Transfer],
            "filtered"
        );
        assert_eq!(
            pipeline.report_path(ReportCategory::Erc20Transfer),
            Path::new("out/0xw_erc-20_report.csv"),
            "report path"
        );
    }
}
