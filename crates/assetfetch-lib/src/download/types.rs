use crate::config::{DEFAULT_TIMEOUT_SECS, ExitPolicy};
use crate::error::AssetFetchError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Why a single asset could not be fetched. Never fatal for the run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out after {}s", .timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("invalid asset URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[derive(Debug)]
pub enum DownloadOutcome {
    Downloaded { bytes: u64, path: PathBuf },
    Failed { error: FetchError },
}

impl DownloadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}

#[derive(Debug)]
pub struct AssetResult {
    pub filename: String,
    pub outcome: DownloadOutcome,
}

#[derive(Debug)]
pub struct DownloadSummary {
    /// Absolute path of the directory the assets were written to
    pub output_dir: PathBuf,
    /// One result per manifest entry, in manifest order
    pub results: Vec<AssetResult>,
}

impl DownloadSummary {
    pub fn total_count(&self) -> usize {
        self.results.len()
    }

    pub fn success_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_success())
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.total_count() - self.success_count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count() == 0
    }

    /// Turns per-asset failures into an error when the policy asks for it.
    pub fn enforce(&self, policy: ExitPolicy) -> Result<(), AssetFetchError> {
        match policy {
            ExitPolicy::FailOnError if !self.all_succeeded() => {
                Err(AssetFetchError::IncompleteDownload {
                    failed: self.failed_count(),
                    total: self.total_count(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DownloadOptions {
    pub timeout: Duration,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
