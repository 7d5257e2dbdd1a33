use super::types::{AssetResult, DownloadOptions, DownloadOutcome, DownloadSummary, FetchError};
use crate::config::AssetEntry;
use crate::error::AssetFetchError;
use crate::report::ConsoleReport;
use reqwest::Client;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use url::Url;

/// Fetches manifest entries one at a time and writes them into a single
/// output directory.
#[derive(Debug, Clone)]
pub struct AssetDownloader {
    client: Client,
    base_url: Url,
    output_dir: PathBuf,
    options: DownloadOptions,
}

impl AssetDownloader {
    pub fn new(
        base_url: Url,
        output_dir: impl Into<PathBuf>,
        options: DownloadOptions,
    ) -> Result<Self, AssetFetchError> {
        // The timeout covers the whole exchange, body included.
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(AssetFetchError::HttpClient)?;

        Ok(Self {
            client,
            base_url,
            output_dir: output_dir.into(),
            options,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Downloads one asset, overwriting any existing file of the same name.
    ///
    /// Network failures come back as [`DownloadOutcome::Failed`]. Only
    /// filesystem errors are returned as `Err`.
    pub async fn download_asset(
        &self,
        asset: &AssetEntry,
    ) -> Result<DownloadOutcome, AssetFetchError> {
        let body = match self.fetch(asset).await {
            Ok(body) => body,
            Err(error) => {
                warn!(filename = %asset.filename, "Download failed: {}", error);
                return Ok(DownloadOutcome::Failed { error });
            }
        };

        let path = self.output_dir.join(&asset.filename);
        tokio::fs::write(&path, &body)
            .await
            .map_err(|e| AssetFetchError::AssetWrite {
                filename: asset.filename.clone(),
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let bytes = body.len() as u64;
        info!(filename = %asset.filename, output = %path.display(), bytes, "Downloaded");
        Ok(DownloadOutcome::Downloaded { bytes, path })
    }

    async fn fetch(&self, asset: &AssetEntry) -> Result<Vec<u8>, FetchError> {
        let url = asset.url(&self.base_url)?;
        debug!(filename = %asset.filename, url = %url, "Fetching");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| self.classify(&url, e))?;
        Ok(body.to_vec())
    }

    fn classify(&self, url: &Url, source: reqwest::Error) -> FetchError {
        if source.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                timeout: self.options.timeout,
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        }
    }
}

/// Creates the output directory if needed and returns its absolute path.
pub async fn prepare_output_dir(output_dir: &Path) -> Result<PathBuf, AssetFetchError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| AssetFetchError::OutputDirectoryCreation {
            path: output_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(std::path::absolute(output_dir)?)
}

/// Downloads `assets` strictly in order, one request in flight at a time.
pub async fn download_all<W: Write>(
    downloader: &AssetDownloader,
    assets: &[AssetEntry],
    report: &mut ConsoleReport<W>,
) -> Result<DownloadSummary, AssetFetchError> {
    let mut results = Vec::with_capacity(assets.len());

    for asset in assets {
        report.asset_started(&asset.filename)?;
        let outcome = downloader.download_asset(asset).await?;
        report.asset_finished(&outcome)?;

        results.push(AssetResult {
            filename: asset.filename.clone(),
            outcome,
        });
    }

    let summary = DownloadSummary {
        output_dir: downloader.output_dir().to_path_buf(),
        results,
    };
    info!(
        succeeded = summary.success_count(),
        total = summary.total_count(),
        "Finished downloading assets"
    );
    Ok(summary)
}
