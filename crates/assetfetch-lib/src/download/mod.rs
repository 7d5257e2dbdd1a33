#[allow(clippy::module_inception)]
mod download;
mod types;

pub use download::{AssetDownloader, download_all, prepare_output_dir};
pub use types::{AssetResult, DownloadOptions, DownloadOutcome, DownloadSummary, FetchError};
