use crate::cli::DownloadParams;
use crate::download::{AssetDownloader, DownloadSummary, download_all, prepare_output_dir};
use crate::error::AssetFetchError;
use crate::report::ConsoleReport;
use std::io::Write;

pub async fn run_download<W: Write>(
    params: DownloadParams,
    out: W,
) -> Result<DownloadSummary, AssetFetchError> {
    let DownloadParams {
        name,
        icon,
        base_url,
        assets,
        output_dir,
        options,
        exit_policy,
    } = params;

    let mut report = ConsoleReport::new(out);
    report.banner(name.as_deref(), icon.as_deref())?;

    let absolute_output_dir = prepare_output_dir(&output_dir).await?;
    report.output_dir(&output_dir)?;

    tracing::info!(
        "Downloading {} assets from {} into {}",
        assets.len(),
        base_url,
        absolute_output_dir.display()
    );
    let downloader = AssetDownloader::new(base_url, absolute_output_dir, options)?;
    let summary = download_all(&downloader, &assets, &mut report).await?;

    report.summary(&summary)?;
    summary.enforce(exit_policy)?;

    Ok(summary)
}
