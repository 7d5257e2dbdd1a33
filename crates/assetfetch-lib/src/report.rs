//! Human-readable progress output.
//!
//! Everything here goes to the writer handed in by the caller (stdout in the
//! binary). Diagnostics belong in `tracing`, not here.

use crate::config::AssetEntry;
use crate::download::{DownloadOutcome, DownloadSummary};
use std::io::{self, Write};
use std::path::Path;
use url::Url;

const RULE_WIDTH: usize = 60;

pub struct ConsoleReport<W: Write> {
    out: W,
}

fn format_kib(bytes: u64) -> String {
    format!("{:.1}", bytes as f64 / 1024.0)
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    pub fn banner(&mut self, name: Option<&str>, icon: Option<&str>) -> io::Result<()> {
        self.rule()?;
        if let Some(icon) = icon {
            write!(self.out, "{icon} ")?;
        }
        match name {
            Some(name) => writeln!(self.out, "{} - ASSET DOWNLOADER", name.to_uppercase())?,
            None => writeln!(self.out, "ASSET DOWNLOADER")?,
        }
        self.rule()?;
        writeln!(self.out)
    }

    pub fn output_dir(&mut self, output_dir: &Path) -> io::Result<()> {
        writeln!(self.out, "📁 Output directory: {}", output_dir.display())?;
        writeln!(self.out)
    }

    /// Starts the progress line for one asset. The line is completed by
    /// [`ConsoleReport::asset_finished`].
    pub fn asset_started(&mut self, filename: &str) -> io::Result<()> {
        write!(self.out, "📥 Downloading: {filename}... ")?;
        self.out.flush()
    }

    pub fn asset_finished(&mut self, outcome: &DownloadOutcome) -> io::Result<()> {
        match outcome {
            DownloadOutcome::Downloaded { bytes, .. } => {
                writeln!(self.out, "✅ Done ({} KB)", format_kib(*bytes))
            }
            DownloadOutcome::Failed { error } => writeln!(self.out, "❌ Failed: {error}"),
        }
    }

    pub fn summary(&mut self, summary: &DownloadSummary) -> io::Result<()> {
        writeln!(self.out)?;
        self.rule()?;
        writeln!(
            self.out,
            "📊 RESULT: {}/{} files downloaded",
            summary.success_count(),
            summary.total_count()
        )?;
        self.rule()?;

        if summary.all_succeeded() {
            writeln!(self.out, "✅ All assets downloaded successfully!")?;
        } else {
            writeln!(self.out, "⚠️  {} files failed", summary.failed_count())?;
        }

        writeln!(self.out)?;
        writeln!(
            self.out,
            "📂 Files saved in: {}",
            summary.output_dir.display()
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "💡 TIP: Make a backup of this folder!")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Prints every asset with the URL it would be fetched from.
    pub fn listing(&mut self, base_url: &Url, assets: &[AssetEntry]) -> io::Result<()> {
        for asset in assets {
            match asset.url(base_url) {
                Ok(url) => writeln!(self.out, "{}\t{}", asset.filename, url)?,
                Err(e) => writeln!(self.out, "{}\t<invalid URL: {}>", asset.filename, e)?,
            }
        }
        writeln!(self.out, "{} assets", assets.len())?;
        self.out.flush()
    }
}
