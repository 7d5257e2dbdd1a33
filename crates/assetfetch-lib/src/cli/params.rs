use crate::config::{AssetEntry, ExitPolicy};
use crate::download::DownloadOptions;
use std::path::PathBuf;
use url::Url;

#[derive(Debug, Clone)]
pub struct DownloadParams {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub base_url: Url,
    pub assets: Vec<AssetEntry>,
    pub output_dir: PathBuf,
    pub options: DownloadOptions,
    pub exit_policy: ExitPolicy,
}

#[derive(Debug, Clone)]
pub struct ListParams {
    pub base_url: Url,
    pub assets: Vec<AssetEntry>,
}
