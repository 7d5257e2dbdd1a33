use crate::error::AssetFetchError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_output_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// What the process should report when some assets could not be downloaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExitPolicy {
    /// Failures are printed but the run still succeeds.
    #[default]
    AlwaysSucceed,
    /// Any failed asset turns the run into an error.
    FailOnError,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    /// Local file name inside the output directory
    pub filename: String,
    /// Path relative to the manifest base URL
    pub remote_path: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub name: Option<String>,
    /// Glyph printed in front of the name in the banner
    #[serde(default)]
    pub icon: Option<String>,
    pub base_url: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub exit_policy: ExitPolicy,
    pub assets: Vec<AssetEntry>,
}

impl AssetEntry {
    pub fn new(filename: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            remote_path: remote_path.into(),
        }
    }

    /// Resolves the remote path against `base_url`.
    ///
    /// The remote path is appended verbatim, so percent-escapes such as `%2B`
    /// reach the server unchanged.
    pub fn url(&self, base_url: &Url) -> Result<Url, url::ParseError> {
        Url::parse(&format!(
            "{}/{}",
            base_url.as_str().trim_end_matches('/'),
            self.remote_path.trim_start_matches('/')
        ))
    }

    fn validate(&self, base_url: &Url) -> Result<(), AssetFetchError> {
        let filename = self.filename.as_str();
        if filename.is_empty() {
            return Err(AssetFetchError::ManifestValidation {
                details: format!("Asset with remote path {} has an empty filename", self.remote_path),
            });
        }
        if filename == "." || filename == ".." || filename.contains(['/', '\\']) {
            return Err(AssetFetchError::ManifestValidation {
                details: format!("Asset filename {filename} must be a plain file name"),
            });
        }
        if self.remote_path.trim_start_matches('/').is_empty() {
            return Err(AssetFetchError::ManifestValidation {
                details: format!("Asset {filename} has an empty remote path"),
            });
        }

        let url = self
            .url(base_url)
            .map_err(|e| AssetFetchError::ManifestValidation {
                details: format!("Asset {filename} does not resolve to a valid URL: {e}"),
            })?;

        let base_prefix = format!("{}/", base_url.as_str().trim_end_matches('/'));
        if !url.as_str().starts_with(&base_prefix) {
            return Err(AssetFetchError::ManifestValidation {
                details: format!("Asset {filename} resolves to {url}, which is outside {base_url}"),
            });
        }

        Ok(())
    }
}

impl Config {
    pub fn parsed_base_url(&self) -> Result<Url, AssetFetchError> {
        let url = Url::parse(&self.base_url).map_err(|e| AssetFetchError::ManifestValidation {
            details: format!("Invalid base URL {}: {}", self.base_url, e),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AssetFetchError::ManifestValidation {
                details: format!(
                    "Base URL {} must use http or https, not {}",
                    self.base_url,
                    url.scheme()
                ),
            });
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(AssetFetchError::ManifestValidation {
                details: format!(
                    "Base URL {} must not carry a query or fragment",
                    self.base_url
                ),
            });
        }

        Ok(url)
    }

    pub fn validate(&self) -> Result<(), AssetFetchError> {
        let base_url = self.parsed_base_url()?;

        if self.assets.is_empty() {
            return Err(AssetFetchError::ManifestValidation {
                details: "No assets defined in manifest".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(AssetFetchError::ManifestValidation {
                details: "timeout_secs must be greater than 0".to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.assets.len());
        for asset in &self.assets {
            asset.validate(&base_url)?;
            if !seen.insert(asset.filename.as_str()) {
                return Err(AssetFetchError::ManifestValidation {
                    details: format!("Duplicate asset filename {}", asset.filename),
                });
            }
        }

        Ok(())
    }
}
