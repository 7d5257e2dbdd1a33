use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest validation failed: {details}")]
    ManifestValidation { details: String },

    #[error("Invalid command line arguments: {details}")]
    CliArgumentValidation { details: String },

    #[error("Output directory creation failed at {path}: {reason}")]
    OutputDirectoryCreation { path: PathBuf, reason: String },

    #[error("Failed to write asset {filename} to {path}: {reason}")]
    AssetWrite {
        filename: String,
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("{failed} of {total} assets failed to download")]
    IncompleteDownload { failed: usize, total: usize },

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
