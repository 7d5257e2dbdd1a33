use crate::cli::args::{Command, ManifestOverrides};
use crate::cli::params::{DownloadParams, ListParams};
use crate::config::{Config, ExitPolicy, load_config};
use crate::download::DownloadOptions;
use crate::error::AssetFetchError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ResolvedCommand {
    Download(DownloadParams),
    List(ListParams),
}

fn apply_overrides(
    mut config: Config,
    overrides: ManifestOverrides,
) -> Result<Config, AssetFetchError> {
    let ManifestOverrides {
        output_dir,
        base_url,
        timeout_secs,
        fail_on_error,
    } = overrides;

    if let Some(output_dir) = output_dir {
        if output_dir.is_empty() {
            return Err(AssetFetchError::CliArgumentValidation {
                details: "output-dir must not be empty.".to_string(),
            });
        }
        config.output_dir = PathBuf::from(output_dir);
    }

    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }

    if let Some(timeout_secs) = timeout_secs {
        if timeout_secs == 0 {
            return Err(AssetFetchError::CliArgumentValidation {
                details: "timeout must be greater than 0.".to_string(),
            });
        }
        config.timeout_secs = timeout_secs;
    }

    if fail_on_error {
        config.exit_policy = ExitPolicy::FailOnError;
    }

    config.validate()?;
    Ok(config)
}

pub fn resolve_command(command: Command) -> Result<ResolvedCommand, AssetFetchError> {
    match command {
        Command::Download {
            config_path,
            overrides,
        } => {
            let config = apply_overrides(load_config(config_path.as_deref())?, overrides)?;
            let base_url = config.parsed_base_url()?;

            Ok(ResolvedCommand::Download(DownloadParams {
                name: config.name,
                icon: config.icon,
                base_url,
                assets: config.assets,
                output_dir: config.output_dir,
                options: DownloadOptions {
                    timeout: Duration::from_secs(config.timeout_secs),
                },
                exit_policy: config.exit_policy,
            }))
        }
        Command::List {
            config_path,
            base_url,
        } => {
            let overrides = ManifestOverrides {
                base_url,
                ..ManifestOverrides::default()
            };
            let config = apply_overrides(load_config(config_path.as_deref())?, overrides)?;
            let base_url = config.parsed_base_url()?;

            Ok(ResolvedCommand::List(ListParams {
                base_url,
                assets: config.assets,
            }))
        }
    }
}
