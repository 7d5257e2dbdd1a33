use super::Config;
use crate::error::AssetFetchError;
use config::Config as ConfigBuilder;

/// Manifest used when no `--config` file is given.
pub const DEFAULT_MANIFEST: &str = include_str!("default_manifest.yaml");

/// Prefix of environment variables overriding scalar manifest fields,
/// e.g. `ASSETFETCH_OUTPUT_DIR`.
pub const ENV_PREFIX: &str = "ASSETFETCH";

pub fn load_config(config_path: Option<&str>) -> Result<Config, AssetFetchError> {
    load_config_with_env(config_path, None)
}

/// Like [`load_config`], but reads overrides from `env` instead of the
/// process environment when it is `Some`.
pub fn load_config_with_env(
    config_path: Option<&str>,
    env: Option<config::Map<String, String>>,
) -> Result<Config, AssetFetchError> {
    let builder = ConfigBuilder::builder();
    let builder = match config_path {
        Some(path) => builder.add_source(config::File::with_name(path)),
        None => builder.add_source(config::File::from_str(
            DEFAULT_MANIFEST,
            config::FileFormat::Yaml,
        )),
    };

    let config: Config = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}
