mod loader;
mod model;

pub use loader::{DEFAULT_MANIFEST, ENV_PREFIX, load_config, load_config_with_env};
pub use model::{AssetEntry, Config, DEFAULT_TIMEOUT_SECS, ExitPolicy};
