use assetfetch_lib::config::{AssetEntry, Config, ExitPolicy};
use eyre::Result;
use std::path::{Path, PathBuf};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Three assets, the middle one is missing on the server.
pub const SCENARIO_ASSETS: [(&str, &str); 3] = [
    ("logo.svg", "5e6f_logo.svg"),
    ("missing.png", "5e6f_missing.png"),
    ("form.pdf", "677d_form.pdf"),
];

pub fn create_test_config(base_url: &str, output_dir: &Path) -> Config {
    Config {
        name: Some("Test Brand".to_string()),
        icon: Some("🧪".to_string()),
        base_url: base_url.to_string(),
        output_dir: output_dir.to_path_buf(),
        timeout_secs: 5,
        exit_policy: ExitPolicy::AlwaysSucceed,
        assets: SCENARIO_ASSETS
            .iter()
            .map(|(filename, remote_path)| AssetEntry::new(*filename, *remote_path))
            .collect(),
    }
}

/// Writes `config` as a JSON manifest and returns its path.
pub fn write_manifest(dir: &Path, config: &Config) -> Result<PathBuf> {
    let manifest_path = dir.join("manifest.json");
    std::fs::write(&manifest_path, serde_json::to_string_pretty(config)?)?;
    Ok(manifest_path)
}

pub async fn mount_asset(server: &MockServer, remote_path: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/{remote_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

pub async fn mount_status(server: &MockServer, remote_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{remote_path}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serves `b"ABC"` for every scenario asset except `missing.png`, which is a 404.
pub async fn start_scenario_server() -> MockServer {
    let server = MockServer::start().await;
    for (filename, remote_path) in SCENARIO_ASSETS {
        if filename == "missing.png" {
            mount_status(&server, remote_path, 404).await;
        } else {
            mount_asset(&server, remote_path, b"ABC").await;
        }
    }
    server
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("assetfetch_lib=debug,assetfetch_e2e_tests=debug")
        .with_test_writer()
        .try_init()
        .ok();
}
