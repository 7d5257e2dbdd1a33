use assert_fs::prelude::*;
use assetfetch_e2e_tests::{
    SCENARIO_ASSETS, create_test_config, init_tracing, mount_asset, start_scenario_server,
    write_manifest,
};
use assetfetch_lib::cli::{
    Command, DownloadParams, ManifestOverrides, ResolvedCommand, resolve_command, run_download,
    run_list,
};
use assetfetch_lib::error::AssetFetchError;
use predicates::prelude::*;
use std::path::Path;
use wiremock::MockServer;

fn build_download_params(manifest_path: &Path, overrides: ManifestOverrides) -> DownloadParams {
    let command = Command::Download {
        config_path: Some(manifest_path.to_str().unwrap().to_string()),
        overrides,
    };
    match resolve_command(command).expect("Failed to resolve download command") {
        ResolvedCommand::Download(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

#[tokio::test]
async fn test_partial_failure_reports_and_still_succeeds() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    let params = build_download_params(&manifest_path, ManifestOverrides::default());
    let mut out = Vec::new();
    let summary = run_download(params, &mut out)
        .await
        .expect("Partial failures must not fail the run by default");

    assert_eq!(summary.success_count(), 2);
    assert_eq!(summary.total_count(), 3);

    temp.child("assets/logo.svg").assert("ABC");
    temp.child("assets/form.pdf").assert("ABC");
    temp.child("assets/missing.png")
        .assert(predicate::path::missing());
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 2);

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("\n🧪 TEST BRAND - ASSET DOWNLOADER\n"));
    assert!(output.contains("📥 Downloading: logo.svg... ✅ Done (0.0 KB)"));
    assert!(output.contains("📥 Downloading: missing.png... ❌ Failed:"));
    assert!(output.contains("📊 RESULT: 2/3 files downloaded"));
    assert!(output.contains("⚠️  1 files failed"));
    assert!(output.contains(&format!(
        "📂 Files saved in: {}",
        summary.output_dir.display()
    )));
}

#[tokio::test]
async fn test_every_asset_is_attempted_in_order() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    let params = build_download_params(&manifest_path, ManifestOverrides::default());
    let summary = run_download(params, std::io::sink()).await.unwrap();

    let requested: Vec<String> = server
        .received_requests()
        .await
        .expect("Request recording should be enabled")
        .iter()
        .map(|request| request.url.path().trim_start_matches('/').to_string())
        .collect();
    let expected: Vec<String> = SCENARIO_ASSETS
        .iter()
        .map(|(_, remote_path)| remote_path.to_string())
        .collect();
    assert_eq!(requested, expected);

    let filenames: Vec<&str> = summary
        .results
        .iter()
        .map(|result| result.filename.as_str())
        .collect();
    assert_eq!(filenames, vec!["logo.svg", "missing.png", "form.pdf"]);
}

#[tokio::test]
async fn test_fail_on_error_policy_turns_failures_into_error() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    let params = build_download_params(
        &manifest_path,
        ManifestOverrides {
            fail_on_error: true,
            ..ManifestOverrides::default()
        },
    );
    let result = run_download(params, std::io::sink()).await;

    assert!(
        matches!(
            result,
            Err(AssetFetchError::IncompleteDownload {
                failed: 1,
                total: 3
            })
        ),
        "Expected an incomplete download error, got {:?}",
        result
    );
    temp.child("assets/logo.svg").assert("ABC");
    temp.child("assets/form.pdf").assert("ABC");
}

#[tokio::test]
async fn test_all_assets_downloaded() {
    init_tracing();

    let server = MockServer::start().await;
    for (_, remote_path) in SCENARIO_ASSETS {
        mount_asset(&server, remote_path, remote_path.as_bytes()).await;
    }

    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    let params = build_download_params(
        &manifest_path,
        ManifestOverrides {
            fail_on_error: true,
            ..ManifestOverrides::default()
        },
    );
    let mut out = Vec::new();
    let summary = run_download(params, &mut out).await.unwrap();

    assert!(summary.all_succeeded());
    for (filename, remote_path) in SCENARIO_ASSETS {
        temp.child(format!("assets/{filename}")).assert(remote_path);
    }

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("📊 RESULT: 3/3 files downloaded"));
    assert!(output.contains("✅ All assets downloaded successfully!"));
}

#[tokio::test]
async fn test_missing_output_directory_is_created() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("brand").join("nested");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    temp.child("brand").assert(predicate::path::missing());

    let params = build_download_params(&manifest_path, ManifestOverrides::default());
    let summary = run_download(params, std::io::sink()).await.unwrap();

    temp.child("brand/nested").assert(predicate::path::is_dir());
    assert!(summary.output_dir.is_absolute());
    assert!(summary.output_dir.ends_with("brand/nested"));
}

#[tokio::test]
async fn test_rerun_is_idempotent() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    // Stale content from an earlier run must be replaced, not appended to.
    std::fs::create_dir_all(&output_dir).unwrap();
    std::fs::write(output_dir.join("logo.svg"), b"stale logo from an older run").unwrap();

    let first = run_download(
        build_download_params(&manifest_path, ManifestOverrides::default()),
        std::io::sink(),
    )
    .await
    .unwrap();
    let logo_after_first = std::fs::read(output_dir.join("logo.svg")).unwrap();

    let second = run_download(
        build_download_params(&manifest_path, ManifestOverrides::default()),
        std::io::sink(),
    )
    .await
    .unwrap();
    let logo_after_second = std::fs::read(output_dir.join("logo.svg")).unwrap();

    assert_eq!(first.success_count(), second.success_count());
    assert_eq!(logo_after_first, b"ABC");
    assert_eq!(logo_after_first, logo_after_second);
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 2);
}

#[tokio::test]
async fn test_output_dir_override_wins_over_manifest() {
    init_tracing();

    let server = start_scenario_server().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let manifest_path = write_manifest(
        temp.path(),
        &create_test_config(&server.uri(), &temp.path().join("from-manifest")),
    )
    .unwrap();

    let override_dir = temp.path().join("from-flag");
    let params = build_download_params(
        &manifest_path,
        ManifestOverrides {
            output_dir: Some(override_dir.to_str().unwrap().to_string()),
            ..ManifestOverrides::default()
        },
    );
    run_download(params, std::io::sink()).await.unwrap();

    temp.child("from-flag/logo.svg").assert("ABC");
    temp.child("from-manifest").assert(predicate::path::missing());
}

#[tokio::test]
async fn test_list_prints_resolved_urls_without_fetching() {
    init_tracing();

    let server = MockServer::start().await;
    let temp = assert_fs::TempDir::new().unwrap();
    let output_dir = temp.path().join("assets");
    let manifest_path =
        write_manifest(temp.path(), &create_test_config(&server.uri(), &output_dir)).unwrap();

    let command = Command::List {
        config_path: Some(manifest_path.to_str().unwrap().to_string()),
        base_url: None,
    };
    let ResolvedCommand::List(params) = resolve_command(command).unwrap() else {
        panic!("Resolved command type mismatch");
    };

    let mut out = Vec::new();
    run_list(params, &mut out).unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(output.contains(&format!("logo.svg\t{}/5e6f_logo.svg", server.uri())));
    assert!(output.ends_with("3 assets\n"));
    assert!(server.received_requests().await.unwrap().is_empty());
    temp.child("assets").assert(predicate::path::missing());
}
