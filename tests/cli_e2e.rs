//! End-to-end CLI tests for the bandcamp-dl binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::socket_guard::start_mock_server_or_skip;

fn bandcamp_dl() -> Command {
    let mut cmd = Command::cargo_bin("bandcamp-dl").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("BDL_SILENT")
        .env_remove("BDL_BASE_URL");
    cmd
}

/// Test that running without a publisher aborts with code 1.
#[test]
fn test_binary_without_parameters_exits_one() {
    bandcamp_dl()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("[Aborted] No parameters provided"));
}

/// Test that --help displays usage information and exits with code 0.
#[test]
fn test_binary_help_displays_usage() {
    bandcamp_dl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download a Bandcamp"));
}

/// Test that --version displays version and exits with code 0.
#[test]
fn test_binary_version_displays_version() {
    bandcamp_dl()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bandcamp-dl"));
}

/// Test that invalid flags exit with the usage code rather than clap's default.
#[test]
fn test_binary_invalid_flag_exits_one() {
    bandcamp_dl()
        .arg("--invalid-flag")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

/// Test that a base URL without the placeholder is rejected.
#[test]
fn test_binary_invalid_base_url_exits_one() {
    bandcamp_dl()
        .env("BDL_BASE_URL", "http://127.0.0.1:9")
        .arg("someone")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BDL_BASE_URL"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_unavailable_catalog_exits_two() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/nobody/music"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    bandcamp_dl()
        .env("BDL_BASE_URL", format!("{}/{{publisher}}", server.uri()))
        .arg("nobody")
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "unable to fetch albums for 'nobody'",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_downloads_album_and_exits_zero() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/indie-label/music"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ol><li data-bind="css: {'featured': featured()}"><a href="/album/ep-one"><p>EP One</p></a></li></ol>"#,
        ))
        .mount(&server)
        .await;
    let tralbum = format!(
        r#"{{"trackinfo":[{{"title":"Intro","file":{{"mp3-128":"{uri}/stream/intro.mp3"}}}}]}}"#
    )
    .replace('"', "&quot;");
    Mock::given(method("GET"))
        .and(path("/indie-label/album/ep-one"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<script data-tralbum="{tralbum}"></script><div id="band-name-location"><span class="title">Indie Band</span></div>"#
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stream/intro.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"intro".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    bandcamp_dl()
        .env("BDL_BASE_URL", format!("{uri}/{{publisher}}"))
        .arg("indie-label")
        .arg("--output-dir")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("[Downloaded]"));

    let written = temp_dir.path().join("Indie Band/EP One/Intro.mp3");
    assert_eq!(std::fs::read(written).unwrap(), b"intro");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_silent_env_suppresses_progress() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/quiet-label/music"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ol><li data-bind="css: {'featured': featured()}"><a href="/album/ep-one"><p>EP One</p></a></li></ol>"#,
        ))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    bandcamp_dl()
        .env("BDL_BASE_URL", format!("{}/{{publisher}}", server.uri()))
        .env("BDL_SILENT", "1")
        .arg("quiet-label")
        .arg("not-in-catalog")
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("[Fetched]").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_binary_failed_track_exits_three() {
    let Some(server) = start_mock_server_or_skip().await else {
        return;
    };
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/indie-label/music"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<ol><li data-bind="css: {'featured': featured()}"><a href="/album/ep-one"><p>EP One</p></a></li></ol>"#,
        ))
        .mount(&server)
        .await;
    let tralbum = format!(
        r#"{{"trackinfo":[{{"title":"Broken","file":{{"mp3-128":"{uri}/stream/broken.mp3"}}}},{{"title":"Fine","file":{{"mp3-128":"{uri}/stream/fine.mp3"}}}}]}}"#
    )
    .replace('"', "&quot;");
    Mock::given(method("GET"))
        .and(path("/indie-label/album/ep-one"))
        .respond_with(ResponseTemplate::new(200).set_body_string(format!(
            r#"<script data-tralbum="{tralbum}"></script><div id="band-name-location"><span class="title">Indie Band</span></div>"#
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stream/broken.mp3"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stream/fine.mp3"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fine".to_vec()))
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    bandcamp_dl()
        .env("BDL_BASE_URL", format!("{uri}/{{publisher}}"))
        .arg("indie-label")
        .arg("-o")
        .arg(temp_dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("run finished with failures"));

    let written = temp_dir.path().join("Indie Band/EP One/Fine.mp3");
    assert_eq!(std::fs::read(written).unwrap(), b"fine");
}
