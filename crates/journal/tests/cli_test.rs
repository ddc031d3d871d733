//! Integration tests for the `journal` CLI binary.
//!
//! Argument parsing, help output, shell completions and error exit codes
//! run without network access. The end-to-end cases point the binary at a
//! wiremock server through the hidden `--api-url` / `--oauth-url` flags.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `journal` binary with env isolation.
///
/// Clears all `JOURNAL_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn journal_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("journal");
    cmd.env("HOME", "/tmp/journal-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/journal-cli-test-nonexistent")
        .env_remove("JOURNAL_PROFILE")
        .env_remove("JOURNAL_CLIENT_ID")
        .env_remove("JOURNAL_CLIENT_SECRET")
        .env_remove("JOURNAL_REGION")
        .env_remove("JOURNAL_LOCALE")
        .env_remove("JOURNAL_OUTPUT")
        .env_remove("JOURNAL_TIMEOUT")
        .env_remove("JOURNAL_API_URL")
        .env_remove("JOURNAL_OAUTH_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = journal_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    journal_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("expansions")
            .and(predicate::str::contains("instances"))
            .and(predicate::str::contains("encounters"))
            .and(predicate::str::contains("browse")),
    );
}

#[test]
fn test_version_flag() {
    journal_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("journal"));
}

#[test]
fn test_invalid_subcommand() {
    journal_cmd()
        .arg("raid-lockouts")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    journal_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    journal_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef journal"));
}

#[test]
fn test_completions_fish() {
    journal_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete -c journal"));
}

// ── Local commands ──────────────────────────────────────────────────

#[test]
fn test_locales_table() {
    journal_cmd()
        .arg("locales")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("ko_KR")
                .and(predicate::str::contains("한국어"))
                .and(predicate::str::contains("en_US")),
        );
}

#[test]
fn test_locales_plain() {
    let output = journal_cmd().args(["locales", "-o", "plain"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().next(), Some("ko_KR"));
    assert_eq!(stdout.lines().count(), 11);
}

#[test]
fn test_auth_status_without_credentials() {
    journal_cmd()
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("not configured").and(predicate::str::contains("static-kr")),
        );
}

#[test]
fn test_auth_status_json_reports_flag_secret() {
    let output = journal_cmd()
        .args([
            "--client-id",
            "abc",
            "--client-secret",
            "shh",
            "--region",
            "eu",
            "auth",
            "status",
            "-o",
            "json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["configured"], true);
    assert_eq!(status["namespace"], "static-eu");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("shh"));
}

#[test]
fn test_config_path_prints_location() {
    journal_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Error exit codes ────────────────────────────────────────────────

#[test]
fn test_missing_credentials_exit_code() {
    journal_cmd()
        .args(["expansions", "list"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_bad_locale_is_usage_error() {
    journal_cmd()
        .args(["-L", "xx_XX", "expansions", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("locale"));
}

#[test]
fn test_unknown_profile_is_usage_error() {
    journal_cmd()
        .args(["--profile", "nope", "expansions", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn test_missing_expansion_flag() {
    journal_cmd()
        .args(["instances", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--expansion"));
}

// ── End to end against a mock API ───────────────────────────────────

async fn mock_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 86_399
        })))
        .mount(&server)
        .await;
    server
}

fn against(server: &MockServer, args: &[&str]) -> assert_cmd::Command {
    let mut cmd = journal_cmd();
    cmd.args([
        "--client-id",
        "client-id",
        "--client-secret",
        "client-secret",
        "--api-url",
        &server.uri(),
        "--oauth-url",
        &format!("{}/oauth/token", server.uri()),
    ])
    .args(args);
    cmd
}

async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expansions_list_plain() {
    let server = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-expansion/index"))
        .and(query_param("namespace", "static-kr"))
        .and(query_param("locale", "ko_KR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tiers": [
                { "id": 68, "name": "오리지널" },
                { "id": 70, "name": "불타는 성전" }
            ]
        })))
        .mount(&server)
        .await;

    let output = run(against(&server, &["expansions", "list", "-o", "plain"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "68\n70");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_encounter_not_found_exit_code() {
    let server = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-encounter/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": 404,
            "type": "BLZWEBAPI00000404",
            "detail": "Not Found"
        })))
        .mount(&server)
        .await;

    let output = run(against(&server, &["encounters", "show", "5"])).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_credentials_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Invalid client or Invalid client credentials"
        })))
        .mount(&server)
        .await;

    let output = run(against(&server, &["auth", "check"])).await;
    assert_eq!(output.status.code(), Some(3), "{}", combined_output(&output));
}

async fn mount_instance(server: &MockServer, id: u64, name: &str, expansion: u64, kind: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/data/wow/journal-instance/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": id,
            "name": name,
            "expansion": { "id": expansion },
            "category": { "type": kind },
            "encounters": []
        })))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn test_instances_list_groups_and_filters_by_kind() {
    let server = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-instance/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances": [{ "id": 741 }, { "id": 63 }, { "id": 745 }, { "id": 230 }]
        })))
        .mount(&server)
        .await;
    mount_instance(&server, 741, "Molten Core", 68, "RAID").await;
    mount_instance(&server, 63, "Deadmines", 68, "DUNGEON").await;
    mount_instance(&server, 745, "Karazhan", 70, "RAID").await;
    mount_instance(&server, 230, "Blackrock Depths", 68, "DUNGEON").await;

    // Dungeons come before raids; index order holds inside each group.
    let output = run(against(&server, &["instances", "list", "-e", "68", "-o", "plain"])).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "63\n230\n741");

    let output = run(against(
        &server,
        &["instances", "list", "-e", "68", "--kind", "raid", "-o", "plain"],
    ))
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "741");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_encounter_abilities_only() {
    let server = mock_api().await;
    Mock::given(method("GET"))
        .and(path("/data/wow/journal-encounter/89"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 89,
            "name": "Glubtok",
            "instance": { "id": 63, "name": "Deadmines" },
            "sections": [
                {
                    "id": 1,
                    "title": "Stage One",
                    "sections": [
                        { "id": 2, "title": "Blink", "spell": { "id": 87925, "name": "Blink" } },
                        { "id": 3, "title": "Overview" }
                    ]
                },
                { "id": 4, "title": "Arcane Power", "spell": { "id": 88009, "name": "Arcane Power" } }
            ]
        })))
        .mount(&server)
        .await;

    let output = run(against(
        &server,
        &["encounters", "show", "89", "--abilities-only", "-o", "plain"],
    ))
    .await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "87925\n88009");

    let output = run(against(
        &server,
        &["encounters", "show", "89", "--abilities-only", "-o", "json"],
    ))
    .await;
    let abilities: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let titles: Vec<&str> = abilities
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Blink", "Arcane Power"]);
}
