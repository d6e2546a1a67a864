//! Integration tests for the `pekanit` CLI binary.
//!
//! Argument parsing, help output, completions, local session handling and
//! a few end-to-end flows against a mock backend.
#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `pekanit` binary with env isolation.
///
/// Clears all `PEKANIT_*` env vars and points config and data directories
/// into `home` so tests never touch the user's real configuration.
fn pekanit_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("pekanit");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("PEKANIT_CONFIG", home.join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("PEKANIT_PROFILE")
        .env_remove("PEKANIT_API_URL")
        .env_remove("PEKANIT_SESSION_FILE")
        .env_remove("PEKANIT_OUTPUT")
        .env_remove("PEKANIT_INSECURE")
        .env_remove("PEKANIT_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn session_file(home: &TempDir) -> PathBuf {
    home.path().join("session.json")
}

fn write_session(file: &Path, values: &Value) {
    std::fs::write(file, serde_json::to_string_pretty(values).unwrap()).unwrap();
}

fn read_session(file: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(file).unwrap()).unwrap()
}

fn logged_in_session() -> Value {
    json!({
        "userToken": "tok-secret-123",
        "userId": "7",
        "userName": "Rina",
        "userClass": "XI-RPL-1",
        "is_ngisi": "true",
        "nomorAntrian": "A12"
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    let output = pekanit_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("Pekan IT")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("antrian"))
            .and(predicate::str::contains("kuesioner"))
            .and(predicate::str::contains("report")),
    );
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pekanit"));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .arg("nonexistent")
        .assert()
        .failure()
        .code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_for_each_shell() {
    let home = TempDir::new().unwrap();
    for shell in ["bash", "zsh", "fish"] {
        pekanit_cmd(home.path())
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::is_empty().not());
    }
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_backend_command_without_config() {
    let home = TempDir::new().unwrap();
    let output = pekanit_cmd(home.path())
        .args(["antrian", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let text = combined_output(&output);
    assert!(
        text.contains("No backend URL configured"),
        "Expected NoConfig error:\n{text}"
    );
}

#[test]
fn test_class_list_needs_no_backend() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .args(["antrian", "classes", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("XI-RPL-1").and(predicate::str::contains("X-DKV-4")));
}

#[test]
fn test_blank_nis_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    // Port 9 is never contacted: validation fails first.
    pekanit_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:9", "--session-file"])
        .arg(session_file(&home))
        .args(["login", "   "])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("NIS must not be empty"));
}

#[test]
fn test_status_without_session() {
    let home = TempDir::new().unwrap();
    let output = pekanit_cmd(home.path())
        .arg("--session-file")
        .arg(session_file(&home))
        .args(["status", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["logged_in"], json!(false));
    assert_eq!(status["route"], json!("login"));
}

#[test]
fn test_status_never_prints_the_token() {
    let home = TempDir::new().unwrap();
    let file = session_file(&home);
    write_session(&file, &logged_in_session());

    let output = pekanit_cmd(home.path())
        .arg("--session-file")
        .arg(&file)
        .args(["status", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(!combined_output(&output).contains("tok-secret-123"));

    let status: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["logged_in"], json!(true));
    assert_eq!(status["name"], json!("Rina"));
    assert_eq!(status["route"], json!("queue"));
    assert_eq!(status["queue_number"], json!("A12"));
}

#[test]
fn test_logout_clears_session_and_keeps_foreign_keys() {
    let home = TempDir::new().unwrap();
    let file = session_file(&home);
    let mut session = logged_in_session();
    session["theme"] = json!("dark");
    write_session(&file, &session);

    pekanit_cmd(home.path())
        .arg("--session-file")
        .arg(&file)
        .arg("logout")
        .assert()
        .success();

    assert_eq!(read_session(&file), json!({ "theme": "dark" }));
}

#[test]
fn test_config_path_follows_env_override() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_use_unknown_profile() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        "[profiles.default]\napi_url = \"http://localhost:8000\"\n",
    )
    .unwrap();

    let output = pekanit_cmd(home.path())
        .args(["config", "use", "staging"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("staging"), "Expected profile name in error:\n{text}");
    assert!(text.contains("default"), "Expected available profiles:\n{text}");
}

#[test]
fn test_incomplete_questionnaire_is_a_usage_error() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:9", "tamu", "--nama", "Pak Joko"])
        .args(["--tampilan-produk", "Baik"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Please rate"));
}

#[test]
fn test_unknown_rating_is_rejected() {
    let home = TempDir::new().unwrap();
    pekanit_cmd(home.path())
        .args(["--api-url", "http://127.0.0.1:9", "tamu", "--nama", "Pak Joko"])
        .args(["--hiburan", "Luar Biasa"])
        .assert()
        .failure()
        .code(2);
}

// ── Against a mock backend ──────────────────────────────────────────

async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_then_queue_number() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let file = session_file(&home);

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .and(body_json(json!({ "nis": "12345" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "token": "tok-123",
            "data": { "user_id": 7, "name": "Rina", "kelas": "XI-RPL-1" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/antrian"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/antrian/show/7"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "no_antrian": "A12" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut login = pekanit_cmd(home.path());
    login
        .args(["--api-url", server.uri().as_str(), "--session-file"])
        .arg(&file)
        .args(["login", "12345", "-o", "plain"]);
    let output = run(login).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "7");

    let stored = read_session(&file);
    assert_eq!(stored["userToken"], json!("tok-123"));
    assert_eq!(stored["is_ngisi"], json!("false"));

    // Second call is served from the cached number.
    for _ in 0..2 {
        let mut get = pekanit_cmd(home.path());
        get.args(["--api-url", server.uri().as_str(), "--session-file"])
            .arg(&file)
            .args(["antrian", "get", "-o", "plain"]);
        let output = run(get).await;
        assert!(output.status.success(), "{}", combined_output(&output));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "A12");
    }
    assert_eq!(read_session(&file)["nomorAntrian"], json!("A12"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_login_exits_with_auth_code() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "NIS tidak terdaftar"
        })))
        .mount(&server)
        .await;

    let mut login = pekanit_cmd(home.path());
    login
        .args(["--api-url", server.uri().as_str(), "--session-file"])
        .arg(session_file(&home))
        .args(["login", "99999"]);
    let output = run(login).await;
    assert_eq!(output.status.code(), Some(3));
    assert!(combined_output(&output).contains("NIS tidak terdaftar"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unrecognized_queue_payload_exits_with_queue_code() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let file = session_file(&home);
    let mut session = logged_in_session();
    session["nomorAntrian"] = json!("");
    session["userToken"] = json!("tok-123");
    write_session(&file, &session);

    Mock::given(method("POST"))
        .and(path("/api/antrian"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/antrian/show/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let mut get = pekanit_cmd(home.path());
    get.args(["--api-url", server.uri().as_str(), "--session-file"])
        .arg(&file)
        .args(["antrian", "get"]);
    let output = run(get).await;
    assert_eq!(output.status.code(), Some(9));
    assert!(combined_output(&output).contains("unrecognized response format"));
    assert_eq!(read_session(&file)["nomorAntrian"], json!(""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_list_pages_locally() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    let rows: Vec<Value> = (1..=23)
        .map(|i| {
            json!({
                "id": i,
                "nama": format!("Tamu {i}"),
                "tampilan_produk": "Baik",
                "tampilan_stand": "Baik",
                "penjelasan_produk": "Cukup",
                "hiburan": "Baik"
            })
        })
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/show/tamu"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": rows })),
        )
        .mount(&server)
        .await;

    let mut list = pekanit_cmd(home.path());
    list.args(["--api-url", server.uri().as_str(), "--session-file"])
        .arg(session_file(&home))
        .args(["report", "list", "tamu", "--page", "3", "-o", "plain"]);
    let output = run(list).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let ids: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(ids, ["21", "22", "23"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Page 3 of 3"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_writes_bytes_to_file() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    let out = home.path().join("siswa.xlsx");

    Mock::given(method("GET"))
        .and(path("/api/export-kuesioner"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04xlsx".to_vec()))
        .mount(&server)
        .await;

    let mut export = pekanit_cmd(home.path());
    export
        .args(["--api-url", server.uri().as_str(), "--session-file"])
        .arg(session_file(&home))
        .args(["report", "export", "siswa", "--out"])
        .arg(&out);
    let output = run(export).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(std::fs::read(&out).unwrap(), b"PK\x03\x04xlsx");
}
