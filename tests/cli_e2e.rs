//! End-to-end tests of the `www` binary against a scratch config file and a
//! local mock of the Slack API.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tempfile::TempDir;

struct Env {
    _dir: TempDir,
    config: PathBuf,
}

impl Env {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(".wwwconf");
        Self { _dir: dir, config }
    }

    fn www(&self) -> Command {
        let mut cmd = Command::cargo_bin("www").unwrap();
        cmd.env("WWW_CONFIG", &self.config).env_remove("RUST_LOG");
        cmd
    }

    fn config_json(&self) -> serde_json::Value {
        let raw = std::fs::read_to_string(&self.config).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

/// `www` with stdin attached to /dev/null, i.e. nothing piped in.
fn www_without_input(config: &Path, args: &[&str]) -> std::process::Command {
    let mut cmd = std::process::Command::cargo_bin("www").unwrap();
    cmd.env("WWW_CONFIG", config)
        .env_remove("RUST_LOG")
        .args(args)
        .stdin(Stdio::null());
    cmd
}

#[test]
fn first_run_posts_and_remembers_token() {
    let env = Env::new();
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/chat.postMessage")
        .match_header("authorization", "Bearer abc")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "channel": "#general",
            "text": "hello",
            "username": "www",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": true}"#)
        .expect(2)
        .create();

    env.www()
        .args(["slack", "--channel", "general", "--token", "abc"])
        .args(["--api-url", &server.url()])
        .write_stdin("hello")
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Posted to #general"));

    assert_eq!(
        env.config_json(),
        serde_json::json!({"slack": {"token": "abc"}})
    );

    // Second run: token comes from the config file.
    env.www()
        .args(["slack", "--channel", "general", "--api-url", &server.url()])
        .write_stdin("hello")
        .assert()
        .success();

    mock.assert();
    assert_eq!(
        env.config_json(),
        serde_json::json!({"slack": {"token": "abc"}})
    );
}

#[test]
fn unknown_provider_fails_without_touching_config() {
    let env = Env::new();

    env.www()
        .arg("unknown-provider")
        .write_stdin("hello")
        .assert()
        .code(67)
        .stderr(predicate::str::contains("Invalid provider: unknown-provider"));

    assert!(!env.config.exists());
}

#[test]
fn missing_channel_is_reported_before_any_send() {
    let env = Env::new();
    let seeded = r#"{"slack":{"token":"abc"}}"#;
    std::fs::write(&env.config, seeded).unwrap();

    env.www()
        .arg("slack")
        .write_stdin("hello")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("Channel required."));

    assert_eq!(std::fs::read_to_string(&env.config).unwrap(), seeded);
}

#[test]
fn not_set_up_points_at_setup() {
    let env = Env::new();

    env.www()
        .args(["slack", "--channel", "general"])
        .write_stdin("hello")
        .assert()
        .code(78)
        .stderr(predicate::str::contains("www setup slack"));
}

#[test]
fn no_piped_input_is_a_usage_error_and_still_saves() {
    let env = Env::new();

    www_without_input(&env.config, &["slack", "--channel", "general", "--token", "abc"])
        .assert()
        .code(64)
        .stderr(predicate::str::contains("No input"));

    assert_eq!(
        env.config_json(),
        serde_json::json!({"slack": {"token": "abc"}})
    );
}

#[test]
fn failed_delivery_exits_with_delivery_code() {
    let env = Env::new();
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/chat.postMessage")
        .with_status(200)
        .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
        .create();

    env.www()
        .args(["slack", "--channel", "nowhere", "--token", "abc"])
        .args(["--api-url", &server.url()])
        .write_stdin("hello")
        .assert()
        .code(69)
        .stderr(predicate::str::contains("channel_not_found"));

    assert_eq!(
        env.config_json(),
        serde_json::json!({"slack": {"token": "abc"}})
    );
}

#[test]
fn no_provider_prints_usage() {
    let env = Env::new();

    env.www()
        .assert()
        .code(64)
        .stderr(predicate::str::contains("Providers: gist, gmail, s3, slack"));
}

#[test]
fn provider_help_exits_zero() {
    let env = Env::new();

    env.www()
        .args(["slack", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--channel"));
}

#[test]
fn bad_provider_flag_is_a_usage_error() {
    let env = Env::new();

    env.www()
        .args(["gist", "--channel", "x"])
        .write_stdin("hello")
        .assert()
        .code(64);
}

#[test]
fn providers_lists_destinations() {
    let env = Env::new();
    std::fs::write(&env.config, r#"{"gist":{"token":"t"}}"#).unwrap();

    env.www()
        .arg("providers")
        .assert()
        .success()
        .stdout(predicate::str::contains("gist"))
        .stdout(predicate::str::contains("(configured)"))
        .stdout(predicate::str::contains("gmail"))
        .stdout(predicate::str::contains("s3"))
        .stdout(predicate::str::contains("slack"));
}

#[test]
fn setup_of_unknown_provider_is_rejected() {
    let env = Env::new();

    env.www()
        .args(["setup", "myspace"])
        .assert()
        .code(67);

    assert!(!env.config.exists());
}

#[test]
fn version_flag_succeeds() {
    Env::new()
        .www()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("www "));
}
