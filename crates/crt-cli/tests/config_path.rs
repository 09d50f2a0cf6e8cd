use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("crt")
        .env("CRT_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("crt")
        .env("CRT_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("server_url ="));
    assert!(contents.contains("# WebSocket endpoint"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "# existing config").unwrap();

    cargo_bin_cmd!("crt")
        .env("CRT_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_set_url_keeps_comments() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    cargo_bin_cmd!("crt")
        .env("CRT_HOME", dir.path())
        .args(["config", "set-url", "wss://game.example.com/ws/game"])
        .assert()
        .success()
        .stdout(predicate::str::contains("wss://game.example.com/ws/game"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains(r#"server_url = "wss://game.example.com/ws/game""#));
    assert!(contents.contains("# Maximum number of submitted commands"));
}

#[test]
fn test_config_set_url_rejects_http() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("crt")
        .env("CRT_HOME", dir.path())
        .args(["config", "set-url", "http://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported server URL scheme"));
}

#[test]
fn test_config_generate_prints_defaults() {
    cargo_bin_cmd!("crt")
        .args(["config", "generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"server_url = "ws://localhost:8000/ws/game""#,
        ));
}
