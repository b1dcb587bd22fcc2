//! Integration tests for CLI commands.
//!
//! These run without network access or an API key: with no key every
//! translation degrades to the original text before any request is made.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

/// Get a Command for the bhasha binary using a private config file
fn bhasha(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bhasha").unwrap();
    cmd.env_remove("SARVAM_API_KEY")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config);
    cmd
}

#[test]
fn test_help_command() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Multilingual chat"))
        .stdout(predicate::str::contains("translate"))
        .stdout(predicate::str::contains("languages"))
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bhasha"));
}

#[test]
fn test_languages_lists_locales() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("hi-IN"))
        .stdout(predicate::str::contains("od-IN"))
        .stdout(predicate::str::contains("தமிழ்"));
}

#[test]
fn test_config_show_creates_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    bhasha(&path)
        .args(["config", "--show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("api.sarvam.ai"))
        .stdout(predicate::str::contains("batch_size = 10"))
        .stdout(predicate::str::contains("mode = \"formal\""));
    assert!(path.exists());
}

#[test]
fn test_config_update() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    bhasha(&path)
        .args(["config", "--language", "ta", "--mode", "code-mixed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated"));

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("default_language = \"ta\""));
    assert!(contents.contains("mode = \"code-mixed\""));
}

#[test]
fn test_config_rejects_invalid_language() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .args(["config", "--language", "fr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fr"));
}

#[test]
fn test_translate_without_key_returns_original() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .args(["translate", "Hi", "--to", "hi"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Hi\n"))
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn test_translate_same_language() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .args(["translate", "Hello", "--to", "en"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Hello\n"));
}

#[test]
fn test_translate_unknown_language() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .args(["translate", "Hello", "--to", "xx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language"));
}

#[test]
fn test_chat_session() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .arg("chat")
        .write_stdin("Hello there\n/lang hi\n/history\n/new\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bhasha Chat"))
        .stdout(predicate::str::contains("you: Hello there"))
        .stdout(predicate::str::contains("bot: This is a sample response"))
        .stdout(predicate::str::contains("Hello there (Today)"));
}

#[test]
fn test_chat_lang_without_code_lists_languages() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .arg("chat")
        .write_stdin("/lang\n/quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Select language"))
        .stdout(predicate::str::contains("ਪੰਜਾਬੀ"));
}

#[test]
fn test_chat_rejects_unknown_language() {
    let dir = tempdir().unwrap();
    bhasha(&dir.path().join("config.toml"))
        .args(["chat", "--language", "xx"])
        .write_stdin("/quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language 'xx'"));
}
