//! CLI argument parsing and validation tests — no network I/O.
//!
//! These tests verify that bad input is rejected before any cassette or live
//! adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("imagegen");
    cmd.env_remove("IMAGEGEN_REPLAY")
        .env_remove("IMAGEGEN_REC")
        .env_remove("IMAGEGEN_BASE_URL")
        .env_remove("IMAGEGEN_API_KEY")
        .env("IMAGEGEN_CONFIG", "/nonexistent/imagegen/config.toml");
    cmd
}

#[test]
fn list_examples_prints_all_four() {
    cmd()
        .arg("--list-examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. A serene mountain landscape at sunset"))
        .stdout(predicate::str::contains(
            "4. An abstract artwork with flowing colors and geometric shapes",
        ));
}

#[test]
fn example_out_of_range_exits_with_error() {
    cmd().args(["--example", "9"]).assert().failure();
}

#[test]
fn missing_service_config_exits_with_error() {
    cmd()
        .arg("a cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IMAGEGEN_BASE_URL"));
}

#[test]
fn missing_api_key_is_named() {
    cmd()
        .env("IMAGEGEN_BASE_URL", "http://127.0.0.1:9")
        .arg("a cat")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IMAGEGEN_API_KEY"));
}

#[test]
fn unreadable_config_exits_with_error() {
    let path = std::env::temp_dir().join("imagegen_cli_bad_config.toml");
    std::fs::write(&path, "service = [[[").unwrap();

    cmd()
        .args(["--config", path.to_str().unwrap(), "a cat"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));

    let _ = std::fs::remove_file(&path);
}
