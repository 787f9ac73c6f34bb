//! End-to-end tests for the logwin binary.

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{logwin, numbered_lines, path_str, temp_fixture, write_log};

#[test]
fn window_prints_text_without_probe_lines() {
    let temp = TempDir::new().unwrap();
    let log = temp_fixture(&temp, "service.log");

    logwin(&temp)
        .args(["window", "--tokenizer", "approx", "--max-tokens", "60"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("==> "))
        .stdout(predicate::str::contains("--- window 1/"))
        .stdout(predicate::str::contains("payment capture failed"))
        .stdout(predicate::str::contains("healthz").not());
}

#[test]
fn window_json_reports_every_file_in_order() {
    let temp = TempDir::new().unwrap();
    let first = write_log(&temp, "first.log", &numbered_lines(40));
    let second = write_log(&temp, "second.log", &numbered_lines(5));

    let output = logwin(&temp)
        .args(["window", "--tokenizer", "approx", "--max-tokens", "50"])
        .args(["--format", "json"])
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let files = json.as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["source"], path_str(&first));
    assert_eq!(files[1]["source"], path_str(&second));
    assert_eq!(files[0]["lines"], 40);

    let windows = files[0]["windows"].as_array().unwrap();
    assert!(windows.len() > 1);
    assert_eq!(files[0]["stats"]["total_windows"], windows.len());
    for w in windows {
        assert!(w["token_count"].as_u64().unwrap() <= 50);
    }
    assert_eq!(windows[0]["start_line"], 0);
    assert_eq!(windows[windows.len() - 1]["end_line"], 39);
}

#[test]
fn window_tokens_env_var_sets_the_cap() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "app.log", &numbered_lines(30));

    let output = logwin(&temp)
        .env("WINDOW_TOKENS", "30")
        .args(["window", "--tokenizer", "approx", "--format", "json"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let windows = json[0]["windows"].as_array().unwrap();
    assert!(windows.len() >= 10);
    assert!(windows
        .iter()
        .all(|w| w["token_count"].as_u64().unwrap() <= 30));
}

#[test]
fn missing_file_warns_and_continues() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "ok.log", &numbered_lines(3));
    let missing = temp.path().join("missing.log");

    logwin(&temp)
        .args(["window", "--tokenizer", "approx"])
        .arg(&missing)
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to read log file"))
        .stdout(predicate::str::contains("(0 windows, 0 lines)"))
        .stdout(predicate::str::contains("request #2"));
}

#[test]
fn invalid_overlap_ratio_fails() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "app.log", &numbered_lines(3));

    logwin(&temp)
        .args(["window", "--overlap-ratio", "1.5"])
        .arg(&log)
        .assert()
        .failure()
        .stderr(predicate::str::contains("overlap_ratio"));
}

#[test]
fn output_flag_writes_file() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "app.log", &numbered_lines(10));
    let out = temp.path().join("windows.json");

    logwin(&temp)
        .args(["window", "--tokenizer", "approx", "--format", "json", "--output"])
        .arg(&out)
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json[0]["raw_lines"], 10);
}

#[test]
fn stats_prints_summary() {
    let temp = TempDir::new().unwrap();
    let log = temp_fixture(&temp, "service.log");

    logwin(&temp)
        .args(["stats", "--tokenizer", "approx"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("15 lines, 10 after preprocessing"))
        .stdout(predicate::str::contains("Windows:"))
        .stdout(predicate::str::contains("\"windows\"").not());
}

#[test]
fn show_prints_one_window_and_rejects_bad_index() {
    let temp = TempDir::new().unwrap();
    let log = write_log(&temp, "app.log", &numbered_lines(20));

    logwin(&temp)
        .args(["show", "--tokenizer", "approx", "--max-tokens", "40"])
        .arg(&log)
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("--- window 2/"));

    logwin(&temp)
        .args(["show", "--tokenizer", "approx"])
        .arg(&log)
        .arg("500")
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn config_init_then_show_uses_the_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.toml");

    logwin(&temp)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains(path_str(&config_path)));

    logwin(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));
    assert!(config_path.exists());

    fs::write(&config_path, "[window]\nmax_tokens = 777\n").unwrap();
    logwin(&temp)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("max_tokens = 777"))
        .stdout(predicate::str::contains("[preprocess]"));

    logwin(&temp)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn version_flag_names_the_binary() {
    let temp = TempDir::new().unwrap();
    logwin(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("logwin "));
}
