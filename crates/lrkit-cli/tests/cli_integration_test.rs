//! End-to-end integration tests for the lrkit CLI.
//!
//! These tests invoke the compiled binary the way a user would and check what
//! it prints for each scheduler.
//!
//! @version 0.1.0
//! @author AutomataNexus Development Team

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Helpers
// =============================================================================

/// Get a Command for the lrkit binary with colors disabled
fn lrkit_cmd() -> Command {
    let mut cmd = Command::cargo_bin("lrkit").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

/// Run `preview --format json` and return the learning rate of group 0 per epoch
fn preview_json(args: &[&str]) -> Vec<f64> {
    let output = lrkit_cmd()
        .arg("preview")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "preview failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    report["epochs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["lrs"][0].as_f64().unwrap())
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn test_cli_help() {
    lrkit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("preview"));
}

#[test]
fn test_cli_version() {
    lrkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lrkit"));
}

// =============================================================================
// List
// =============================================================================

#[test]
fn test_list_quiet_prints_names_in_order() {
    lrkit_cmd()
        .args(["--quiet", "list"])
        .assert()
        .success()
        .stdout("single_step\nmulti_step\ncosine\nwarmup_multi_step\nexponential_decay\n");
}

#[test]
fn test_list_describes_schedulers() {
    lrkit_cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available schedulers"))
        .stdout(predicate::str::contains("exponential_decay"));
}

// =============================================================================
// Preview
// =============================================================================

#[test]
fn test_preview_single_step_table() {
    lrkit_cmd()
        .args([
            "preview",
            "--scheduler",
            "single_step",
            "--stepsize",
            "2",
            "--lr",
            "0.1",
            "--epochs",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("single_step"))
        .stdout(predicate::str::contains("0.10000000"))
        .stdout(predicate::str::contains("0.01000000"));
}

#[test]
fn test_preview_multi_step_json() {
    let lrs = preview_json(&[
        "--scheduler",
        "multi_step",
        "--stepsize",
        "2,4",
        "--gamma",
        "0.5",
        "--lr",
        "1.0",
        "--epochs",
        "5",
    ]);
    assert_eq!(lrs.len(), 5);
    assert_close(lrs[1], 1.0);
    assert_close(lrs[2], 0.5);
    assert_close(lrs[4], 0.25);
}

#[test]
fn test_preview_cosine_covers_max_epoch() {
    let lrs = preview_json(&["--scheduler", "cosine", "--max-epoch", "4", "--lr", "1.0"]);
    assert_eq!(lrs.len(), 5);
    assert_close(lrs[0], 1.0);
    assert_close(lrs[2], 0.5);
    assert_close(lrs[4], 0.0);
}

#[test]
fn test_preview_warmup_multi_step() {
    let lrs = preview_json(&[
        "--scheduler",
        "warmup_multi_step",
        "--stepsize",
        "[4]",
        "--warmup-epoch",
        "2",
        "--warmup-factor",
        "0.1",
        "--lr",
        "1.0",
        "--epochs",
        "5",
    ]);
    assert_close(lrs[0], 0.1);
    assert_close(lrs[1], 0.55);
    assert_close(lrs[2], 1.0);
    assert_close(lrs[4], 0.1);
}

#[test]
fn test_preview_exponential_decay() {
    let lrs = preview_json(&[
        "--scheduler",
        "exponential_decay",
        "--stepsize",
        "2",
        "--max-epoch",
        "5",
        "--gamma",
        "0.01",
        "--lr",
        "1.0",
    ]);
    assert_eq!(lrs.len(), 6);
    assert_close(lrs[1], 1.0);
    assert_close(lrs[2], 0.01_f64.powf(0.25));
    assert_close(lrs[5], 0.01);
}

#[test]
fn test_preview_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lrkit.toml");
    fs::write(
        &config_path,
        "[optimizer]\nlr = 0.2\n\n[scheduler]\nlr_scheduler = \"single_step\"\nstepsize = 1\ngamma = 0.5\n",
    )
    .unwrap();

    let lrs = preview_json(&["--config", config_path.to_str().unwrap(), "--epochs", "3"]);
    assert_close(lrs[0], 0.2);
    assert_close(lrs[1], 0.1);
    assert_close(lrs[2], 0.05);
}

// =============================================================================
// Validation Errors
// =============================================================================

#[test]
fn test_preview_unknown_scheduler() {
    lrkit_cmd()
        .args(["preview", "--scheduler", "plateau"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unsupported scheduler: plateau"))
        .stderr(predicate::str::contains("warmup_multi_step"));
}

#[test]
fn test_preview_multi_step_rejects_integer_stepsize() {
    lrkit_cmd()
        .args(["preview", "--scheduler", "multi_step", "--stepsize", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "For multi_step lr_scheduler, stepsize must be a list, but got an integer",
        ));
}

#[test]
fn test_preview_rejects_unknown_warmup_method() {
    lrkit_cmd()
        .args([
            "preview",
            "--scheduler",
            "warmup_multi_step",
            "--stepsize",
            "5,10",
            "--warmup-method",
            "cosine",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("warmup_method"));
}

#[test]
fn test_preview_rejects_float_stepsize() {
    lrkit_cmd()
        .args(["preview", "--stepsize", "2.5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a non-negative integer"));
}

#[test]
fn test_preview_rejects_too_many_epochs() {
    lrkit_cmd()
        .args(["preview", "--epochs", "18446744073709551615"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot preview"));
}

#[test]
fn test_preview_rejects_last_possible_epoch() {
    lrkit_cmd()
        .args(["preview", "--last-epoch", "18446744073709551615"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("last_epoch"));
}

#[test]
fn test_preview_exponential_decay_largest_max_epoch() {
    let lrs = preview_json(&[
        "--scheduler",
        "exponential_decay",
        "--stepsize",
        "0",
        "--max-epoch",
        "18446744073709551615",
        "--lr",
        "1.0",
        "--epochs",
        "2",
    ]);
    assert_eq!(lrs.len(), 2);
    assert_close(lrs[0], 1.0);
}

#[test]
fn test_preview_shows_optimizer_settings() {
    lrkit_cmd()
        .args(["preview", "--momentum", "0.9", "--weight-decay", "0.0005", "--epochs", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("momentum"))
        .stdout(predicate::str::contains("weight_decay"));
}

// =============================================================================
// Init
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    lrkit_cmd()
        .args(["init", "--scheduler", "exponential_decay", "--path"])
        .arg(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));

    let content = fs::read_to_string(temp_dir.path().join("lrkit.toml")).unwrap();
    assert!(content.contains("lr_scheduler = \"exponential_decay\""));
    assert!(content.contains("[optimizer]"));
    assert!(content.contains("momentum = 0.0"));
}

#[test]
fn test_init_then_preview_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    lrkit_cmd()
        .args(["--quiet", "init", "--path"])
        .arg(temp_dir.path())
        .assert()
        .success();

    let config_path = temp_dir.path().join("lrkit.toml");
    let lrs = preview_json(&["--config", config_path.to_str().unwrap(), "--epochs", "2"]);
    assert_close(lrs[0], 0.0003);
    assert_close(lrs[1], 0.00003);
}

#[test]
fn test_init_refuses_overwrite_without_force() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("lrkit.toml");
    fs::write(&config_path, "# existing").unwrap();

    lrkit_cmd()
        .args(["init", "--path"])
        .arg(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    lrkit_cmd()
        .args(["--quiet", "init", "--force", "--path"])
        .arg(temp_dir.path())
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&config_path).unwrap(), "# existing");
}
