//! Integration tests for the plankr binary.
//!
//! These exercise argument parsing and the commands that work without a
//! configured platform. Each test points HOME at a fresh tempdir so no
//! real `~/.plankr` state leaks in.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn plankr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("plankr").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("PLANKR_URL")
        .env_remove("PLANKR_API_KEY")
        .env_remove("PLANKR_TOKEN")
        .env_remove("PLANKR_USER")
        .env_remove("PLANKR_NAME");
    cmd
}

#[test]
fn help_describes_the_tool() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plank timer"));
}

#[test]
fn version_flag_works() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("plankr"));
}

#[test]
fn completions_bash_emits_a_script() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("plankr"));
}

#[test]
fn completions_rejects_unknown_shell() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown shell"));
}

#[test]
fn log_rejects_malformed_duration() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["log", "ninety"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse duration"));
}

#[test]
fn log_rejects_zero_duration() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["log", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zero-second"));
}

#[test]
fn log_rejects_malformed_date() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["log", "90", "--date", "June 14th"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not parse date"));
}

#[test]
fn timer_rejects_unknown_mode() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["timer", "--mode", "sideways", "--no-tui"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown timer mode"));
}

#[test]
fn sync_status_and_retry_failed_conflict() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["sync", "--status", "--retry-failed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn config_path_points_into_home() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));
}

#[test]
fn config_init_writes_a_starter_file() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    assert!(home.path().join(".plankr/config.yaml").exists());

    // A second init must refuse to overwrite.
    plankr(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn config_show_prints_defaults() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_mode"));
}

#[test]
fn sync_without_queue_reports_nothing_to_do() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to sync"));
}

#[test]
fn stats_without_platform_config_fails_cleanly() {
    let home = TempDir::new().unwrap();
    plankr(&home)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
