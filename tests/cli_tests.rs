//! Command-line behaviour of the `stagecopy` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn stagecopy() -> Command {
    Command::cargo_bin("stagecopy").expect("binary built")
}

#[test]
fn test_cli_copies_and_prints_destination() {
    let tmp = TempDir::new().expect("create tempdir");
    let src = tmp.path().join("report.csv");
    fs::write(&src, b"a,b\n").expect("write source");
    let out = tmp.path().join("out");

    stagecopy()
        .arg(&src)
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::ends_with("report.csv\n"));

    assert_eq!(fs::read(out.join("report.csv")).expect("read copy"), b"a,b\n");
}

#[test]
fn test_cli_missing_source_fails_fast_with_zero_delay() {
    let tmp = TempDir::new().expect("create tempdir");

    stagecopy()
        .arg(tmp.path().join("ghost.csv"))
        .arg(tmp.path().join("out"))
        .args(["--probe-attempts", "2", "--probe-delay", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Source not found"))
        .stderr(predicate::str::contains("2 check(s)"));

    assert!(!tmp.path().join("out").exists());
}

#[test]
fn test_cli_reads_config_file() {
    let tmp = TempDir::new().expect("create tempdir");
    let config = tmp.path().join("stagecopy.toml");
    fs::write(&config, "[probe]\nattempts = 1\ndelay_secs = 0\n").expect("write config");

    stagecopy()
        .arg(tmp.path().join("ghost.csv"))
        .arg(tmp.path().join("out"))
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 check(s)"));
}

#[test]
fn test_cli_rejects_bad_config() {
    let tmp = TempDir::new().expect("create tempdir");
    let src = tmp.path().join("report.csv");
    fs::write(&src, b"x").expect("write source");

    stagecopy()
        .arg(&src)
        .arg(tmp.path().join("out"))
        .args(["--transfer-attempts", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("transfer attempts must be at least 1"));
}

#[test]
fn test_cli_timeout_cancels_slow_probe() {
    let tmp = TempDir::new().expect("create tempdir");

    stagecopy()
        .arg(tmp.path().join("ghost.csv"))
        .arg(tmp.path().join("out"))
        .args(["--probe-attempts", "3", "--probe-delay", "60", "--timeout", "0.1"])
        .timeout(std::time::Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cancelled"));
}
