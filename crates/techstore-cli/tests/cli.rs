//! Smoke tests for the binary surface. The interactive UI needs a real
//! terminal, so only the argument handling is exercised here.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_mentions_storefront() {
    Command::cargo_bin("techstore")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("terminal storefront"))
        .stdout(predicate::str::contains("--home"));
}

#[test]
fn test_version_flag() {
    Command::cargo_bin("techstore")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("techstore"));
}

#[test]
fn test_unknown_flag_fails() {
    Command::cargo_bin("techstore")
        .unwrap()
        .arg("--no-such-flag")
        .assert()
        .failure();
}
