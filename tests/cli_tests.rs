#![allow(clippy::unwrap_used)]

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn tagtree() -> Command {
    Command::cargo_bin("tagtree").unwrap()
}

#[test]
fn test_prints_outline() {
    tagtree()
        .arg("tests/input/catalog.xml")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("catalog: region=\"eu\" \n"))
        .stdout(predicate::str::contains("\tbook: id=\"bk101\" lang=\"en\" \n"))
        .stdout(predicate::str::contains("\t\t\tMidnight Rain\n"))
        .stdout(predicate::str::contains("more to come").not());
}

#[test]
fn test_quiet_with_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("copy.xml");

    tagtree()
        .arg("tests/input/catalog.xml")
        .arg("--quiet")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- sample catalog -->\n"));
    assert!(written.contains("<out-of-print/>"));
}

#[test]
fn test_malformed_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.xml");
    fs::write(&input, "<a><b></a>").unwrap();

    tagtree()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tag mismatch"));
}

#[test]
fn test_missing_input_fails() {
    tagtree()
        .arg("tests/input/does-not-exist.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
