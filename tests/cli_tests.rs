//! Command-line behaviour of the `correspond` binary
//!
//! Covers exit status, text and JSON reports, stdin input and rejection of
//! invalid input or relations.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_json(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn correspond() -> Command {
    Command::cargo_bin("correspond").unwrap()
}

#[test]
fn test_exact_success() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", r#"["foot", "barn"]"#);
    let expected = write_json(&dir, "expected.json", r#"["bar", "foo"]"#);

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&expected)
        .args(["--relation", "starts-with"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("OK: exact (starts-with)"));
}

#[test]
fn test_exact_failure_exits_one() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", r#"["foot", "barn", "gallon"]"#);
    let expected = write_json(&dir, "expected.json", r#"["foot", "barn"]"#);

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&expected)
        .args(["--relation", "starts-with"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Not true that <[foot, barn, gallon]> contains exactly one element that starts with \
             each element of <[foot, barn]>. It has unexpected elements <[gallon]>",
        ));
}

#[test]
fn test_exact_null_element_reports_first_exception() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", r#"["foot", "barn", null]"#);
    let expected = write_json(&dir, "expected.json", r#"["foot", "barn"]"#);

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&expected)
        .args(["--relation", "starts-with"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("It has unexpected elements <[null]>"))
        .stdout(predicate::str::contains(
            "first exception: compare(null, foot) threw AbsentOperand",
        ));
}

#[test]
fn test_exact_in_order() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", r#"["feet", "barns", "gallons"]"#);
    let ordered = write_json(&dir, "ordered.json", "[4, 5, 7]");
    let shuffled = write_json(&dir, "shuffled.json", "[4, 7, 5]");

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&ordered)
        .args(["--relation", "length", "--in-order"])
        .assert()
        .success();

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&shuffled)
        .args(["--relation", "length"])
        .assert()
        .success();

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&shuffled)
        .args(["--relation", "length", "--in-order"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "The elements correspond, but not in the expected order",
        ))
        .stdout(predicate::str::contains("first out-of-order position: #2: <barns>"));
}

#[test]
fn test_exact_reads_actual_from_stdin() {
    let dir = TempDir::new().unwrap();
    let expected = write_json(&dir, "expected.json", r#"["FOO", "Bar"]"#);

    correspond()
        .args(["exact", "-"])
        .arg(&expected)
        .args(["--relation", "ignoring-case"])
        .write_stdin(r#"["bar", "foo"]"#)
        .assert()
        .success();
}

#[test]
fn test_contains_with_tolerance() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", "[1.02, 2.04, 3.08]");

    correspond()
        .arg("contains")
        .arg(&actual)
        .arg("2.0")
        .args(["--relation", "tolerance:0.05"])
        .assert()
        .success();

    correspond()
        .arg("contains")
        .arg(&actual)
        .arg("3.01")
        .args(["--relation", "tolerance:0.05"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Not true that <[1.02, 2.04, 3.08]> contains at least one element that is a finite \
             number within 0.05 of <3.01>",
        ));
}

#[test]
fn test_compare_json_output() {
    let output = correspond()
        .args(["compare", "barn", "foo", "--relation", "starts-with", "--format", "json"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["command"], "compare");
    assert_eq!(report["relation"], "starts-with");
    assert_eq!(report["passed"], false);
    assert_eq!(
        report["failure"]["facts"][0]["key"],
        "Not true that <barn> is an element that starts with <foo>"
    );
}

#[test]
fn test_compare_success_json_has_no_failure() {
    let output = correspond()
        .args(["--format", "json", "compare", "2.04", "2", "-r", "tolerance:0.05"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["passed"], true);
    assert_eq!(report["relation"], "tolerance:0.05");
    assert!(report.get("failure").is_none());
}

#[test]
fn test_unknown_relation_is_rejected() {
    correspond()
        .args(["compare", "a", "b", "--relation", "sounds-like"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown relation: sounds-like"));
}

#[test]
fn test_negative_tolerance_is_rejected() {
    correspond()
        .args(["compare", "1.0", "2.0", "--relation", "tolerance:-0.05"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("tolerance (-0.05) cannot be negative"));
}

#[test]
fn test_non_array_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let actual = write_json(&dir, "actual.json", r#"{"a": 1}"#);
    let expected = write_json(&dir, "expected.json", "[1]");

    correspond()
        .arg("exact")
        .arg(&actual)
        .arg(&expected)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Expected a JSON array but found an object"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let expected = write_json(&dir, "expected.json", "[1]");

    correspond()
        .arg("exact")
        .arg(dir.path().join("missing.json"))
        .arg(&expected)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read Actual"));
}

#[test]
fn test_both_inputs_from_stdin_is_an_error() {
    correspond()
        .args(["exact", "-", "-"])
        .write_stdin("[]")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Only one of ACTUAL and EXPECTED"));
}
