//! End-to-end tests for CLI exit codes.
//!
//! - Exit code 0: all files copied, or a dry run whose mapping validated
//! - Exit code 1: configuration error, validation failure, or I/O error
//! - Exit code 2: invalid command-line usage (handled by clap)

mod common;
use common::prelude::*;

/// Exit code 0 is returned for a successful copy.
#[test]
fn test_exit_code_success() {
    let fixture = TestFixture::new().with_sample_tree();
    fixture.command().assert().code(0);
}

/// Exit code 0 is returned for --help.
#[test]
fn test_exit_code_help() {
    let mut cmd = cargo_bin_cmd!("filter-directory");

    cmd.arg("--help")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("--strip-prefix"))
        .stdout(predicate::str::contains("--rename"));
}

/// Exit code 0 is returned for --version.
#[test]
fn test_exit_code_version() {
    let mut cmd = cargo_bin_cmd!("filter-directory");

    cmd.arg("--version").assert().code(0);
}

/// Exit code 1 is returned when validation rejects the mapping.
#[test]
fn test_exit_code_validation_failure() {
    let fixture = TestFixture::new().with_sample_tree();

    fixture
        .command()
        .arg("--exclude=foo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Refusing to continue due to:"));
}

/// Exit code 1 is returned for a malformed rename.
#[test]
fn test_exit_code_malformed_rename() {
    let fixture = TestFixture::new().with_sample_tree();

    fixture
        .command()
        .arg("--rename=no-separator")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no '=' separator"));
}

/// Exit code 1 is returned when the input directory does not exist.
#[test]
fn test_exit_code_missing_input() {
    let fixture = TestFixture::new();
    let mut cmd = cargo_bin_cmd!("filter-directory");

    cmd.arg(fixture.input().join("missing"))
        .arg(fixture.output())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input is not a directory"));
}

/// Exit code 1 is returned for an unparsable rules file.
#[test]
fn test_exit_code_bad_rules_file() {
    let fixture = TestFixture::new()
        .with_sample_tree()
        .with_side_file("rules.yaml", "prefix: [unclosed\n");

    fixture
        .command()
        .arg("--rules")
        .arg(fixture.side_path("rules.yaml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to load rules file"));
}

/// Exit code 2 is returned when a required directory is missing.
#[test]
fn test_exit_code_usage_error() {
    let mut cmd = cargo_bin_cmd!("filter-directory");

    cmd.arg("only-one-dir").assert().code(2);
}

/// Exit code 2 is returned for an unknown listing format.
#[test]
fn test_exit_code_bad_format() {
    let fixture = TestFixture::new().with_sample_tree();

    fixture.command().arg("--format=xml").assert().code(2);
}
