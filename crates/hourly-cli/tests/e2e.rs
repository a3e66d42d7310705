use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn cli_help_includes_usage() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hourly"));

    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("timesheet"));
}

#[test]
fn timesheet_help_lists_subcommands() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("hourly"));

    cmd.args(["timesheet", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("list"));
}
