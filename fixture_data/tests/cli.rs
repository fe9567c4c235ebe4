//! Command-line tests for the `fixture-data` binary.

use assert_cmd::Command;
use rstest::{fixture, rstest};
use test_helpers::fixtures::FixtureTree;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data");

/// Runs `fixture-data` against `fixture_dir` and `accounts`, isolated from
/// the caller's logging and configuration environment.
fn fixture_data(fixture_dir: &str, accounts: &str) -> Command {
    #[expect(
        deprecated,
        reason = "cargo_bin is the standard assert_cmd API for workspace binaries"
    )]
    let mut cmd = Command::cargo_bin("fixture-data").expect("binary should exist");
    cmd.env_remove("RUST_LOG")
        .env_remove("FIXTURE_DATA_CONFIG_PATH")
        .env("RUST_BACKTRACE", "0")
        .args(["--fixture-dir", fixture_dir, "--accounts", accounts]);
    cmd
}

fn sample_data() -> Command {
    fixture_data(DATA_DIR, &format!("{DATA_DIR}/accounts.csv"))
}

#[fixture]
fn workdir() -> FixtureTree {
    FixtureTree::new().expect("create scratch directory")
}

#[rstest]
fn show_prints_one_json_line_per_record(workdir: FixtureTree) {
    let output = sample_data()
        .current_dir(workdir.root())
        .args(["show", "LoginTest", "loginSuccessTest"])
        .output()
        .expect("run fixture-data");
    assert!(output.status.success(), "{output:?}");
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is JSON"))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["username"], "standard_user");
    assert_eq!(lines[1]["password"], "secret_sauce");
}

#[rstest]
fn show_reports_invalid_records_and_fails(workdir: FixtureTree) {
    workdir
        .write_fixture(
            "CheckoutTest",
            r#"{"checkoutTest": [{"products": {"name": "x"}}, {"accountType": "standard_user"}]}"#,
        )
        .expect("write fixture");
    let accounts = format!("{DATA_DIR}/accounts.csv");
    let output = fixture_data(workdir.fixture_dir().as_str(), &accounts)
        .current_dir(workdir.root())
        .args(["show", "CheckoutTest", "checkoutTest"])
        .output()
        .expect("run fixture-data");
    assert!(!output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("stdout is UTF-8");
    let mut lines = stdout.lines();
    let first: serde_json::Value =
        serde_json::from_str(lines.next().expect("error line")).expect("error line is JSON");
    assert_eq!(first["index"], 0);
    assert!(
        first["error"]
            .as_str()
            .is_some_and(|e| e.contains("products"))
    );
    let second: serde_json::Value =
        serde_json::from_str(lines.next().expect("record line")).expect("record line is JSON");
    assert_eq!(second["username"], "standard_user");
}

#[rstest]
fn check_counts_valid_records(workdir: FixtureTree) {
    sample_data()
        .current_dir(workdir.root())
        .args(["check", "LoginTest"])
        .assert()
        .success()
        .stdout("LoginTest: 5 records ok\n");
}

#[rstest]
fn check_fails_for_missing_fixture(workdir: FixtureTree) {
    sample_data()
        .current_dir(workdir.root())
        .args(["check", "NoSuchTest"])
        .assert()
        .failure();
}

#[rstest]
fn missing_accounts_file_is_an_error(workdir: FixtureTree) {
    fixture_data(DATA_DIR, "missing.csv")
        .current_dir(workdir.root())
        .args(["check", "LoginTest"])
        .assert()
        .failure();
}
