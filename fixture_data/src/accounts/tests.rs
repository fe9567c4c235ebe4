//! Unit tests for account CSV parsing and lookup.

use camino::Utf8Path;
use rstest::{fixture, rstest};

use super::{AccountRecord, AccountTable, DEFAULT_ACCOUNT_COLUMN};
use crate::FixtureError;

const ACCOUNTS_CSV: &str = "\
accountType,username,password
standard_user,standard_user,secret_sauce
locked_out_user, locked_out_user , secret_sauce
";

#[fixture]
fn table() -> AccountTable {
    AccountTable::parse(Utf8Path::new("accounts.csv"), ACCOUNTS_CSV, DEFAULT_ACCOUNT_COLUMN)
        .unwrap_or_else(|err| panic!("accounts parse: {err}"))
}

#[rstest]
fn parses_rows_keyed_by_account_type(table: AccountTable) {
    assert_eq!(table.len(), 2);
    let record = table
        .get("standard_user")
        .unwrap_or_else(|| panic!("standard_user missing"));
    assert_eq!(record.get("username"), Some("standard_user"));
    assert_eq!(record.get("password"), Some("secret_sauce"));
    assert_eq!(record.get(DEFAULT_ACCOUNT_COLUMN), Some("standard_user"));
}

#[rstest]
fn trims_cells(table: AccountTable) {
    let record = table
        .get("locked_out_user")
        .unwrap_or_else(|| panic!("locked_out_user missing"));
    assert_eq!(record.get("username"), Some("locked_out_user"));
}

#[rstest]
fn lookup_is_exact(table: AccountTable) {
    assert!(table.get("Standard_User").is_none());
    assert!(table.get("standard_user ").is_none());
}

#[test]
fn custom_key_column() {
    let csv = "type,username,password\nproblem_user,problem_user,secret_sauce\n";
    let table = AccountTable::parse(Utf8Path::new("accounts.csv"), csv, "type")
        .unwrap_or_else(|err| panic!("accounts parse: {err}"));
    let record = table
        .get("problem_user")
        .unwrap_or_else(|| panic!("problem_user missing"));
    assert_eq!(record.account_type(), "problem_user");
    assert_eq!(record.get("type"), Some("problem_user"));
}

#[test]
fn skips_blank_lines() {
    let csv = "accountType,password\n\nstandard_user,secret_sauce\n\n";
    let table = AccountTable::parse(Utf8Path::new("accounts.csv"), csv, DEFAULT_ACCOUNT_COLUMN)
        .unwrap_or_else(|err| panic!("accounts parse: {err}"));
    assert_eq!(table.len(), 1);
}

#[rstest]
#[case::missing_key_column("username,password\nbob,pw\n", "missing account column")]
#[case::duplicate_label(
    "accountType,password\nstandard_user,a\nstandard_user,b\n",
    "appears more than once"
)]
#[case::empty_label("accountType,password\n,a\n", "has no 'accountType' value")]
#[case::ragged_row("accountType,password\nstandard_user,a,extra\n", "")]
fn rejects_malformed_csv(#[case] csv: &str, #[case] fragment: &str) {
    let err = AccountTable::parse(Utf8Path::new("accounts.csv"), csv, DEFAULT_ACCOUNT_COLUMN)
        .expect_err("malformed CSV must fail");
    assert!(
        matches!(err.as_ref(), FixtureError::Parse { .. }),
        "expected Parse, got {err:?}"
    );
    assert!(err.to_string().contains(fragment), "message was: {err}");
}

#[test]
fn from_records_rejects_duplicates() {
    let result = AccountTable::from_records([
        AccountRecord::new("standard_user", [("password", "a")]),
        AccountRecord::new("standard_user", [("password", "b")]),
    ]);
    let err = result.expect_err("duplicate labels must fail");
    assert!(
        matches!(err.as_ref(), FixtureError::Parse { path, .. } if path == "<in-memory accounts>"),
        "expected Parse, got {err:?}"
    );
    assert!(err.to_string().contains("'standard_user' appears more than once"), "{err}");
}

#[test]
fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("accounts.csv"))
        .unwrap_or_else(|path| panic!("non UTF-8 temp path {}", path.display()));
    let err = AccountTable::load(&path, DEFAULT_ACCOUNT_COLUMN).expect_err("missing CSV");
    assert!(matches!(err.as_ref(), FixtureError::NotFound { .. }));
}
