//! CSV parsing for the account table.

use camino::Utf8Path;

use crate::FixtureResult;
use crate::error::{invalid_data, parse_error};

use super::{AccountRecord, AccountTable};

/// Parse `data` as a header row followed by one row per account.
///
/// Cells are trimmed and blank lines are skipped. Every row keeps all of its
/// columns, including the key column itself.
pub(super) fn parse_accounts(
    path: &Utf8Path,
    data: &str,
    account_column: &str,
) -> FixtureResult<AccountTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());
    let headers = reader.headers().map_err(|e| parse_error(path, e))?.clone();
    let key_index = headers
        .iter()
        .position(|header| header == account_column)
        .ok_or_else(|| invalid_data(path, format!("missing account column '{account_column}'")))?;

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let cells = result.map_err(|e| parse_error(path, e))?;
        let Some(label) = cells.get(key_index).filter(|label| !label.is_empty()) else {
            return Err(invalid_data(
                path,
                format!("row {} has no '{account_column}' value", row + 1),
            ));
        };
        records.push(AccountRecord::new(label, headers.iter().zip(cells.iter())));
    }
    AccountTable::from_labelled(path, records)
}
