//! Merge account credentials into raw fixture records.
//!
//! A record that names an `accountType` receives the fields of the matching
//! [`AccountRecord`](crate::AccountRecord). Keys present on both sides are
//! settled by a [`MergePrecedence`]; keys present on one side only are merged
//! identically under either policy. An unknown account type leaves the record
//! as it was.
//!
//! Field aliases are folded before keys are compared, so a fixture's
//! `userName` and an account row's `username` collide as the same field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AccountTable;
use crate::record::{canonical_key, canonicalise_keys};

/// Fixture key naming the account whose credentials a record wants.
pub const ACCOUNT_TYPE_KEY: &str = "accountType";

/// Which side wins when a fixture record and an account row share a key.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePrecedence {
    /// The account row is merged last, overwriting colliding fixture values.
    #[default]
    AccountWins,
    /// Fixture values are kept; only keys the record lacks are added.
    FixtureWins,
}

/// What [`merge_account`] did to a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
    /// The record does not name an account type.
    NoAccountType,
    /// The named account was found and its fields merged.
    Merged {
        /// Account type that was resolved.
        account_type: String,
    },
    /// The named account is not in the table; the record is unchanged.
    Missing {
        /// Account type that failed to resolve.
        account_type: String,
    },
}

/// Merge the account named by `record["accountType"]` into `record`.
///
/// The label may be a string, number or boolean; numbers and booleans are
/// matched by their string form. Any other value cannot name an account and
/// is reported as [`MergeOutcome::Missing`].
///
/// Aliased keys in `record` are renamed to their canonical key first, and
/// account fields are inserted under their canonical key, so precedence holds
/// whichever spelling each side uses.
///
/// # Examples
///
/// ```
/// use fixture_data::merge::{MergeOutcome, MergePrecedence, merge_account};
/// use fixture_data::{AccountRecord, AccountTable};
/// use serde_json::json;
///
/// let accounts = AccountTable::from_records([AccountRecord::new(
///     "standard_user",
///     [("username", "standard_user"), ("password", "secret_sauce")],
/// )])?;
/// let mut record = serde_json::Map::new();
/// record.insert("accountType".to_owned(), json!("standard_user"));
/// let outcome = merge_account(&mut record, &accounts, MergePrecedence::AccountWins);
/// assert!(matches!(outcome, MergeOutcome::Merged { .. }));
/// assert_eq!(record["password"], "secret_sauce");
/// # Ok::<(), std::sync::Arc<fixture_data::FixtureError>>(())
/// ```
pub fn merge_account(
    record: &mut Map<String, Value>,
    accounts: &AccountTable,
    precedence: MergePrecedence,
) -> MergeOutcome {
    canonicalise_keys(record);
    let Some(raw) = record.get(ACCOUNT_TYPE_KEY) else {
        return MergeOutcome::NoAccountType;
    };
    let account_type = match raw {
        Value::String(label) => label.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => {
            tracing::debug!(value = %other, "account type is not a scalar; skipping merge");
            return MergeOutcome::Missing {
                account_type: other.to_string(),
            };
        }
    };
    let Some(account) = accounts.get(&account_type) else {
        tracing::debug!(account_type, "no account row for account type");
        return MergeOutcome::Missing { account_type };
    };
    for (field, value) in account.fields() {
        let field = canonical_key(field);
        match precedence {
            MergePrecedence::AccountWins => {
                record.insert(field.to_owned(), Value::String(value.to_owned()));
            }
            MergePrecedence::FixtureWins => {
                record
                    .entry(field)
                    .or_insert_with(|| Value::String(value.to_owned()));
            }
        }
    }
    MergeOutcome::Merged { account_type }
}
