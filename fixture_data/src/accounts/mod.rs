//! Shared account credentials keyed by account type.
//!
//! Fixture records name an account type (for example `standard_user`) rather
//! than repeating credentials. The labels resolve against a single CSV file
//! whose rows become [`AccountRecord`]s. The table is read once and never
//! mutated afterwards, so it is shared between threads behind an [`Arc`].
//!
//! [`Arc`]: std::sync::Arc

mod global;
mod parser;

use std::collections::hash_map::{Entry, HashMap};
use std::collections::BTreeMap;

use camino::Utf8Path;

use crate::FixtureResult;
use crate::error::{file_error, invalid_data};

pub use global::{get_or_load, install, installed};

/// Column that identifies the account type when none is configured.
pub const DEFAULT_ACCOUNT_COLUMN: &str = "accountType";

/// Origin named in errors for tables built from in-memory records.
const IN_MEMORY_ORIGIN: &str = "<in-memory accounts>";

/// Credential fields for one account type.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AccountRecord {
    account_type: String,
    fields: BTreeMap<String, String>,
}

impl AccountRecord {
    /// Create a record labelled `account_type` holding `fields`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_data::AccountRecord;
    ///
    /// let record = AccountRecord::new(
    ///     "standard_user",
    ///     [("username", "standard_user"), ("password", "secret_sauce")],
    /// );
    /// assert_eq!(record.get("password"), Some("secret_sauce"));
    /// ```
    #[must_use]
    pub fn new<I, K, V>(account_type: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            account_type: account_type.into(),
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Label this record is looked up by.
    #[must_use]
    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    /// Value of `field`, if the CSV row defines it.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All fields in column-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Immutable lookup table from account type to [`AccountRecord`].
#[derive(Clone, Debug, Default)]
pub struct AccountTable {
    records: HashMap<String, AccountRecord>,
}

impl AccountTable {
    /// Build a table from already-constructed records.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::Parse`] when two records share an
    /// account type, as a CSV with a repeated label would.
    pub fn from_records<I>(records: I) -> FixtureResult<Self>
    where
        I: IntoIterator<Item = AccountRecord>,
    {
        Self::from_labelled(Utf8Path::new(IN_MEMORY_ORIGIN), records)
    }

    fn from_labelled<I>(origin: &Utf8Path, records: I) -> FixtureResult<Self>
    where
        I: IntoIterator<Item = AccountRecord>,
    {
        let mut table = HashMap::new();
        for record in records {
            match table.entry(record.account_type().to_owned()) {
                Entry::Occupied(entry) => {
                    return Err(invalid_data(
                        origin,
                        format!("account type '{}' appears more than once", entry.key()),
                    ));
                }
                Entry::Vacant(entry) => {
                    entry.insert(record);
                }
            }
        }
        Ok(Self { records: table })
    }

    /// Read the accounts CSV at `path`, keyed by the `account_column` header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::NotFound`] or
    /// [`crate::FixtureError::Io`] when the file cannot be read, and
    /// [`crate::FixtureError::Parse`] when the CSV is malformed, lacks the key
    /// column or repeats an account type.
    pub fn load(path: &Utf8Path, account_column: &str) -> FixtureResult<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
        let table = parser::parse_accounts(path, &data, account_column)?;
        tracing::info!(path = %path, accounts = table.len(), "loaded account table");
        Ok(table)
    }

    /// Parse CSV text already held in memory. `origin` names the source in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::Parse`] under the same conditions as
    /// [`AccountTable::load`].
    pub fn parse(origin: &Utf8Path, data: &str, account_column: &str) -> FixtureResult<Self> {
        parser::parse_accounts(origin, data, account_column)
    }

    /// Look up the record for `account_type` by exact match.
    #[must_use]
    pub fn get(&self, account_type: &str) -> Option<&AccountRecord> {
        self.records.get(account_type)
    }

    /// Number of account types in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the table holds no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over the known account types in no particular order.
    pub fn account_types(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests;
