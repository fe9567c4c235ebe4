//! Feed fixture records to parameterised tests.
//!
//! [`DataProvider`] ties the pieces together: it loads a class's fixture
//! document, merges each record with the shared account table and hands
//! materialised [`TestData`] to the caller one record at a time.
//!
//! ```no_run
//! use fixture_data::{DataProvider, ProviderConfig};
//!
//! # fn main() -> Result<(), std::sync::Arc<fixture_data::FixtureError>> {
//! let provider = DataProvider::from_config(&ProviderConfig::load()?)?;
//! let report = provider.run("LoginTest", "loginSuccessTest", |data| {
//!     if data.password().is_some() {
//!         Ok(())
//!     } else {
//!         Err("no password for account")
//!     }
//! })?;
//! assert!(report.is_success());
//! # Ok(())
//! # }
//! ```

mod records;
mod report;

use std::fmt::Display;
use std::sync::Arc;

use crate::merge::MergePrecedence;
use crate::{AccountTable, FixtureResult, FixtureStore, InvalidRecords, ProviderConfig, TestData};

pub use records::Records;
pub use report::{Failure, InvocationReport};

/// Source of [`TestData`] for test classes sharing one fixture directory and
/// one account table.
///
/// A provider is `Send + Sync`; every call reads its fixture afresh, so
/// concurrent calls do not interfere.
#[derive(Debug)]
pub struct DataProvider {
    store: FixtureStore,
    accounts: Arc<AccountTable>,
    precedence: MergePrecedence,
}

impl DataProvider {
    /// Create a provider over `store` using `accounts` with the default
    /// [`MergePrecedence`].
    #[must_use]
    pub fn new(store: FixtureStore, accounts: Arc<AccountTable>) -> Self {
        Self {
            store,
            accounts,
            precedence: MergePrecedence::default(),
        }
    }

    /// Use `precedence` to settle keys present in both a record and its
    /// account row.
    #[must_use]
    pub fn with_precedence(mut self, precedence: MergePrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    /// Build a provider from configuration.
    ///
    /// The account table comes from [`crate::accounts::get_or_load`], so the
    /// first provider built in a process loads and installs it and later
    /// providers share it.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::NotFound`](crate::FixtureError::NotFound) when
    /// the fixture directory or the accounts CSV is missing, and any parse
    /// error from the CSV.
    pub fn from_config(config: &ProviderConfig) -> FixtureResult<Self> {
        let store = FixtureStore::open(&config.fixture_dir)?;
        let accounts = crate::accounts::get_or_load(&config.accounts_csv, &config.account_column)?;
        Ok(Self::new(store, accounts).with_precedence(config.merge_precedence))
    }

    /// Fixture directory the provider reads.
    #[must_use]
    pub const fn store(&self) -> &FixtureStore {
        &self.store
    }

    /// Shared account table.
    #[must_use]
    pub const fn accounts(&self) -> &Arc<AccountTable> {
        &self.accounts
    }

    /// Policy used for colliding keys.
    #[must_use]
    pub const fn precedence(&self) -> MergePrecedence {
        self.precedence
    }

    /// Lazily materialised records for `method` of `class`.
    ///
    /// An absent method yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns a not-found, I/O or parse [`FixtureError`](crate::FixtureError)
    /// when the fixture document cannot be loaded.
    /// Per-record failures surface as items of the returned iterator.
    pub fn records(&self, class: &str, method: &str) -> FixtureResult<Records> {
        let entries = self.store.load_records(class, method)?;
        Ok(self.sequence(method, entries))
    }

    /// Run `test` once per record of `method` and tally the outcomes.
    ///
    /// A record that cannot be materialised is reported as a
    /// [`Failure::Data`] and the test body is not called for it. An absent
    /// method runs nothing and yields an empty, successful report.
    ///
    /// # Errors
    ///
    /// Returns an error only when the fixture document cannot be loaded.
    pub fn run<F, E>(&self, class: &str, method: &str, mut test: F) -> FixtureResult<InvocationReport>
    where
        F: FnMut(TestData) -> Result<(), E>,
        E: Display,
    {
        let mut records = self.records(class, method)?;
        let mut report = InvocationReport::default();
        while let Some((index, result)) = records.next_indexed() {
            match result {
                Ok(data) => match test(data) {
                    Ok(()) => report.record_pass(),
                    Err(err) => report.record_failure(Failure::Test {
                        index,
                        message: err.to_string(),
                    }),
                },
                Err(error) => report.record_failure(Failure::Data { index, error }),
            }
        }
        tracing::debug!(
            class,
            method,
            passed = report.passed(),
            failed = report.failures().len(),
            "finished parameterised run"
        );
        Ok(report)
    }

    /// Materialise every record of every method in the fixture for `class`.
    ///
    /// Returns the number of records that materialised, excluded records not
    /// counted.
    ///
    /// # Errors
    ///
    /// Returns the load error when the document cannot be read, or
    /// [`FixtureError::InvalidRecords`](crate::FixtureError::InvalidRecords)
    /// listing every record that fails to materialise.
    pub fn check(&self, class: &str) -> FixtureResult<usize> {
        let file = self.store.load(class)?;
        let mut valid = 0;
        let mut invalid = InvalidRecords::new(class);
        for method in file.methods() {
            let entries = file.records(method).map(<[_]>::to_vec).unwrap_or_default();
            for result in self.sequence(method, entries) {
                match result {
                    Ok(_) => valid += 1,
                    Err(err) => invalid.push(err),
                }
            }
        }
        invalid.finish(valid)
    }

    fn sequence(&self, method: &str, entries: Vec<serde_json::Value>) -> Records {
        Records::new(method, entries, Arc::clone(&self.accounts), self.precedence)
    }
}
