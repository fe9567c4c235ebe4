//! Parameterised test data from JSON fixtures and a shared accounts CSV.
//!
//! Each test class owns a JSON document mapping test-method names to lists of
//! records. Records may name an `accountType`, whose credentials are merged in
//! from a single CSV file shared by every class. The merged records are
//! materialised as [`TestData`] and handed to the test one invocation at a
//! time.
//!
//! ```no_run
//! use fixture_data::{DataProvider, ProviderConfig};
//!
//! # fn main() -> Result<(), std::sync::Arc<fixture_data::FixtureError>> {
//! let provider = DataProvider::from_config(&ProviderConfig::load()?)?;
//! for record in provider.records("LoginTest", "loginSuccessTest")? {
//!     let data = record?;
//!     println!("logging in as {:?}", data.username());
//! }
//! # Ok(())
//! # }
//! ```

pub mod accounts;
pub mod config;
mod error;
pub mod fixture;
pub mod merge;
pub mod provider;
pub mod record;
mod result_ext;

use std::sync::Arc;

pub use accounts::{AccountRecord, AccountTable};
pub use config::{ConfigOverrides, ProviderConfig};
pub use error::{FixtureError, InvalidRecords};
pub use fixture::{FixtureFile, FixtureStore};
pub use merge::MergePrecedence;
pub use provider::{DataProvider, Failure, InvocationReport, Records};
pub use record::{CustomerInfo, TestData};
pub use result_ext::FixtureResultExt;

/// Result alias for fixture operations.
///
/// Errors are shared behind an [`Arc`] so a record failure can live both in
/// an iterator item and in the report that outlives it.
pub type FixtureResult<T> = Result<T, Arc<FixtureError>>;
