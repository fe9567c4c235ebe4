//! Process-wide account table.
//!
//! The table is written once at suite start and read by every provider
//! afterwards. Later writers are rejected rather than replacing the table.

use std::sync::{Arc, OnceLock};

use camino::Utf8Path;

use crate::{FixtureError, FixtureResult};

use super::AccountTable;

static ACCOUNTS: OnceLock<Arc<AccountTable>> = OnceLock::new();

/// Install `table` as the process-wide account table.
///
/// # Errors
///
/// Returns [`FixtureError::AccountsInstalled`] when a table is already
/// installed. The existing table is left in place.
pub fn install(table: AccountTable) -> FixtureResult<Arc<AccountTable>> {
    let shared = Arc::new(table);
    ACCOUNTS.set(Arc::clone(&shared)).map_err(|_rejected| {
        tracing::warn!("ignoring second install of the account table");
        Arc::new(FixtureError::AccountsInstalled)
    })?;
    Ok(shared)
}

/// The installed process-wide table, if any.
#[must_use]
pub fn installed() -> Option<Arc<AccountTable>> {
    ACCOUNTS.get().cloned()
}

/// Return the installed table, loading and installing it from `path` first
/// when nothing is installed yet.
///
/// Once a table is installed, `path` and `account_column` are ignored. When
/// two threads race to load, both receive the table that won.
///
/// # Errors
///
/// Returns any error from [`AccountTable::load`].
pub fn get_or_load(path: &Utf8Path, account_column: &str) -> FixtureResult<Arc<AccountTable>> {
    if let Some(table) = installed() {
        return Ok(table);
    }
    let loaded = Arc::new(AccountTable::load(path, account_column)?);
    Ok(Arc::clone(ACCOUNTS.get_or_init(|| loaded)))
}
