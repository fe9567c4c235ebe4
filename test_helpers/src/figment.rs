//! Isolated working directory and environment for configuration tests.
//!
//! Configuration loading reads `fixture_data.toml` from the working directory
//! and `FIXTURE_DATA_*` variables from the process environment. Running the
//! load inside a [`figment::Jail`] confines both to the test.

use anyhow::{Result, anyhow};
use figment::Jail;

/// Runs `f` inside a [`Jail`] and returns its result.
///
/// The closure reports failures through `anyhow`, so crate errors and jail
/// setup errors alike propagate with `?`.
///
/// # Errors
///
/// Returns the closure's error, or an error when the jail cannot be set up.
pub fn in_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut Jail) -> Result<T>,
{
    let mut outcome = None;
    Jail::try_with(|jail| {
        outcome = Some(f(jail));
        Ok(())
    })
    .map_err(|err| anyhow!("jail setup failed: {err}"))?;
    outcome.ok_or_else(|| anyhow!("jail closure never ran"))?
}
