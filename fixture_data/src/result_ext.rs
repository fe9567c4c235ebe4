//! Extensions for mapping errors to `FixtureResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `FixtureResult<T>` alias (`Result<T, Arc<FixtureError>>`).
//!
//! # Examples
//!
//! ```
//! use fixture_data::{FixtureResult, FixtureResultExt};
//! use figment::{Figment, providers::Serialized};
//!
//! fn extract() -> FixtureResult<u16> {
//!     Figment::from(Serialized::default("port", 8080)).extract_inner("port").into_fixture()
//! }
//! assert_eq!(extract().ok(), Some(8080));
//! ```

use crate::{FixtureError, FixtureResult};
use std::sync::Arc;

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<FixtureError>` into a `FixtureResult<T>`.
pub trait FixtureResultExt<T, E> {
    /// Convert `Result<T, E>` into `FixtureResult<T>` using `Into<FixtureError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<FixtureError>`.
    fn into_fixture(self) -> FixtureResult<T>;
}

impl<T, E> FixtureResultExt<T, E> for Result<T, E>
where
    E: Into<FixtureError>,
{
    fn into_fixture(self) -> FixtureResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
