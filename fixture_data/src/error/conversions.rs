//! Trait-based conversions between external error types and `FixtureError`.

use figment::Error as FigmentError;

use super::FixtureError;

impl From<FigmentError> for FixtureError {
    fn from(e: FigmentError) -> Self {
        Self::Config(e.into())
    }
}
