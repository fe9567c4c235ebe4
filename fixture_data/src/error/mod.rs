//! Error types produced by the fixture pipeline.

mod constructors;
mod conversions;
mod invalid;
mod types;

pub use invalid::InvalidRecords;
pub use types::FixtureError;

pub(crate) use constructors::{file_error, invalid_data, parse_error};
