//! Test helpers shared across crates in the `fixture_data` workspace.
//!
//! Provides temporary fixture trees, a `figment::Jail` wrapper, `tracing`
//! capture and small text helpers for behavioural step definitions.

pub mod figment;
pub mod fixtures;
pub mod logs;
pub mod text;
