//! Primary error enum for fixture loading, merging and materialisation.

use std::sync::Arc;

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

use super::invalid::InvalidRecords;

/// Errors that can occur while providing test data.
///
/// A missing account type is deliberately absent: an unresolved lookup leaves
/// the record untouched and is only logged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixtureError {
    /// A fixture file, accounts CSV or fixture directory does not exist.
    #[error("file not found: '{path}'")]
    NotFound {
        /// Path that could not be located.
        path: Utf8PathBuf,
    },

    /// Reading a file failed for a reason other than absence.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// Path that triggered the failure.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON, CSV or TOML document is malformed or has the wrong shape.
    #[error("failed to parse '{path}': {source}")]
    Parse {
        /// Path of the malformed document.
        path: Utf8PathBuf,
        /// Underlying parser error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A fixture record cannot be coerced into [`crate::TestData`].
    #[error("validation failed for '{key}': {message}")]
    Validation {
        /// Record key that failed validation.
        key: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// A failure attributed to a single record of a fixture method.
    #[error("record {index} of '{method}': {source}")]
    Record {
        /// Test method the record belongs to.
        method: String,
        /// Zero-based position of the record in the fixture list.
        index: usize,
        /// Failure raised while materialising the record.
        #[source]
        source: Arc<FixtureError>,
    },

    /// Configuration layers could not be gathered or extracted.
    #[error("failed to gather configuration: {0}")]
    Config(#[from] Box<FigmentError>),

    /// The process-wide account table was installed more than once.
    #[error("the process-wide account table is already installed")]
    AccountsInstalled,

    /// A whole-file check found one or more records that fail to materialise.
    #[error("{0}")]
    InvalidRecords(Box<InvalidRecords>),
}
