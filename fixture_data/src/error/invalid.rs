//! Record failures gathered by a whole-file check.

use std::{error::Error, fmt, sync::Arc};

use super::FixtureError;
use crate::FixtureResult;

/// Every record of one fixture file that failed to materialise.
///
/// [`DataProvider::check`](crate::DataProvider::check) keeps going past a bad
/// record, so a single pass reports all of them in fixture order.
#[derive(Debug)]
pub struct InvalidRecords {
    class: String,
    errors: Vec<Arc<FixtureError>>,
}

impl InvalidRecords {
    pub(crate) fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, err: Arc<FixtureError>) {
        self.errors.push(err);
    }

    /// `Ok(value)` when nothing was collected, otherwise the collected
    /// failures as one [`FixtureError::InvalidRecords`].
    pub(crate) fn finish<T>(self, value: T) -> FixtureResult<T> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(Arc::new(FixtureError::InvalidRecords(Box::new(self))))
        }
    }

    /// Test class whose fixture was checked.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Record failures in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[Arc<FixtureError>] {
        &self.errors
    }
}

impl fmt::Display for InvalidRecords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        let noun = if count == 1 { "record" } else { "records" };
        write!(f, "fixture '{}' has {count} invalid {noun}", self.class)?;
        for err in &self.errors {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl Error for InvalidRecords {}
