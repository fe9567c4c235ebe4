//! Outcome of driving a test body over every record of a method.

use std::fmt;
use std::sync::Arc;

use crate::FixtureError;

/// Why a single invocation did not pass.
#[derive(Clone, Debug)]
pub enum Failure {
    /// The record could not be materialised, so the test body never ran.
    Data {
        /// Position of the record in the fixture list.
        index: usize,
        /// Materialisation error.
        error: Arc<FixtureError>,
    },
    /// The test body ran and returned an error.
    Test {
        /// Position of the record in the fixture list.
        index: usize,
        /// Rendered error returned by the test body.
        message: String,
    },
}

impl Failure {
    /// Position of the failing record in the fixture list.
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Data { index, .. } | Self::Test { index, .. } => *index,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data { error, .. } => write!(f, "{error}"),
            Self::Test { index, message } => write!(f, "record {index} failed: {message}"),
        }
    }
}

/// Tally of one parameterised run.
#[derive(Clone, Debug, Default)]
pub struct InvocationReport {
    passed: usize,
    failures: Vec<Failure>,
}

impl InvocationReport {
    pub(crate) const fn record_pass(&mut self) {
        self.passed += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Number of invocations whose test body returned `Ok`.
    #[must_use]
    pub const fn passed(&self) -> usize {
        self.passed
    }

    /// Failures in record order.
    #[must_use]
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Number of times the test body ran.
    #[must_use]
    pub fn invocations(&self) -> usize {
        self.passed
            + self
                .failures
                .iter()
                .filter(|failure| matches!(failure, Failure::Test { .. }))
                .count()
    }

    /// Returns `true` when nothing failed. A run with no records succeeds.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
