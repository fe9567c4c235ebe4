//! Constructors and classification helpers for `FixtureError`.

use std::error::Error;
use std::io;
use std::sync::Arc;

use camino::Utf8Path;

use super::FixtureError;

impl FixtureError {
    /// Construct a validation error for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_data::FixtureError;
    /// let e = FixtureError::validation("products", "expected a list of product names");
    /// assert_eq!(
    ///     e.to_string(),
    ///     "validation failed for 'products': expected a list of product names"
    /// );
    /// ```
    #[must_use]
    pub fn validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Attribute `source` to record `index` of `method`.
    #[must_use]
    pub fn record(method: impl Into<String>, index: usize, source: Arc<Self>) -> Self {
        Self::Record {
            method: method.into(),
            index,
            source,
        }
    }

    /// Returns `true` when the error, or the record failure it wraps, is a
    /// [`Self::Validation`].
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation { .. } => true,
            Self::Record { source, .. } => source.is_validation(),
            _ => false,
        }
    }
}

/// Map an I/O failure on `path` to [`FixtureError::NotFound`] or
/// [`FixtureError::Io`].
pub(crate) fn file_error(path: &Utf8Path, err: io::Error) -> Arc<FixtureError> {
    Arc::new(if err.kind() == io::ErrorKind::NotFound {
        FixtureError::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        FixtureError::Io {
            path: path.to_path_buf(),
            source: err,
        }
    })
}

/// Construct a [`FixtureError::Parse`] for `path`.
pub(crate) fn parse_error(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> Arc<FixtureError> {
    Arc::new(FixtureError::Parse {
        path: path.to_path_buf(),
        source: err.into(),
    })
}

/// Construct a [`FixtureError::Parse`] describing a well-formed document of
/// the wrong shape.
pub(crate) fn invalid_data(path: &Utf8Path, msg: impl Into<String>) -> Arc<FixtureError> {
    parse_error(path, io::Error::new(io::ErrorKind::InvalidData, msg.into()))
}
