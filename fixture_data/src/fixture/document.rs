//! Parsed form of a single fixture document.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use crate::FixtureResult;
use crate::error::{invalid_data, parse_error};

/// A parsed fixture document: test-method name → raw records.
///
/// Raw records are kept as JSON values; shape checks on individual records
/// happen when they are materialised so one bad record cannot hide its
/// siblings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FixtureFile {
    path: Utf8PathBuf,
    methods: Map<String, Value>,
}

impl FixtureFile {
    /// Parse `data`, read from `path`.
    ///
    /// A method mapped to `null` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::Parse`] when `data` is not valid JSON,
    /// when the top level is not an object, or when a method maps to
    /// something other than an array.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use fixture_data::FixtureFile;
    ///
    /// let file = FixtureFile::parse(
    ///     Utf8Path::new("LoginTest.json"),
    ///     r#"{"loginSuccessTest": [{"accountType": "standard_user"}]}"#,
    /// )?;
    /// assert_eq!(file.records("loginSuccessTest").map(<[_]>::len), Some(1));
    /// assert!(file.records("loginFailureTest").is_none());
    /// # Ok::<(), std::sync::Arc<fixture_data::FixtureError>>(())
    /// ```
    pub fn parse(path: &Utf8Path, data: &str) -> FixtureResult<Self> {
        let value: Value = serde_json::from_str(data).map_err(|e| parse_error(path, e))?;
        let Value::Object(methods) = value else {
            return Err(invalid_data(
                path,
                "expected a top-level object of test methods",
            ));
        };
        if let Some((method, _)) = methods
            .iter()
            .find(|(_, records)| !(records.is_array() || records.is_null()))
        {
            return Err(invalid_data(
                path,
                format!("records for '{method}' must be an array"),
            ));
        }
        Ok(Self {
            path: path.to_path_buf(),
            methods,
        })
    }

    /// Path the document was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Names of the test methods with data in this document.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods
            .iter()
            .filter(|(_, records)| records.is_array())
            .map(|(method, _)| method.as_str())
    }

    /// Raw records for `method`, or `None` when the document has no data for
    /// it.
    #[must_use]
    pub fn records(&self, method: &str) -> Option<&[Value]> {
        self.methods
            .get(method)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    /// Take the raw records for `method`, yielding an empty list when the
    /// document has no data for it.
    #[must_use]
    pub fn into_records(mut self, method: &str) -> Vec<Value> {
        if let Some(Value::Array(records)) = self.methods.remove(method) {
            return records;
        }
        tracing::info!(
            "data does not exist for key '{method}' in file {}",
            self.path
        );
        Vec::new()
    }
}
