//! Lazy sequence of materialised records for one test method.

use std::iter::{Enumerate, FusedIterator};
use std::sync::Arc;
use std::vec;

use serde_json::Value;

use crate::merge::{MergePrecedence, merge_account};
use crate::record::is_marked_excluded;
use crate::{AccountTable, FixtureError, FixtureResult, TestData};

/// Records of one test method, merged and materialised on demand.
///
/// Each call to [`Iterator::next`] merges the next raw entry with its account
/// row and converts it into a [`TestData`]. A record that fails conversion
/// yields an error for that record only; iteration continues with the next
/// one. Records marked `excludeTest` are skipped before they are merged, so a
/// skipped record is never validated. The sequence is finite and cannot be
/// restarted.
#[derive(Debug)]
pub struct Records {
    method: String,
    entries: Enumerate<vec::IntoIter<Value>>,
    accounts: Arc<AccountTable>,
    precedence: MergePrecedence,
}

impl Records {
    pub(crate) fn new(
        method: impl Into<String>,
        entries: Vec<Value>,
        accounts: Arc<AccountTable>,
        precedence: MergePrecedence,
    ) -> Self {
        Self {
            method: method.into(),
            entries: entries.into_iter().enumerate(),
            accounts,
            precedence,
        }
    }

    /// Test method the records belong to.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Like [`Iterator::next`], but also returns the record's position in
    /// the fixture list. Skipped records keep their positions, so indices may
    /// have gaps.
    pub fn next_indexed(&mut self) -> Option<(usize, FixtureResult<TestData>)> {
        loop {
            let (index, raw) = self.entries.next()?;
            if let Value::Object(map) = &raw
                && is_marked_excluded(map)
            {
                tracing::debug!(method = %self.method, index, "skipping excluded record");
                continue;
            }
            return Some((index, self.materialise(index, raw)));
        }
    }

    fn materialise(&self, index: usize, raw: Value) -> FixtureResult<TestData> {
        let wrap = |err: Arc<FixtureError>| Arc::new(FixtureError::record(&self.method, index, err));
        let Value::Object(mut map) = raw else {
            return TestData::from_value(raw).map_err(wrap);
        };
        merge_account(&mut map, &self.accounts, self.precedence);
        TestData::from_map(map).map_err(wrap)
    }
}

impl Iterator for Records {
    type Item = FixtureResult<TestData>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_indexed().map(|(_, result)| result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.entries.size_hint().1)
    }
}

impl FusedIterator for Records {}
