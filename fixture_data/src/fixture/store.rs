//! Fixture directory access.

use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde_json::Value;

use crate::FixtureResult;
use crate::error::file_error;

use super::FixtureFile;

/// Handle on the directory holding `<Class>.json` fixture documents.
///
/// The directory is opened once as a capability, and class names are resolved
/// beneath it, so a class name such as `../Other` cannot reach files outside
/// the root. Each load reads the file afresh; nothing is cached.
pub struct FixtureStore {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FixtureStore {
    /// Open the fixture directory at `root`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::NotFound`] when `root` does not exist and
    /// [`crate::FixtureError::Io`] when it cannot be opened.
    pub fn open(root: impl AsRef<Utf8Path>) -> FixtureResult<Self> {
        let root_path = root.as_ref();
        let dir = Dir::open_ambient_dir(root_path, ambient_authority())
            .map_err(|e| file_error(root_path, e))?;
        Ok(Self {
            root: root_path.to_path_buf(),
            dir,
        })
    }

    /// Directory the store was opened on.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Path of the fixture document for `class`.
    #[must_use]
    pub fn path_for(&self, class: &str) -> Utf8PathBuf {
        self.root.join(file_name(class))
    }

    /// Read and parse the fixture document for `class`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::NotFound`] when the document is missing,
    /// [`crate::FixtureError::Io`] when it cannot be read (including class
    /// names that escape the root), and [`crate::FixtureError::Parse`] when it
    /// is malformed.
    pub fn load(&self, class: &str) -> FixtureResult<FixtureFile> {
        let name = file_name(class);
        let path = self.root.join(&name);
        let data = self
            .dir
            .read_to_string(&name)
            .map_err(|e| file_error(&path, e))?;
        FixtureFile::parse(&path, &data)
    }

    /// Raw records of `method` in the document for `class`.
    ///
    /// An empty result is re-read exactly once before being returned.
    ///
    /// # Errors
    ///
    /// Returns any error from [`FixtureStore::load`].
    pub fn load_records(&self, class: &str, method: &str) -> FixtureResult<Vec<Value>> {
        let records = self.load(class)?.into_records(method);
        if !records.is_empty() {
            return Ok(records);
        }
        tracing::debug!(class, method, "no records on first read; reading once more");
        Ok(self.load(class)?.into_records(method))
    }
}

impl fmt::Debug for FixtureStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureStore")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

fn file_name(class: &str) -> String {
    format!("{class}.json")
}
