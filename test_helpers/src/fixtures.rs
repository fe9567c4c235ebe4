//! Temporary fixture trees for data-provider tests.
//!
//! A [`FixtureTree`] is a scratch directory laid out like a test-resources
//! folder: fixture documents live under `testdata/` and the accounts CSV sits
//! at the root. The directory is removed when the tree is dropped.
//!
//! # Examples
//!
//! ```
//! use fixture_data_test_helpers::fixtures::FixtureTree;
//!
//! let tree = FixtureTree::new()?;
//! tree.write_fixture("LoginTest", r#"{"loginSuccessTest": []}"#)?;
//! assert!(tree.fixture_dir().join("LoginTest.json").is_file());
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Name of the fixture sub-directory inside a [`FixtureTree`].
pub const FIXTURE_SUBDIR: &str = "testdata";

/// Name of the accounts file written by [`FixtureTree::write_accounts`].
pub const ACCOUNTS_FILE: &str = "accounts.csv";

/// Scratch directory holding fixture documents and an accounts CSV.
#[derive(Debug)]
pub struct FixtureTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl FixtureTree {
    /// Create an empty tree with its fixture sub-directory in place.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory cannot be created or its
    /// path is not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temporary fixture tree")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))?;
        std::fs::create_dir_all(root.join(FIXTURE_SUBDIR))
            .with_context(|| format!("create {FIXTURE_SUBDIR} under {root}"))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding the `<Class>.json` documents.
    #[must_use]
    pub fn fixture_dir(&self) -> Utf8PathBuf {
        self.root.join(FIXTURE_SUBDIR)
    }

    /// Path of the accounts CSV, whether or not it has been written.
    #[must_use]
    pub fn accounts_path(&self) -> Utf8PathBuf {
        self.root.join(ACCOUNTS_FILE)
    }

    /// Write the fixture document for `class`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_fixture(&self, class: &str, json: &str) -> Result<Utf8PathBuf> {
        self.write_file(&format!("{FIXTURE_SUBDIR}/{class}.json"), json)
    }

    /// Write the accounts CSV.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_accounts(&self, csv: &str) -> Result<Utf8PathBuf> {
        self.write_file(ACCOUNTS_FILE, csv)
    }

    /// Write `contents` to `relative` beneath the root.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn write_file(&self, relative: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(relative);
        std::fs::write(&path, contents).with_context(|| format!("write {path}"))?;
        Ok(path)
    }
}
