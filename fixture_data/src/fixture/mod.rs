//! Per-class JSON fixture files.
//!
//! Each test class owns one `<Class>.json` document inside the fixture
//! directory. The document maps test-method names to ordered lists of raw
//! records:
//!
//! ```json
//! {
//!   "loginSuccessTest": [{ "accountType": "standard_user" }],
//!   "loginFailureTest": [{ "accountType": "locked_out_user", "error": "locked out" }]
//! }
//! ```

mod document;
mod store;

pub use document::FixtureFile;
pub use store::FixtureStore;
