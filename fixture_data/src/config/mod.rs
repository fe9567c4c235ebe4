//! Layered configuration for [`DataProvider`](crate::DataProvider).
//!
//! Sources are merged with `figment`, later layers winning:
//!
//! 1. built-in defaults;
//! 2. a TOML file named by `FIXTURE_DATA_CONFIG_PATH`, or `fixture_data.toml`
//!    in the working directory when that exists;
//! 3. environment variables prefixed `FIXTURE_DATA_`;
//! 4. explicit [`ConfigOverrides`], usually from the command line.
//!
//! ```toml
//! fixture_dir = "tests/data"
//! accounts_csv = "tests/data/accounts.csv"
//! account_column = "type"
//! merge_precedence = "fixture_wins"
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::accounts::DEFAULT_ACCOUNT_COLUMN;
use crate::error::{file_error, parse_error};
use crate::merge::MergePrecedence;
use crate::{FixtureResult, FixtureResultExt};

/// Prefix of environment variables read as configuration.
pub const ENV_PREFIX: &str = "FIXTURE_DATA_";

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "FIXTURE_DATA_CONFIG_PATH";

/// File read from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "fixture_data.toml";

/// Where fixtures and accounts live and how they are merged.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Directory holding `<Class>.json` fixture documents.
    pub fixture_dir: Utf8PathBuf,
    /// Path of the accounts CSV.
    pub accounts_csv: Utf8PathBuf,
    /// CSV header naming the account-type column.
    pub account_column: String,
    /// Policy for keys present in both a record and its account row.
    pub merge_precedence: MergePrecedence,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            fixture_dir: Utf8PathBuf::from("src/test/resources/testdata"),
            accounts_csv: Utf8PathBuf::from("src/test/resources/accounts.csv"),
            account_column: DEFAULT_ACCOUNT_COLUMN.to_owned(),
            merge_precedence: MergePrecedence::default(),
        }
    }
}

/// Values that override every other configuration layer.
///
/// Unset fields leave the lower layers in place.
#[derive(Args, Clone, Debug, Default, Serialize)]
pub struct ConfigOverrides {
    /// Directory holding the fixture documents.
    #[arg(long = "fixture-dir", value_name = "DIR", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_dir: Option<Utf8PathBuf>,
    /// Accounts CSV to merge into records.
    #[arg(long = "accounts", value_name = "CSV", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accounts_csv: Option<Utf8PathBuf>,
    /// CSV column holding the account type.
    #[arg(long = "account-column", value_name = "NAME", global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_column: Option<String>,
}

impl ProviderConfig {
    /// Load configuration from the default file, the environment and the
    /// defaults.
    ///
    /// # Errors
    ///
    /// See [`ProviderConfig::load_from`].
    pub fn load() -> FixtureResult<Self> {
        Self::load_from(None, &ConfigOverrides::default())
    }

    /// Load configuration, reading the TOML file at `config_path` when given.
    ///
    /// An explicit path, from the argument or from `FIXTURE_DATA_CONFIG_PATH`,
    /// must exist. The default `fixture_data.toml` is skipped when absent.
    ///
    /// # Errors
    ///
    /// Returns [`crate::FixtureError::NotFound`] when an explicit file is
    /// missing, [`crate::FixtureError::Parse`] when the file is not valid TOML
    /// and [`crate::FixtureError::Config`] when the merged values do not fit
    /// [`ProviderConfig`].
    pub fn load_from(
        config_path: Option<&Utf8Path>,
        overrides: &ConfigOverrides,
    ) -> FixtureResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = resolve_config_path(config_path) {
            figment = figment.merge(toml_layer(&path)?);
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config_path"]))
            .merge(Serialized::defaults(overrides))
            .extract()
            .into_fixture()
    }
}

/// Choose the configuration file to read, if any.
fn resolve_config_path(explicit: Option<&Utf8Path>) -> Option<Utf8PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(Utf8PathBuf::from(path.to_string_lossy().into_owned()));
    }
    let fallback = Utf8PathBuf::from(DEFAULT_CONFIG_FILE);
    fallback.is_file().then_some(fallback)
}

fn toml_layer(path: &Utf8Path) -> FixtureResult<figment::providers::Data<Toml>> {
    let data = std::fs::read_to_string(path).map_err(|e| file_error(path, e))?;
    toml::from_str::<toml::Value>(&data).map_err(|e| parse_error(path, e))?;
    tracing::info!(path = %path, "using configuration file");
    Ok(Toml::string(&data))
}
