//! Typed test records built from merged fixture mappings.
//!
//! Conversion is explicit: every declared field is read by name, given a
//! default and type-checked on its own. A value that cannot be coerced fails
//! with [`FixtureError::Validation`] naming the offending key. Keys that are
//! not declared fields are kept verbatim in [`TestData::extras`].
//!
//! `userName` and `expectedError` are aliases of `username` and `error`.
//! [`canonicalise_keys`] folds them into the canonical key, so the account
//! merge and materialisation both see one key per field.

mod coerce;

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{FixtureError, FixtureResult};

use coerce::{
    FieldResult, flag, kind, take_first_string, take_flag, take_list, take_object, take_string,
};

/// Fixture key marking a record that must not run.
pub const EXCLUDE_KEY: &str = "excludeTest";

/// Declared fields with more than one spelling: the canonical key, then every
/// accepted spelling in order of preference.
const FIELD_ALIASES: [(&str, &[&str]); 2] = [
    ("username", &["userName", "username"]),
    ("error", &["error", "expectedError"]),
];

/// Canonical key for the field spelled `key`, or `key` itself when it is not
/// an alias.
///
/// # Examples
///
/// ```
/// use fixture_data::record::canonical_key;
///
/// assert_eq!(canonical_key("userName"), "username");
/// assert_eq!(canonical_key("expectedError"), "error");
/// assert_eq!(canonical_key("password"), "password");
/// ```
#[must_use]
pub fn canonical_key(key: &str) -> &str {
    FIELD_ALIASES
        .iter()
        .find(|(_, spellings)| spellings.contains(&key))
        .map_or(key, |(canonical, _)| *canonical)
}

/// Rename aliased keys in `map` to their canonical key.
///
/// When a field is spelled more than one way, the value under the preferred
/// spelling is kept and the others are dropped. A `null` value counts as
/// unset, so a later spelling may still supply the field.
pub fn canonicalise_keys(map: &mut Map<String, Value>) {
    for (canonical, spellings) in FIELD_ALIASES {
        let mut kept = None;
        for spelling in spellings {
            let value = map.remove(*spelling);
            if kept.is_none() {
                kept = value.filter(|value| !value.is_null());
            }
        }
        if let Some(value) = kept {
            map.insert(canonical.to_owned(), value);
        }
    }
}

/// Whether the raw record `map` is marked excluded.
///
/// Only [`EXCLUDE_KEY`] is inspected, so the rest of the record need not be
/// valid. A value that is not a recognisable flag does not exclude the
/// record; materialising it then reports the bad value.
#[must_use]
pub fn is_marked_excluded(map: &Map<String, Value>) -> bool {
    map.get(EXCLUDE_KEY)
        .is_some_and(|value| matches!(flag(EXCLUDE_KEY, value), Ok(true)))
}

/// Customer details entered at checkout.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
}

impl CustomerInfo {
    /// Build customer details from their parts.
    #[must_use]
    pub const fn new(
        first_name: Option<String>,
        last_name: Option<String>,
        postal_code: Option<String>,
    ) -> Self {
        Self {
            first_name,
            last_name,
            postal_code,
        }
    }

    fn from_map(mut map: Map<String, Value>) -> FieldResult<Self> {
        let info = Self {
            first_name: take_string(&mut map, "firstName").map_err(nested)?,
            last_name: take_string(&mut map, "lastName").map_err(nested)?,
            postal_code: take_first_string(&mut map, &["postalCode", "zipCode"])
                .map_err(nested)?,
        };
        if !map.is_empty() {
            tracing::debug!(
                ignored = ?map.keys().collect::<Vec<_>>(),
                "ignoring unknown customerInfo keys"
            );
        }
        Ok(info)
    }

    /// Customer's first name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Customer's last name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Postal or ZIP code.
    #[must_use]
    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }
}

fn nested(err: FixtureError) -> FixtureError {
    match err {
        FixtureError::Validation { key, message } => {
            FixtureError::validation(format!("customerInfo.{key}"), message)
        }
        other => other,
    }
}

/// One materialised fixture record, consumed by a single test invocation.
///
/// Serialises back to the fixture's camelCase keys with unset fields omitted,
/// so a record can be printed or compared as JSON.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestData {
    #[serde(skip_serializing_if = "Option::is_none")]
    account_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    products: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_info: Option<CustomerInfo>,
    #[serde(rename = "excludeTest", skip_serializing_if = "std::ops::Not::not")]
    exclude: bool,
    #[serde(flatten)]
    extras: Map<String, Value>,
}

impl TestData {
    /// Materialise a record from a merged mapping.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Validation`] naming the first key whose value
    /// cannot be coerced to its declared type.
    ///
    /// # Examples
    ///
    /// ```
    /// use fixture_data::TestData;
    /// use serde_json::json;
    ///
    /// let data = TestData::from_value(json!({
    ///     "accountType": "standard_user",
    ///     "userName": "standard_user",
    ///     "products": [" sauce-labs-backpack "],
    /// }))?;
    /// assert_eq!(data.username(), Some("standard_user"));
    /// assert_eq!(data.products(), ["sauce-labs-backpack"]);
    /// # Ok::<(), std::sync::Arc<fixture_data::FixtureError>>(())
    /// ```
    pub fn from_map(mut map: Map<String, Value>) -> FixtureResult<Self> {
        canonicalise_keys(&mut map);
        Self::read_fields(&mut map)
            .map(|data| Self { extras: map, ..data })
            .map_err(Arc::new)
    }

    /// Materialise a record from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::Validation`] when `value` is not an object or
    /// when [`TestData::from_map`] rejects it.
    pub fn from_value(value: Value) -> FixtureResult<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(Arc::new(FixtureError::validation(
                "record",
                format!("expected an object, found {}", kind(&other)),
            ))),
        }
    }

    fn read_fields(map: &mut Map<String, Value>) -> FieldResult<Self> {
        Ok(Self {
            account_type: take_string(map, "accountType")?,
            username: take_string(map, "username")?,
            password: take_string(map, "password")?,
            error: take_string(map, "error")?,
            products: take_list(map, "products")?,
            customer_info: take_object(map, "customerInfo")?
                .map(CustomerInfo::from_map)
                .transpose()?,
            exclude: take_flag(map, EXCLUDE_KEY)?,
            extras: Map::new(),
        })
    }

    /// Account type the record asked for.
    #[must_use]
    pub fn account_type(&self) -> Option<&str> {
        self.account_type.as_deref()
    }

    /// Login name, usually merged in from the accounts CSV.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Login password, usually merged in from the accounts CSV.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Error message the test expects to see.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Products to add to the cart, in fixture order.
    #[must_use]
    pub fn products(&self) -> &[String] {
        &self.products
    }

    /// Checkout details, if the record has them.
    #[must_use]
    pub const fn customer_info(&self) -> Option<&CustomerInfo> {
        self.customer_info.as_ref()
    }

    /// Whether the record is marked `excludeTest`.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.exclude
    }

    /// Keys that are not declared fields, with their raw values.
    #[must_use]
    pub const fn extras(&self) -> &Map<String, Value> {
        &self.extras
    }

    /// Raw value of the undeclared key `key`.
    #[must_use]
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extras.get(key)
    }
}
