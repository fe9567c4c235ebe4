//! Per-field extraction from a merged JSON mapping.
//!
//! Each helper removes the keys it reads, so whatever remains afterwards is
//! carried over as extra data.

use serde_json::{Map, Value};

use crate::FixtureError;

pub(super) type FieldResult<T> = Result<T, FixtureError>;

/// Remove `key` and coerce it to an optional string.
pub(super) fn take_string(map: &mut Map<String, Value>, key: &str) -> FieldResult<Option<String>> {
    map.remove(key).map_or(Ok(None), |value| scalar(key, value))
}

/// Remove every key in `keys`, keeping the first one that is set.
///
/// All aliases are removed even when an earlier one wins; each must still
/// hold a scalar.
pub(super) fn take_first_string(
    map: &mut Map<String, Value>,
    keys: &[&str],
) -> FieldResult<Option<String>> {
    let mut found = None;
    for key in keys {
        let value = take_string(map, key)?;
        if found.is_none() {
            found = value;
        }
    }
    Ok(found)
}

/// Remove `key` and read it as a flag.
pub(super) fn take_flag(map: &mut Map<String, Value>, key: &str) -> FieldResult<bool> {
    map.remove(key).map_or(Ok(false), |value| flag(key, &value))
}

/// Read `value` as a flag. Strings `"true"` and `"false"` are accepted in any
/// case; `null` and the empty string are false.
pub(super) fn flag(key: &str, value: &Value) -> FieldResult<bool> {
    match value {
        Value::Null => Ok(false),
        Value::Bool(flag) => Ok(*flag),
        Value::String(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => Err(FixtureError::validation(
                key,
                format!("expected true or false, found '{text}'"),
            )),
        },
        other => Err(FixtureError::validation(
            key,
            format!("expected a boolean, found {}", kind(other)),
        )),
    }
}

/// Remove `key` and read it as a list of trimmed names. A bare string is not
/// a list.
pub(super) fn take_list(map: &mut Map<String, Value>, key: &str) -> FieldResult<Vec<String>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(text) => Ok(text.trim().to_owned()),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(FixtureError::validation(
                    key,
                    format!("entry {index} must be a string, found {}", kind(&other)),
                )),
            })
            .collect(),
        Some(other) => Err(FixtureError::validation(
            key,
            format!("expected a list of names, found {}", kind(&other)),
        )),
    }
}

/// Remove `key` and return its object, if set.
pub(super) fn take_object(
    map: &mut Map<String, Value>,
    key: &str,
) -> FieldResult<Option<Map<String, Value>>> {
    match map.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(other) => Err(FixtureError::validation(
            key,
            format!("expected an object, found {}", kind(&other)),
        )),
    }
}

fn scalar(key: &str, value: Value) -> FieldResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(FixtureError::validation(
            key,
            format!("expected a string, found {}", kind(&other)),
        )),
    }
}

pub(super) const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
