//! Shared text normalisation helpers for behavioural test suites.

/// Strips one layer of matching single or double quotes from a value.
#[must_use]
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if let Some(stripped) = trimmed.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
        return stripped;
    }
    if let Some(stripped) = trimmed
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
    {
        return stripped;
    }
    trimmed
}

/// Splits a quoted, comma-separated step argument into trimmed items.
///
/// Empty input yields an empty list.
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    unquote(value)
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{split_list, unquote};

    #[test]
    fn unquote_removes_single_outer_quotes() {
        assert_eq!(unquote("'value'"), "value");
        assert_eq!(unquote("\"value\""), "value");
        assert_eq!(unquote("  value  "), "value");
    }

    #[test]
    fn split_list_trims_items() {
        assert_eq!(
            split_list("\"sauce-labs-backpack, sauce-labs-bike-light\""),
            vec!["sauce-labs-backpack", "sauce-labs-bike-light"]
        );
        assert!(split_list("\"\"").is_empty());
    }
}
