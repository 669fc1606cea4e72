//! Cell sanitization helpers for safe cleaning.

use crate::table::{Column, Value};
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Case-folded placeholder tokens that mean "no value".
pub const NULL_TOKENS: [&str; 5] = ["", "na", "n/a", "null", "none"];

static NULL_TOKEN_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NULL_TOKENS.iter().copied().collect());

/// Whether a trimmed text value is a placeholder for a missing value.
pub(crate) fn is_null_token(trimmed: &str) -> bool {
    NULL_TOKEN_SET.contains(trimmed.to_lowercase().as_str())
}

/// Trim a text cell and turn placeholder tokens into nulls.
///
/// Non-text cells are returned untouched.
pub(crate) fn sanitize_cell(value: &Value) -> Value {
    match value {
        Value::Text(text) => {
            let trimmed = text.trim();
            if is_null_token(trimmed) {
                Value::Null
            } else {
                Value::text(trimmed)
            }
        }
        other => other.clone(),
    }
}

/// Sanitize every cell of a column in place.
///
/// Returns how many cells were turned into nulls.
pub(crate) fn sanitize_text_column(column: &mut Column) -> usize {
    let mut nulled = 0;
    for value in column.values_mut().iter_mut() {
        if value.is_null() {
            continue;
        }
        let cleaned = sanitize_cell(value);
        if cleaned.is_null() {
            nulled += 1;
        }
        *value = cleaned;
    }
    nulled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_tokens_case_insensitive() {
        for token in ["", "NA", "n/A", "Null", "NONE"] {
            assert!(is_null_token(token), "{:?} should be a null token", token);
        }
        assert!(!is_null_token("nan"));
        assert!(!is_null_token("0"));
        assert!(!is_null_token("unknown"));
    }

    #[test]
    fn test_sanitize_cell_trims_and_nulls() {
        assert_eq!(sanitize_cell(&Value::text("  x ")), Value::text("x"));
        assert_eq!(sanitize_cell(&Value::text("  N/A ")), Value::Null);
        assert_eq!(sanitize_cell(&Value::text("   ")), Value::Null);
    }

    #[test]
    fn test_sanitize_cell_leaves_non_text() {
        assert_eq!(sanitize_cell(&Value::Integer(5)), Value::Integer(5));
        assert_eq!(sanitize_cell(&Value::Float(0.5)), Value::Float(0.5));
        assert_eq!(sanitize_cell(&Value::Boolean(false)), Value::Boolean(false));
    }

    #[test]
    fn test_sanitize_text_column_counts_nulls() {
        let mut column = Column::new(
            "status",
            vec![
                Value::text(" ok "),
                Value::text("none"),
                Value::Null,
                Value::text(""),
            ],
        );
        assert_eq!(sanitize_text_column(&mut column), 2);
        assert_eq!(
            column.values(),
            &[Value::text("ok"), Value::Null, Value::Null, Value::Null]
        );
    }
}
