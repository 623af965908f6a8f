//! Reusable value checks
//!
//! These predicates inspect raw JSON payload values. Guards combine them with
//! the client-facing message for their resource.

use serde_json::Value;

/// Value counts as present: not null, `false`, `0` or `""`
///
/// Arrays and objects are present even when empty.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Value is a JSON number strictly greater than zero
///
/// Fractions count; numeric strings do not.
pub fn positive_number(value: &Value) -> bool {
    value.as_f64().is_some_and(|n| n > 0.0)
}

/// Value is an array with at least one element
pub fn non_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(|items| !items.is_empty())
}

/// Value is a string contained in `allowed`
pub fn one_of(value: &Value, allowed: &[&str]) -> bool {
    value.as_str().is_some_and(|s| allowed.contains(&s))
}

/// Render a payload value for an error message
///
/// Strings are shown bare, everything else as JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
