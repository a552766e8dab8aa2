//! Shared accessors for walking untyped feed JSON.
//!
//! The feeds mark "absent" in several ways: missing key, `null`, `""`, `0`,
//! `[]` or `{}`. [`is_present`] treats all of them alike so the extractors
//! can apply one rule.

use serde_json::Value;

/// `false` for `null`, `false`, zero, and empty strings, arrays or objects.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// `obj[key]` when it exists and [`is_present`].
pub(crate) fn present_field<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| is_present(v))
}

/// Renders a scalar as text: strings verbatim, numbers and booleans via
/// their JSON form. Arrays, objects and `null` have no text form.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// `obj[key]` as a string slice, if it is a JSON string.
pub(crate) fn str_field<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Short description of a value's JSON type for diagnostics.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
