//! Best-effort coercion of environment strings into typed values.
//!
//! Environment variables arrive untyped; the override pipeline needs `8883`
//! to land in the tree as a number and `true` as a boolean, not as strings.

use serde_json::Value;

/// Convert a string into the most specific value it can represent.
///
/// Precedence is fixed: case-insensitive `true`/`false` becomes a boolean,
/// then base-10 integer, then float, otherwise the original string is kept
/// unmodified. Never fails. Locale formats (thousands separators, comma
/// decimals) are not accepted and fall through to string.
pub fn coerce(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }

    if let Ok(f) = raw.parse::<f64>() {
        // NaN and infinities have no JSON representation; keep the string.
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}
