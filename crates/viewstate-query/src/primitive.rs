//! Scalar filter values as text.
//!
//! Default representation of a filter value when its filter has no codec of
//! its own. Strings pass through, booleans and numbers use their canonical
//! text, null is the empty string.

use serde_json::{Number, Value};

use crate::error::{QueryError, Result};

/// Render a scalar value as text.
///
/// Arrays and objects need a custom [`crate::FilterCodec`].
pub fn serialize(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(render_number(number)),
        Value::String(text) => Ok(text.clone()),
        other => Err(QueryError::UnsupportedType {
            kind: value_kind(other),
        }),
    }
}

/// Parse text written by [`serialize`].
///
/// A string only becomes a number when it is exactly the canonical
/// rendering of that number, so `"007"` or `"1.0"` stay strings.
#[must_use]
pub fn deserialize(raw: &str) -> Value {
    match raw {
        "" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => canonical_number(raw).map_or_else(|| Value::String(raw.to_string()), Value::Number),
    }
}

/// Canonical decimal text: integers without a fraction, zero without a
/// sign, other floats in shortest round-trip form.
#[must_use]
pub fn render_number(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(uint) = number.as_u64() {
        return uint.to_string();
    }
    let float = number.as_f64().unwrap_or_default();
    if float == 0.0 {
        "0".to_string()
    } else if float.fract() == 0.0 && float.abs() < 1e21 {
        format!("{float:.0}")
    } else {
        float.to_string()
    }
}

fn canonical_number(raw: &str) -> Option<Number> {
    let number = if let Ok(int) = raw.parse::<i64>() {
        Number::from(int)
    } else if let Ok(uint) = raw.parse::<u64>() {
        Number::from(uint)
    } else {
        Number::from_f64(raw.parse::<f64>().ok()?)?
    };
    (render_number(&number) == raw).then_some(number)
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
