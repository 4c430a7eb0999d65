//! Numeric coercion of free-form input.
//!
//! Every value that reaches the pricing formulas passes through
//! [`to_number_safe`]: anything missing, empty, non-numeric or non-finite
//! becomes exactly `0.0`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A raw field value as it arrives from a form, a config file or a stored record.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Missing,
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Missing)
    }
}

/// Coerce a raw value into a finite `f64`, falling back to `0.0`.
///
/// Text accepts either `,` or `.` as the decimal separator, so `"12,5"` and
/// `"12.5"` both yield `12.5`.
pub fn to_number_safe(value: impl Into<RawValue>) -> f64 {
    let n = match value.into() {
        RawValue::Number(n) => n,
        RawValue::Text(s) => parse_decimal(&s),
        RawValue::Flag(_) | RawValue::Missing => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

fn parse_decimal(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.replace(',', ".").parse::<f64>().unwrap_or(0.0)
}

/// Serde field adapter: numbers and numeric strings are coerced, any other
/// shape (`null`, booleans, arrays, objects) becomes `0.0`.
///
/// Pair with `#[serde(default)]` so an absent key also becomes `0.0`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Value::deserialize(deserializer)? {
        Value::Number(n) => RawValue::from(n.as_f64()),
        Value::String(s) => RawValue::Text(s),
        _ => RawValue::Missing,
    };
    Ok(to_number_safe(raw))
}
