//! Decimal amounts as the KonnectX API sends them.
//!
//! The API is not consistent: the same field may arrive as `"10.5"`, as `10.5`, as `null`,
//! or be missing altogether. Anything that does not yield a finite number counts as zero.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn parse_decimal_str(text: &str) -> f64 {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite()).unwrap_or(0.0)
}

pub fn parse_decimal(value: &Value) -> f64 {
    match value {
        Value::String(text) => parse_decimal_str(text),
        Value::Number(number) => number.as_f64().filter(|value| value.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn deserialize_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Value::deserialize(deserializer).map(|value| parse_decimal(&value))
}
