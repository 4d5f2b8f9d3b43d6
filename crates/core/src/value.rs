//! Value type definitions for wisp properties.
//!
//! This module defines the `Value` enum which represents any value a reactive
//! element property can hold.

use crate::number::format_number;
use crate::types::ValueKind;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A value held by an element property.
#[derive(Clone, Debug)]
pub enum Value {
    /// Absent value (`null`/`undefined` on the JavaScript side)
    Null,
    /// Boolean value
    Boolean(bool),
    /// Double precision number
    Number(f64),
    /// Arbitrary precision integer, bounded to 128 bits
    BigInt(i128),
    /// UTF-8 string
    String(String),
    /// Absolute URL href
    Url(String),
    /// Date stored as milliseconds since the Unix epoch; `NaN` is an invalid date
    Date(f64),
    /// Structured data (arrays and objects)
    Json(JsonValue),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::String(_) => ValueKind::String,
            Value::Url(_) => ValueKind::Url,
            Value::Date(_) => ValueKind::Date,
            Value::Json(_) => ValueKind::Json,
        }
    }

    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a Boolean, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number if this is a Number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the integer if this is a BigInt, None otherwise.
    pub fn as_bigint(&self) -> Option<i128> {
        match self {
            Value::BigInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the href if this is a Url, None otherwise.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            Value::Url(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a Date, None otherwise.
    pub fn as_date(&self) -> Option<f64> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns a reference to the structured value if this is Json, None otherwise.
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Value::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Lifts a parsed JSON value into a property value.
    ///
    /// Scalars become their dedicated variants, arrays and objects stay `Json`.
    pub fn from_json(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(b),
            JsonValue::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            JsonValue::String(s) => Value::String(s),
            other => Value::Json(other),
        }
    }

    /// Converts this value into its JSON form.
    ///
    /// Non-finite numbers and invalid dates map to `null`, the same way
    /// `JSON.stringify` treats them.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(*b),
            Value::Number(n) => finite_json(*n),
            Value::BigInt(n) => JsonValue::String(n.to_string()),
            Value::String(s) | Value::Url(s) => JsonValue::String(s.clone()),
            Value::Date(ms) => finite_json(*ms),
            Value::Json(j) => j.clone(),
        }
    }

    /// Renders the value the way JavaScript string coercion would.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "null".into(),
            Value::Boolean(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::BigInt(n) => n.to_string(),
            Value::String(s) | Value::Url(s) => s.clone(),
            Value::Date(ms) => format_number(*ms),
            Value::Json(j) => j.to_string(),
        }
    }
}

fn finite_json(n: f64) -> JsonValue {
    serde_json::Number::from_f64(n)
        .map(JsonValue::Number)
        .unwrap_or(JsonValue::Null)
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) | (Value::Date(a), Value::Date(b)) => {
                // Handle NaN comparison
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Url(a), Value::Url(b)) => a == b,
            (Value::Json(a), Value::Json(b)) => json_eq(a, b),
            _ => false,
        }
    }
}

/// Deep equality where numbers compare by numeric value, so `1` and `1.0`
/// are the same number.
fn json_eq(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64() == y.as_f64(),
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| json_eq(a, b))
        }
        (JsonValue::Object(x), JsonValue::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, a)| y.get(k).map_or(false, |b| json_eq(a, b)))
        }
        _ => a == b,
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) | Value::Date(n) => serializer.serialize_f64(*n),
            Value::BigInt(n) => serializer.serialize_i128(*n),
            Value::String(s) | Value::Url(s) => serializer.serialize_str(s),
            Value::Json(j) => j.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::BigInt(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<JsonValue> for Value {
    fn from(v: JsonValue) -> Self {
        Value::from_json(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Json(JsonValue::Array(v.iter().map(Value::to_json).collect()))
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kind() {
        assert_eq!(Value::Number(1.0).kind(), ValueKind::Number);
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::Json(json!([1])).kind(), ValueKind::Json);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Number(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::BigInt(7).as_bigint(), Some(7));
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::Url("https://a.test/".into()).as_url(), Some("https://a.test/"));
        assert_eq!(Value::Date(1000.0).as_date(), Some(1000.0));
        assert_eq!(Value::Number(1.0).as_str(), None);
    }

    #[test]
    fn test_value_equality_is_structural() {
        assert_eq!(Value::Json(json!({"a": [1, 2]})), Value::Json(json!({"a": [1, 2]})));
        assert_ne!(Value::Json(json!({"a": [1, 2]})), Value::Json(json!({"a": [2, 1]})));
        assert_ne!(Value::Number(1.0), Value::BigInt(1));
        assert_ne!(Value::String("x".into()), Value::Url("x".into()));
    }

    #[test]
    fn test_json_numbers_compare_by_value() {
        let ints = Value::Json(json!({"n": [1, 2]}));
        let floats = Value::Json(json!({"n": [1.0, 2.0]}));
        assert_eq!(ints, floats);
        assert_eq!(Value::Json(json!([1])), Value::from(alloc::vec![Value::Number(1.0)]));
        assert_ne!(Value::Json(json!([1])), Value::Json(json!([1.5])));
        assert_ne!(Value::Json(json!({"a": 1})), Value::Json(json!({"b": 1})));
    }

    #[test]
    fn test_nan_equals_nan() {
        assert_eq!(Value::Number(f64::NAN), Value::Number(f64::NAN));
        assert_eq!(Value::Date(f64::NAN), Value::Date(f64::NAN));
        assert_ne!(Value::Number(f64::NAN), Value::Number(0.0));
    }

    #[test]
    fn test_from_json_lifts_scalars() {
        assert_eq!(Value::from_json(json!(42)), Value::Number(42.0));
        assert_eq!(Value::from_json(json!(true)), Value::Boolean(true));
        assert_eq!(Value::from_json(json!("s")), Value::String("s".into()));
        assert_eq!(Value::from_json(json!(null)), Value::Null);
        assert_eq!(Value::from_json(json!([1, 2])), Value::Json(json!([1, 2])));
    }

    #[test]
    fn test_to_json() {
        assert_eq!(Value::Number(f64::INFINITY).to_json(), json!(null));
        assert_eq!(Value::BigInt(12).to_json(), json!("12"));
        assert_eq!(Value::Boolean(false).to_json(), json!(false));
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Number(2.0).to_display_string(), "2");
        assert_eq!(Value::Json(json!({"a": 1})).to_display_string(), "{\"a\":1}");
        assert_eq!(Value::Null.to_display_string(), "null");
    }

    #[test]
    fn test_value_from_impls() {
        let v: Value = 42i32.into();
        assert_eq!(v.as_f64(), Some(42.0));

        let v: Value = "hello".into();
        assert_eq!(v.as_str(), Some("hello"));

        let v: Value = None::<bool>.into();
        assert!(v.is_null());

        let v: Value = alloc::vec![Value::Number(1.0), Value::from("a")].into();
        assert_eq!(v, Value::Json(json!([1.0, "a"])));
    }
}
