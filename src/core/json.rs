//! # JSON mapping helpers
//!
//! Field readers used by `Message::from_json` implementations.
//!
//! Absent keys and `null` both mean "not set" and yield the field's zero value. Present
//! values are coerced the way loosely typed clients send them: integers may arrive as
//! numbers or numeric strings, strings may arrive as numbers, booleans follow truthiness.
//! A value that cannot be coerced at all is `CodecError::InvalidJson`. Enum fields never
//! fail; unknown names and integers become the `UNRECOGNIZED` sentinel.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Number, Value};

use crate::core::message::{Enumeration, Message};
use crate::error::{CodecError, Result};

pub type JsonObject = Map<String, Value>;

/// View `value` as an object, naming the message in the error otherwise
pub fn object<'a>(value: &'a Value, type_name: &str) -> Result<&'a JsonObject> {
    value
        .as_object()
        .ok_or_else(|| CodecError::invalid_json(type_name, format!("expected an object, got {value}")))
}

/// Value of `name`, treating `null` as absent
#[inline]
pub fn field<'a>(object: &'a JsonObject, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

/// Integer value of a JSON number, accepting floats with no fractional part
pub fn integral(number: &Number) -> Option<i128> {
    if let Some(v) = number.as_u64() {
        return Some(i128::from(v));
    }
    if let Some(v) = number.as_i64() {
        return Some(i128::from(v));
    }
    number
        .as_f64()
        .filter(|v| v.is_finite() && v.fract() == 0.0)
        .map(|v| v as i128)
}

/// Text of a number as JavaScript's `String(n)` prints it for ordinary magnitudes
fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(v) if !number.is_u64() && !number.is_i64() && v.fract() == 0.0 && v.abs() < 1e21 => {
            format!("{}", v as i128)
        }
        _ => number.to_string(),
    }
}

fn coerce_string(value: &Value, name: &str) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(number_text(n)),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CodecError::invalid_json(
            name,
            format!("expected a string, got {other}"),
        )),
    }
}

fn float_to_integer(value: f64, name: &str) -> Result<i128> {
    if value.is_finite() && value.fract() == 0.0 {
        Ok(value as i128)
    } else {
        Err(CodecError::invalid_json(
            name,
            format!("{value} is not an integer"),
        ))
    }
}

fn coerce_integer(value: &Value, name: &str) -> Result<i128> {
    match value {
        Value::Number(n) => match integral(n) {
            Some(v) => Ok(v),
            None => float_to_integer(n.as_f64().unwrap_or(f64::NAN), name),
        },
        Value::String(s) => {
            let text = s.trim();
            if text.is_empty() {
                return Ok(0);
            }
            if let Ok(v) = text.parse::<i128>() {
                return Ok(v);
            }
            match text.parse::<f64>() {
                Ok(v) => float_to_integer(v, name),
                Err(_) => Err(CodecError::invalid_json(
                    name,
                    format!("\"{s}\" is not a number"),
                )),
            }
        }
        Value::Bool(b) => Ok(i128::from(*b)),
        other => Err(CodecError::invalid_json(
            name,
            format!("expected an integer, got {other}"),
        )),
    }
}

fn ranged<T: TryFrom<i128>>(value: i128, name: &str, type_label: &str) -> Result<T> {
    T::try_from(value).map_err(|_| {
        CodecError::invalid_json(name, format!("{value} is out of range for {type_label}"))
    })
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn string(object: &JsonObject, name: &str) -> Result<String> {
    field(object, name)
        .map(|value| coerce_string(value, name))
        .transpose()
        .map(Option::unwrap_or_default)
}

pub fn boolean(object: &JsonObject, name: &str) -> bool {
    field(object, name).is_some_and(truthy)
}

pub fn uint32(object: &JsonObject, name: &str) -> Result<u32> {
    match field(object, name) {
        Some(value) => ranged(coerce_integer(value, name)?, name, "uint32"),
        None => Ok(0),
    }
}

pub fn int32(object: &JsonObject, name: &str) -> Result<i32> {
    match field(object, name) {
        Some(value) => ranged(coerce_integer(value, name)?, name, "int32"),
        None => Ok(0),
    }
}

pub fn uint64(object: &JsonObject, name: &str) -> Result<u64> {
    match field(object, name) {
        Some(value) => ranged(coerce_integer(value, name)?, name, "uint64"),
        None => Ok(0),
    }
}

pub fn int64(object: &JsonObject, name: &str) -> Result<i64> {
    match field(object, name) {
        Some(value) => ranged(coerce_integer(value, name)?, name, "int64"),
        None => Ok(0),
    }
}

/// Standard base64 text to raw bytes
pub fn bytes(object: &JsonObject, name: &str) -> Result<Vec<u8>> {
    match field(object, name) {
        Some(Value::String(text)) => STANDARD
            .decode(text)
            .map_err(|e| CodecError::invalid_json(name, format!("invalid base64: {e}"))),
        Some(other) => Err(CodecError::invalid_json(
            name,
            format!("expected base64 text, got {other}"),
        )),
        None => Ok(Vec::new()),
    }
}

pub fn enumeration<E: Enumeration>(object: &JsonObject, name: &str) -> E {
    field(object, name).map_or_else(E::default, E::from_json_value)
}

/// Nested message; absent stays `None`
pub fn message<M: Message>(object: &JsonObject, name: &str) -> Result<Option<M>> {
    field(object, name).map(M::from_json).transpose()
}

fn array<'a>(object: &'a JsonObject, name: &str) -> Result<&'a [Value]> {
    match field(object, name) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CodecError::invalid_json(
            name,
            format!("expected an array, got {other}"),
        )),
        None => Ok(&[]),
    }
}

pub fn repeated_message<M: Message>(object: &JsonObject, name: &str) -> Result<Vec<M>> {
    array(object, name)?.iter().map(M::from_json).collect()
}

pub fn repeated_string(object: &JsonObject, name: &str) -> Result<Vec<String>> {
    array(object, name)?
        .iter()
        .map(|value| coerce_string(value, name))
        .collect()
}

pub fn repeated_uint64(object: &JsonObject, name: &str) -> Result<Vec<u64>> {
    array(object, name)?
        .iter()
        .map(|value| ranged(coerce_integer(value, name)?, name, "uint64"))
        .collect()
}

/// Raw bytes to standard base64 text
pub fn base64(bytes: &[u8]) -> Value {
    Value::String(STANDARD.encode(bytes))
}
