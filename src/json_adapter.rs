//! JSON boundary adapter: converts between `serde_json::Value` and the
//! codec's value model.
//!
//! Type mapping, JSON → Value:
//!   null    → Null
//!   boolean → Bool
//!   integer → UInt32 / UInt64 / Int32 / Int64, narrowest by sign and magnitude
//!   other   → Float64 (decimal point or exponent in the token)
//!   string  → String
//!   array   → List
//!   object  → Map
//!
//! serde_json's `arbitrary_precision` feature keeps the raw number token,
//! so an integer too large for 64 bits is reported as unsupported instead
//! of quietly becoming a float.
//!
//! Value → JSON maps every integer and float width onto a JSON number and
//! Bytes onto an array of octets.  That direction is lossy by nature: JSON
//! has no widths and no blobs.

use serde_json::{Map as JsonMap, Number, Value as Json};

use crate::errors::CodecError;
use crate::limits::Limits;
use crate::value::Value;

/// Parse raw JSON text and convert it.
pub fn parse_json(raw: &[u8], limits: &Limits) -> Result<Value, CodecError> {
    let json: Json = serde_json::from_slice(raw)
        .map_err(|e| CodecError::unsupported(format!("JSON parse error: {}", e)))?;
    value_from_json(&json, limits)
}

/// Convert a JSON document, enforcing the same limits the encoder would.
pub fn value_from_json(json: &Json, limits: &Limits) -> Result<Value, CodecError> {
    from_json_at(json, limits, 0)
}

fn from_json_at(json: &Json, limits: &Limits, level: usize) -> Result<Value, CodecError> {
    match json {
        Json::Null => Ok(Value::Null),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::Number(n) => number_from_json(n),
        Json::String(s) => {
            limits.check_text_len("string", s.len())?;
            Ok(Value::String(s.clone()))
        }
        Json::Array(items) => {
            limits.check_container_len("list", items.len())?;
            if !items.is_empty() {
                limits.check_depth(level + 1)?;
            }
            items
                .iter()
                .map(|item| from_json_at(item, limits, level + 1))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List)
        }
        Json::Object(obj) => {
            limits.check_container_len("map", obj.len())?;
            if !obj.is_empty() {
                limits.check_depth(level + 1)?;
            }
            let mut entries = std::collections::HashMap::with_capacity(obj.len());
            for (k, v) in obj {
                limits.check_text_len("string", k.len())?;
                entries.insert(k.clone(), from_json_at(v, limits, level + 1)?);
            }
            Ok(Value::Map(entries))
        }
    }
}

fn number_from_json(n: &Number) -> Result<Value, CodecError> {
    let token = n.to_string();
    if token.contains(['.', 'e', 'E']) {
        return n
            .as_f64()
            .map(Value::Float64)
            .ok_or_else(|| CodecError::unsupported(format!("number {} is not a finite f64", token)));
    }
    let wide: i128 = token
        .parse()
        .map_err(|_| CodecError::unsupported(format!("integer {} does not fit in 64 bits", token)))?;
    Value::integer(wide)
}

/// Convert a value into JSON.  Non-finite floats have no JSON form.
pub fn value_to_json(val: &Value) -> Result<Json, CodecError> {
    let json = match val {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::UInt8(n) => Json::from(*n),
        Value::UInt16(n) => Json::from(*n),
        Value::UInt32(n) => Json::from(*n),
        Value::UInt64(n) => Json::from(*n),
        Value::Int8(n) => Json::from(*n),
        Value::Int16(n) => Json::from(*n),
        Value::Int32(n) => Json::from(*n),
        Value::Int64(n) => Json::from(*n),
        Value::Float32(x) => float_to_json(f64::from(*x))?,
        Value::Float64(x) => float_to_json(*x)?,
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) => Json::Array(b.iter().map(|&octet| Json::from(octet)).collect()),
        Value::List(items) => Json::Array(
            items
                .iter()
                .map(value_to_json)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Map(entries) => {
            let mut obj = JsonMap::new();
            for (k, v) in entries {
                obj.insert(k.clone(), value_to_json(v)?);
            }
            Json::Object(obj)
        }
    };
    Ok(json)
}

fn float_to_json(x: f64) -> Result<Json, CodecError> {
    Number::from_f64(x)
        .map(Json::Number)
        .ok_or_else(|| CodecError::unsupported(format!("non-finite float {} has no JSON form", x)))
}
