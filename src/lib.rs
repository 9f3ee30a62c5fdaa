//! # tagpack — compact self-describing binary values
//!
//! Encode and decode a JSON-like value model (integers of four widths,
//! floats, booleans, strings, byte blobs, lists and string-keyed maps)
//! with a one-byte type tag per node and explicit nesting and size limits
//! for untrusted input.
//!
//! ```
//! use tagpack::{decode, encode, Limits, Value};
//!
//! let limits = Limits::default();
//! let val = Value::List(vec![Value::UInt32(1), Value::from("two"), Value::Null]);
//! let bytes = encode(&val, &limits).unwrap();
//! assert_eq!(bytes[0], 0x53); // FixList, three items
//! assert_eq!(decode(&bytes, &limits).unwrap(), val);
//! ```
//!
//! Map entries are emitted in the map's iteration order, which is not
//! stable.  Use [`encode_canonical`] or [`fingerprint`] when equal values
//! must produce equal bytes.

pub mod codec;
pub mod constants;
pub mod decode;
pub mod encode;
pub mod errors;
pub mod fingerprint;
pub mod json_adapter;
pub mod limits;
pub mod value;

pub use codec::Codec;
pub use constants::FORMAT_VERSION;
pub use encode::KeyOrder;
pub use errors::{
    CodecError, ERR_CONFIG, ERR_DATA_TOO_LARGE, ERR_INSUFFICIENT_DATA, ERR_RECURSION_LIMIT,
    ERR_TRAILING_BYTES, ERR_UNKNOWN_TYPE_ID, ERR_UNSUPPORTED_TYPE, ERR_UTF8,
};
pub use limits::Limits;
pub use value::Value;

use json_adapter::{parse_json, value_to_json};

// ── Core API ─────────────────────────────────────────────────

/// Encode a value under the given limits.
pub fn encode(val: &Value, limits: &Limits) -> Result<Vec<u8>, CodecError> {
    Codec::new(*limits).encode(val)
}

/// Decode a value under the given limits.  `decode(&[])` is `Value::Null`.
pub fn decode(buf: &[u8], limits: &Limits) -> Result<Value, CodecError> {
    Codec::new(*limits).decode(buf)
}

/// Encode with map keys in raw UTF-8 byte order.
pub fn encode_canonical(val: &Value, limits: &Limits) -> Result<Vec<u8>, CodecError> {
    Codec::new(*limits).encode_canonical(val)
}

/// Decode, rejecting any bytes after the root value.
pub fn decode_exact(buf: &[u8], limits: &Limits) -> Result<Value, CodecError> {
    Codec::new(*limits).decode_exact(buf)
}

/// [`encode`] with default limits.
pub fn to_bytes(val: &Value) -> Result<Vec<u8>, CodecError> {
    encode(val, &Limits::default())
}

/// [`decode`] with default limits.
pub fn from_bytes(buf: &[u8]) -> Result<Value, CodecError> {
    decode(buf, &Limits::default())
}

/// `"tp1:"` followed by the hex SHA-256 of the canonical encoding.
pub fn fingerprint(val: &Value, limits: &Limits) -> Result<String, CodecError> {
    fingerprint::fingerprint(val, limits)
}

// ── JSON boundary ────────────────────────────────────────────

/// Parse JSON text and encode it.
pub fn json_to_bytes(raw: &[u8], limits: &Limits) -> Result<Vec<u8>, CodecError> {
    let val = parse_json(raw, limits)?;
    encode(&val, limits)
}

/// Decode a buffer and render it as JSON.
pub fn bytes_to_json(buf: &[u8], limits: &Limits) -> Result<serde_json::Value, CodecError> {
    let val = decode(buf, limits)?;
    value_to_json(&val)
}
