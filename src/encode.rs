//! Encoder: writes one tag byte and its payload per node, recursing into
//! List and Map children.
//!
//! Encoding format per kind:
//!   integers : tag || big-endian value (1, 2, 4 or 8 bytes)
//!   floats   : tag || big-endian IEEE-754 bits
//!   String   : 0x30+len || utf8          (len <= 15)
//!              0x41 || u16 len || utf8   (len <= 0xFFFF)
//!              0x42 || u32 len || utf8
//!   List     : 0x50+n | 0x61 u16 n | 0x62 u32 n, then n values
//!   Map      : 0x70+n | 0x81 u16 n | 0x82 u32 n, then n (String key, value)
//!   Bytes    : 0x91 u8 len | 0x92 u16 len | 0x93 u32 len, then raw bytes
//!   Bool/Nil : 0xA0 true, 0xA1 false, 0xA3 nil
//!
//! The narrowest tier that fits is always chosen.

use crate::constants::*;
use crate::errors::CodecError;
use crate::limits::Limits;
use crate::value::Value;

/// Order in which map entries are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// The map's own iteration order.  Decodes to an equal value, but two
    /// equal maps may produce different bytes.
    #[default]
    AsStored,
    /// Keys ascending by raw UTF-8 bytes (memcmp order).  Equal values
    /// always produce identical bytes.
    Sorted,
}

/// Encode `val` into `out`.
///
/// `level` is the number of containers around `val` (0 at the root).
/// Children sit at `level + 1`, which is checked before the first child is
/// written.  On error `out` may hold a partial write; callers own the buffer
/// and discard it.
pub fn encode_value(
    val: &Value,
    limits: &Limits,
    order: KeyOrder,
    level: usize,
    out: &mut Vec<u8>,
) -> Result<(), CodecError> {
    match val {
        Value::Null => out.push(TAG_NIL),
        Value::Bool(true) => out.push(TAG_TRUE),
        Value::Bool(false) => out.push(TAG_FALSE),

        Value::UInt8(n) => {
            out.push(TAG_UINT8);
            out.push(*n);
        }
        Value::UInt16(n) => put(out, TAG_UINT16, &n.to_be_bytes()),
        Value::UInt32(n) => put(out, TAG_UINT32, &n.to_be_bytes()),
        Value::UInt64(n) => put(out, TAG_UINT64, &n.to_be_bytes()),
        Value::Int8(n) => put(out, TAG_INT8, &n.to_be_bytes()),
        Value::Int16(n) => put(out, TAG_INT16, &n.to_be_bytes()),
        Value::Int32(n) => put(out, TAG_INT32, &n.to_be_bytes()),
        Value::Int64(n) => put(out, TAG_INT64, &n.to_be_bytes()),
        Value::Float32(x) => put(out, TAG_FLOAT32, &x.to_bits().to_be_bytes()),
        Value::Float64(x) => put(out, TAG_FLOAT64, &x.to_bits().to_be_bytes()),

        Value::String(s) => encode_str(s, limits, out)?,

        Value::Bytes(b) => {
            limits.check_text_len("bytes", b.len())?;
            let len = fit_wire("bytes", b.len())?;
            if len <= 0xFF {
                out.push(TAG_BYTES8);
                out.push(len as u8);
            } else if len <= 0xFFFF {
                put(out, TAG_BYTES16, &(len as u16).to_be_bytes());
            } else {
                put(out, TAG_BYTES32, &(len as u32).to_be_bytes());
            }
            out.extend_from_slice(b);
        }

        Value::List(items) => {
            limits.check_container_len("list", items.len())?;
            if !items.is_empty() {
                limits.check_depth(level + 1)?;
            }
            let n = fit_wire("list", items.len())?;
            write_header(out, n, TAG_FIX_LIST, TAG_LIST16, TAG_LIST32);
            for item in items {
                encode_value(item, limits, order, level + 1, out)?;
            }
        }

        Value::Map(entries) => {
            limits.check_container_len("map", entries.len())?;
            if !entries.is_empty() {
                limits.check_depth(level + 1)?;
            }
            let n = fit_wire("map", entries.len())?;
            write_header(out, n, TAG_FIX_MAP, TAG_MAP16, TAG_MAP32);
            match order {
                KeyOrder::AsStored => {
                    for (k, v) in entries {
                        encode_str(k, limits, out)?;
                        encode_value(v, limits, order, level + 1, out)?;
                    }
                }
                KeyOrder::Sorted => {
                    let mut sorted: Vec<(&String, &Value)> = entries.iter().collect();
                    // &[u8] Ord is unsigned-byte lexicographic.
                    sorted.sort_unstable_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));
                    for (k, v) in sorted {
                        encode_str(k, limits, out)?;
                        encode_value(v, limits, order, level + 1, out)?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Encode a string (values and map keys alike).  The length is measured in
/// UTF-8 bytes, not characters.
pub fn encode_str(s: &str, limits: &Limits, out: &mut Vec<u8>) -> Result<(), CodecError> {
    let raw = s.as_bytes();
    limits.check_text_len("string", raw.len())?;
    let len = fit_wire("string", raw.len())?;
    if len <= FIX_MAX_LEN {
        out.push(TAG_FIX_STRING + len as u8);
    } else if len <= 0xFFFF {
        put(out, TAG_STRING16, &(len as u16).to_be_bytes());
    } else {
        put(out, TAG_STRING32, &(len as u32).to_be_bytes());
    }
    out.extend_from_slice(raw);
    Ok(())
}

/// A configured limit may exceed what a 32-bit length field can carry.
fn fit_wire(what: &'static str, len: usize) -> Result<usize, CodecError> {
    if len > WIRE_MAX_LEN {
        return Err(CodecError::DataTooLarge {
            what,
            len,
            max: WIRE_MAX_LEN,
        });
    }
    Ok(len)
}

fn write_header(out: &mut Vec<u8>, n: usize, fix: u8, tag16: u8, tag32: u8) {
    if n <= FIX_MAX_LEN {
        out.push(fix + n as u8);
    } else if n <= 0xFFFF {
        put(out, tag16, &(n as u16).to_be_bytes());
    } else {
        put(out, tag32, &(n as u32).to_be_bytes());
    }
}

#[inline]
fn put(out: &mut Vec<u8>, tag: u8, payload: &[u8]) {
    out.push(tag);
    out.extend_from_slice(payload);
}
