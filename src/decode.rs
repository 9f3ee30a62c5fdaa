//! Decoder: rebuilds a `Value` tree from a complete buffer.
//!
//! The reader only moves forward.  Every declared length is checked first
//! against the configured limit, then against the bytes actually left,
//! and only then is anything allocated or copied.  A hostile length field
//! therefore cannot force a large allocation, and hostile nesting is cut
//! off before the decoder descends.

use std::collections::HashMap;

use crate::constants::*;
use crate::errors::CodecError;
use crate::limits::Limits;
use crate::value::Value;

/// Forward-only cursor over an input buffer.
#[derive(Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes, or fail without consuming anything.
    pub fn take(&mut self, n: usize, what: &'static str) -> Result<&'a [u8], CodecError> {
        if n > self.remaining() {
            return Err(CodecError::InsufficientData {
                what,
                needed: n,
                available: self.remaining(),
            });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn array<const N: usize>(&mut self, what: &'static str) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, what)?);
        Ok(out)
    }

    pub fn read_u8(&mut self, what: &'static str) -> Result<u8, CodecError> {
        Ok(self.take(1, what)?[0])
    }

    pub fn read_u16(&mut self, what: &'static str) -> Result<u16, CodecError> {
        self.array(what).map(u16::from_be_bytes)
    }

    pub fn read_u32(&mut self, what: &'static str) -> Result<u32, CodecError> {
        self.array(what).map(u32::from_be_bytes)
    }

    pub fn read_u64(&mut self, what: &'static str) -> Result<u64, CodecError> {
        self.array(what).map(u64::from_be_bytes)
    }
}

/// Decode one value at the reader's position.
///
/// `level` is the number of containers around this value (0 at the
/// root), mirroring `encode_value`.
pub fn decode_value(
    r: &mut Reader<'_>,
    limits: &Limits,
    level: usize,
) -> Result<Value, CodecError> {
    let offset = r.position();
    let tag = r.read_u8("type tag")?;

    let val = match tag {
        TAG_NIL => Value::Null,
        TAG_TRUE => Value::Bool(true),
        TAG_FALSE => Value::Bool(false),

        TAG_UINT8 => Value::UInt8(r.read_u8("uint8")?),
        TAG_UINT16 => Value::UInt16(r.read_u16("uint16")?),
        TAG_UINT32 => Value::UInt32(r.read_u32("uint32")?),
        TAG_UINT64 => Value::UInt64(r.read_u64("uint64")?),
        TAG_INT8 => Value::Int8(r.read_u8("int8")? as i8),
        TAG_INT16 => Value::Int16(r.read_u16("int16")? as i16),
        TAG_INT32 => Value::Int32(r.read_u32("int32")? as i32),
        TAG_INT64 => Value::Int64(r.read_u64("int64")? as i64),
        TAG_FLOAT32 => Value::Float32(f32::from_bits(r.read_u32("float32")?)),
        TAG_FLOAT64 => Value::Float64(f64::from_bits(r.read_u64("float64")?)),

        0x30..=0x3F => {
            let len = (tag - TAG_FIX_STRING) as usize;
            Value::String(read_str(r, limits, len)?)
        }
        TAG_STRING16 => {
            let len = r.read_u16("string16 length")? as usize;
            Value::String(read_str(r, limits, len)?)
        }
        TAG_STRING32 => {
            let len = r.read_u32("string32 length")? as usize;
            Value::String(read_str(r, limits, len)?)
        }

        TAG_BYTES8 => {
            let len = r.read_u8("bytes8 length")? as usize;
            Value::Bytes(read_bytes(r, limits, len)?)
        }
        TAG_BYTES16 => {
            let len = r.read_u16("bytes16 length")? as usize;
            Value::Bytes(read_bytes(r, limits, len)?)
        }
        TAG_BYTES32 => {
            let len = r.read_u32("bytes32 length")? as usize;
            Value::Bytes(read_bytes(r, limits, len)?)
        }

        0x50..=0x5F | TAG_LIST16 | TAG_LIST32 => {
            let n = match tag {
                TAG_LIST16 => r.read_u16("list16 count")? as usize,
                TAG_LIST32 => r.read_u32("list32 count")? as usize,
                _ => (tag - TAG_FIX_LIST) as usize,
            };
            limits.check_container_len("list", n)?;
            if n > 0 {
                limits.check_depth(level + 1)?;
            }
            // Every element takes at least its tag byte.
            let mut items = Vec::with_capacity(n.min(r.remaining()));
            for _ in 0..n {
                items.push(decode_value(r, limits, level + 1)?);
            }
            Value::List(items)
        }

        0x70..=0x7F | TAG_MAP16 | TAG_MAP32 => {
            let n = match tag {
                TAG_MAP16 => r.read_u16("map16 count")? as usize,
                TAG_MAP32 => r.read_u32("map32 count")? as usize,
                _ => (tag - TAG_FIX_MAP) as usize,
            };
            limits.check_container_len("map", n)?;
            if n > 0 {
                limits.check_depth(level + 1)?;
            }
            // Every entry takes at least a key tag and a value tag.
            let mut entries = HashMap::with_capacity(n.min(r.remaining() / 2));
            for _ in 0..n {
                let key_offset = r.position();
                let key = match decode_value(r, limits, level + 1)? {
                    Value::String(s) => s,
                    other => {
                        return Err(CodecError::unsupported(format!(
                            "map key at offset {} must be String, got {}",
                            key_offset,
                            other.kind()
                        )));
                    }
                };
                let val = decode_value(r, limits, level + 1)?;
                // A repeated key replaces the earlier entry.
                entries.insert(key, val);
            }
            Value::Map(entries)
        }

        _ => return Err(CodecError::UnknownTypeId { tag, offset }),
    };
    Ok(val)
}

fn read_str(r: &mut Reader<'_>, limits: &Limits, len: usize) -> Result<String, CodecError> {
    limits.check_text_len("string", len)?;
    let offset = r.position();
    let raw = r.take(len, "string payload")?;
    let s = std::str::from_utf8(raw).map_err(|e| CodecError::Utf8 {
        what: "string payload",
        offset,
        valid_up_to: e.valid_up_to(),
    })?;
    Ok(s.to_owned())
}

fn read_bytes(r: &mut Reader<'_>, limits: &Limits, len: usize) -> Result<Vec<u8>, CodecError> {
    limits.check_text_len("bytes", len)?;
    Ok(r.take(len, "bytes payload")?.to_vec())
}
