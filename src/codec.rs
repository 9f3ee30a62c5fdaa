//! A configured codec instance.
//!
//! `Codec` holds nothing but its `Limits`, which never change after
//! construction, so one instance can be shared across threads and used for
//! any number of concurrent calls.  Each call owns its working buffer.

use crate::decode::{decode_value, Reader};
use crate::encode::{encode_value, KeyOrder};
use crate::errors::CodecError;
use crate::fingerprint;
use crate::limits::Limits;
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Codec {
    limits: Limits,
}

impl Codec {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Encode a value, emitting map entries in their stored order.
    pub fn encode(&self, val: &Value) -> Result<Vec<u8>, CodecError> {
        self.encode_with(val, KeyOrder::AsStored)
    }

    /// Encode a value with map keys sorted, giving byte-exact output for
    /// equal values.
    pub fn encode_canonical(&self, val: &Value) -> Result<Vec<u8>, CodecError> {
        self.encode_with(val, KeyOrder::Sorted)
    }

    fn encode_with(&self, val: &Value, order: KeyOrder) -> Result<Vec<u8>, CodecError> {
        let mut out = Vec::new();
        encode_value(val, &self.limits, order, 0, &mut out).map_err(|e| {
            tracing::debug!(code = e.code(), error = %e, "encode failed");
            e
        })?;
        Ok(out)
    }

    /// Decode one value.  An empty buffer decodes to `Value::Null`; bytes
    /// after the root value are ignored.
    pub fn decode(&self, buf: &[u8]) -> Result<Value, CodecError> {
        self.decode_root(buf).map(|(val, _)| val)
    }

    /// Like [`Codec::decode`], but the root value must span the whole
    /// buffer.
    pub fn decode_exact(&self, buf: &[u8]) -> Result<Value, CodecError> {
        let (val, consumed) = self.decode_root(buf)?;
        if consumed != buf.len() {
            return Err(CodecError::TrailingBytes {
                consumed,
                total: buf.len(),
            });
        }
        Ok(val)
    }

    fn decode_root(&self, buf: &[u8]) -> Result<(Value, usize), CodecError> {
        if buf.is_empty() {
            return Ok((Value::Null, 0));
        }
        let mut r = Reader::new(buf);
        let val = decode_value(&mut r, &self.limits, 0).map_err(|e| {
            tracing::debug!(code = e.code(), error = %e, len = buf.len(), "decode failed");
            e
        })?;
        Ok((val, r.position()))
    }

    pub fn fingerprint(&self, val: &Value) -> Result<String, CodecError> {
        fingerprint::fingerprint(val, &self.limits)
    }
}
