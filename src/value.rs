//! The value model every encode consumes and every decode produces.
//!
//! `Value` owns its data outright: strings are `String`, blobs are
//! `Vec<u8>`, and containers own their children, so a value is always a
//! strict tree.  Maps are `HashMap`s, which makes keys unique by
//! construction and equality independent of entry order.  The flip side is
//! that `HashMap` iteration order is unspecified; use the canonical encoder
//! when byte-exact output matters.

use std::collections::HashMap;
use std::fmt;

use crate::errors::CodecError;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    /// UTF-8 text.  `String` guarantees validity, so the encoder never has
    /// to re-check it.
    String(String),
    /// Arbitrary octets.
    Bytes(Vec<u8>),
    /// Ordered, heterogeneous sequence.
    List(Vec<Value>),
    /// String-keyed entries; order carries no meaning.
    Map(HashMap<String, Value>),
}

impl Value {
    /// Short name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::UInt8(_) => "UInt8",
            Value::UInt16(_) => "UInt16",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(data.into())
    }

    /// Classify an integer of arbitrary width into the narrowest default
    /// tier: UInt32 or UInt64 when non-negative, Int32 or Int64 when
    /// negative.  Anything outside `i64::MIN..=u64::MAX` is unsupported.
    pub fn integer(n: i128) -> Result<Self, CodecError> {
        if n >= 0 {
            if let Ok(v) = u32::try_from(n) {
                return Ok(Value::UInt32(v));
            }
            if let Ok(v) = u64::try_from(n) {
                return Ok(Value::UInt64(v));
            }
        } else {
            if let Ok(v) = i32::try_from(n) {
                return Ok(Value::Int32(v));
            }
            if let Ok(v) = i64::try_from(n) {
                return Ok(Value::Int64(v));
            }
        }
        Err(CodecError::unsupported(format!(
            "integer {} does not fit in 64 bits",
            n
        )))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::UInt8(n) => write!(f, "{}u8", n),
            Value::UInt16(n) => write!(f, "{}u16", n),
            Value::UInt32(n) => write!(f, "{}u32", n),
            Value::UInt64(n) => write!(f, "{}u64", n),
            Value::Int8(n) => write!(f, "{}i8", n),
            Value::Int16(n) => write!(f, "{}i16", n),
            Value::Int32(n) => write!(f, "{}i32", n),
            Value::Int64(n) => write!(f, "{}i64", n),
            Value::Float32(x) => write!(f, "{}f32", x),
            Value::Float64(x) => write!(f, "{}f64", x),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::List(items) => write!(f, "[{} items]", items.len()),
            Value::Map(entries) => write!(f, "{{{} entries}}", entries.len()),
        }
    }
}

// ── Conversions from native values ───────────────────────────
// Fixed-width inputs keep their own width.  Only the word-sized types
// below need a magnitude-based choice.

macro_rules! impl_from_fixed {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from_fixed! {
    bool => Bool,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => String,
    Vec<Value> => List,
    HashMap<String, Value> => Map,
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        match u32::try_from(v) {
            Ok(n) => Value::UInt32(n),
            Err(_) => Value::UInt64(v as u64),
        }
    }
}

impl From<isize> for Value {
    fn from(v: isize) -> Self {
        if v >= 0 {
            Value::from(v as usize)
        } else {
            match i32::try_from(v) {
                Ok(n) => Value::Int32(n),
                Err(_) => Value::Int64(v as i64),
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
