//! Error codes and the codec error type.
//!
//! Every failure is raised at the point it is detected and propagated to
//! the caller unchanged.  Encoding never hands back a partial buffer and
//! decoding never hands back a partial value.

use thiserror::Error;

// ── Error codes ──────────────────────────────────────────────
// Stable identifiers shared with other implementations of the format, so
// test vectors can name the expected failure without matching messages.

pub const ERR_RECURSION_LIMIT: &str = "ERR_RECURSION_LIMIT";
pub const ERR_DATA_TOO_LARGE: &str = "ERR_DATA_TOO_LARGE";
pub const ERR_UTF8: &str = "ERR_UTF8";
pub const ERR_INSUFFICIENT_DATA: &str = "ERR_INSUFFICIENT_DATA";
pub const ERR_UNKNOWN_TYPE_ID: &str = "ERR_UNKNOWN_TYPE_ID";
pub const ERR_UNSUPPORTED_TYPE: &str = "ERR_UNSUPPORTED_TYPE";
pub const ERR_TRAILING_BYTES: &str = "ERR_TRAILING_BYTES";
pub const ERR_CONFIG: &str = "ERR_CONFIG";

/// Failure raised by encode, decode or one of the boundary adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A List/Map's items would sit at nesting level `depth`, beyond `max`.
    #[error("recursion limit exceeded: nesting level {depth} (max {max})")]
    RecursionLimit { depth: usize, max: usize },

    /// A string/bytes length or container count is over its ceiling.
    #[error("{what} too large: {len} (max {max})")]
    DataTooLarge {
        what: &'static str,
        len: usize,
        max: usize,
    },

    /// A string payload is not valid UTF-8.  `offset` is the absolute
    /// position of the payload in the input buffer.
    #[error("invalid UTF-8 in {what} at offset {offset} (valid up to byte {valid_up_to})")]
    Utf8 {
        what: &'static str,
        offset: usize,
        valid_up_to: usize,
    },

    /// The buffer ran out before a tag, length field or payload.
    #[error("insufficient data for {what}: need {needed} bytes, {available} available")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    /// The tag byte at `offset` matches no defined encoding.
    #[error("unknown type id 0x{tag:02x} at offset {offset}")]
    UnknownTypeId { tag: u8, offset: usize },

    /// A value (or decoded map key) has no representation in the model.
    #[error("unsupported type: {detail}")]
    UnsupportedType { detail: String },

    /// Strict decode found bytes after the root value.
    #[error("trailing bytes: root value ends at {consumed}, buffer is {total} bytes")]
    TrailingBytes { consumed: usize, total: usize },

    /// A limits document could not be loaded.
    #[error("invalid codec configuration: {detail}")]
    InvalidConfig { detail: String },
}

impl CodecError {
    pub fn unsupported(detail: impl Into<String>) -> Self {
        Self::UnsupportedType {
            detail: detail.into(),
        }
    }

    /// The stable `ERR_*` code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RecursionLimit { .. } => ERR_RECURSION_LIMIT,
            Self::DataTooLarge { .. } => ERR_DATA_TOO_LARGE,
            Self::Utf8 { .. } => ERR_UTF8,
            Self::InsufficientData { .. } => ERR_INSUFFICIENT_DATA,
            Self::UnknownTypeId { .. } => ERR_UNKNOWN_TYPE_ID,
            Self::UnsupportedType { .. } => ERR_UNSUPPORTED_TYPE,
            Self::TrailingBytes { .. } => ERR_TRAILING_BYTES,
            Self::InvalidConfig { .. } => ERR_CONFIG,
        }
    }
}
