//! Codec configuration and the Limits Guard.
//!
//! The same three ceilings are enforced on the encode and the decode path,
//! through the same `check_*` methods, so a value one side accepts the
//! other side accepts too.
//!
//! Depth counts container boundaries: a value's level is the number of
//! List/Map containers around it, so the root is at level 0 and the items
//! of a root list at level 1.  A container whose items would sit at level
//! `L` fails when `L > max_depth`, checked before descending.  Empty
//! containers have no items, so `max_depth = 0` still accepts `[]` and
//! `{}` but rejects `[nil]`.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::errors::CodecError;

/// Immutable limit triple, fixed when a codec is built.
///
/// Deserializes from `{"maxDepth": .., "maxStringBytes": .., "maxContainerItems": ..}`;
/// omitted options keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Limits {
    /// Bounds recursion.
    pub max_depth: usize,
    /// Bounds string/bytes payload size.
    pub max_string_bytes: usize,
    /// Bounds list/map cardinality.
    pub max_container_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_string_bytes: DEFAULT_MAX_STRING_BYTES,
            max_container_items: DEFAULT_MAX_CONTAINER_ITEMS,
        }
    }
}

impl Limits {
    pub fn new(max_depth: usize, max_string_bytes: usize, max_container_items: usize) -> Self {
        Self {
            max_depth,
            max_string_bytes,
            max_container_items,
        }
    }

    /// All three ceilings at the 32-bit wire maximum.  Only suitable for
    /// trusted input.
    pub fn wide() -> Self {
        Self::new(WIRE_MAX_LEN, WIRE_MAX_LEN, WIRE_MAX_LEN)
    }

    /// Load limits from a JSON document.
    pub fn from_json_slice(raw: &[u8]) -> Result<Self, CodecError> {
        serde_json::from_slice(raw).map_err(|e| CodecError::InvalidConfig {
            detail: e.to_string(),
        })
    }

    /// Fails when a container's items would sit at nesting `level`.
    pub fn check_depth(&self, level: usize) -> Result<(), CodecError> {
        if level > self.max_depth {
            tracing::debug!(level, max = self.max_depth, "nesting limit exceeded");
            return Err(CodecError::RecursionLimit {
                depth: level,
                max: self.max_depth,
            });
        }
        Ok(())
    }

    /// Fails when a string or bytes payload is longer than allowed.
    pub fn check_text_len(&self, what: &'static str, len: usize) -> Result<(), CodecError> {
        Self::check(what, len, self.max_string_bytes)
    }

    /// Fails when a list or map holds more items than allowed.
    pub fn check_container_len(&self, what: &'static str, len: usize) -> Result<(), CodecError> {
        Self::check(what, len, self.max_container_items)
    }

    fn check(what: &'static str, len: usize, max: usize) -> Result<(), CodecError> {
        if len > max {
            tracing::debug!(what, len, max, "size limit exceeded");
            return Err(CodecError::DataTooLarge { what, len, max });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let l = Limits::default();
        assert_eq!(l.max_depth, 100);
        assert_eq!(l.max_string_bytes, 100 * 1024 * 1024);
        assert_eq!(l.max_container_items, 1_000_000);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let l = Limits::from_json_slice(br#"{"maxDepth": 4}"#).unwrap();
        assert_eq!(l.max_depth, 4);
        assert_eq!(l.max_container_items, DEFAULT_MAX_CONTAINER_ITEMS);
    }

    #[test]
    fn unknown_option_rejected() {
        let err = Limits::from_json_slice(br#"{"maxDepht": 4}"#).unwrap_err();
        assert_eq!(err.code(), crate::errors::ERR_CONFIG);
    }

    #[test]
    fn boundaries_are_inclusive() {
        let l = Limits::new(2, 3, 4);
        assert!(l.check_depth(2).is_ok());
        assert!(l.check_depth(3).is_err());
        assert!(l.check_text_len("string", 3).is_ok());
        assert!(l.check_text_len("string", 4).is_err());
        assert!(l.check_container_len("list", 4).is_ok());
        assert!(l.check_container_len("list", 5).is_err());
    }
}
