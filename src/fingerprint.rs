//! Content fingerprints.
//!
//! FINGERPRINT = "tp1:" || hex_lower(sha256(canonical_encoding(value)))
//!
//! The canonical encoding sorts map keys by raw UTF-8 bytes, so equal
//! values hash equal no matter how their maps were built.

use sha2::{Digest, Sha256};

use crate::encode::{encode_value, KeyOrder};
use crate::errors::CodecError;
use crate::limits::Limits;
use crate::value::Value;

pub const FINGERPRINT_PREFIX: &str = "tp1:";

/// Compute lowercase hex SHA-256 digest.
fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    result.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Encode with sorted map keys.
pub fn canonical_bytes(val: &Value, limits: &Limits) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    encode_value(val, limits, KeyOrder::Sorted, 0, &mut out)?;
    Ok(out)
}

/// Fingerprint of a value.
pub fn fingerprint(val: &Value, limits: &Limits) -> Result<String, CodecError> {
    let canon = canonical_bytes(val, limits)?;
    Ok(format!("{}{}", FINGERPRINT_PREFIX, sha256_hex(&canon)))
}
