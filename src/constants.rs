//! Wire constants: one-byte type tags and default safety limits.
//!
//! All multi-byte fields that follow a tag are big-endian.  There is no
//! header, version byte or checksum; a stream is exactly one encoded value.

/// Format revision this implementation speaks.  Informational only, it is
/// never written to the wire.
pub const FORMAT_VERSION: &str = "1";

// ── Integers ─────────────────────────────────────────────────

pub const TAG_UINT8: u8 = 0x01;
pub const TAG_UINT16: u8 = 0x02;
pub const TAG_UINT32: u8 = 0x03;
pub const TAG_UINT64: u8 = 0x04;

pub const TAG_INT8: u8 = 0x11;
pub const TAG_INT16: u8 = 0x12;
pub const TAG_INT32: u8 = 0x13;
pub const TAG_INT64: u8 = 0x14;

// ── Floats (IEEE-754 raw bits) ───────────────────────────────

pub const TAG_FLOAT32: u8 = 0x21;
pub const TAG_FLOAT64: u8 = 0x22;

// ── Length-prefixed kinds ────────────────────────────────────
// Fix variants carry a 0..=15 length or count in the low nibble.

pub const TAG_FIX_STRING: u8 = 0x30;
pub const TAG_STRING16: u8 = 0x41;
pub const TAG_STRING32: u8 = 0x42;

pub const TAG_FIX_LIST: u8 = 0x50;
pub const TAG_LIST16: u8 = 0x61;
pub const TAG_LIST32: u8 = 0x62;

pub const TAG_FIX_MAP: u8 = 0x70;
pub const TAG_MAP16: u8 = 0x81;
pub const TAG_MAP32: u8 = 0x82;

pub const TAG_BYTES8: u8 = 0x91;
pub const TAG_BYTES16: u8 = 0x92;
pub const TAG_BYTES32: u8 = 0x93;

// ── Payload-free ─────────────────────────────────────────────

pub const TAG_TRUE: u8 = 0xA0;
pub const TAG_FALSE: u8 = 0xA1;
pub const TAG_NIL: u8 = 0xA3;

/// Largest length or count a Fix variant can hold inline.
pub const FIX_MAX_LEN: usize = 15;

/// Largest length or count any tier can express (32-bit field).
pub const WIRE_MAX_LEN: usize = u32::MAX as usize;

// ── Default safety limits ────────────────────────────────────
// Sized for untrusted input.  `Limits::wide()` lifts all three to the
// 32-bit wire ceiling for trusted producers.

/// Maximum nesting of List/Map containers.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Maximum byte length of a single String or Bytes payload (100 MiB).
pub const DEFAULT_MAX_STRING_BYTES: usize = 100 * 1024 * 1024;

/// Maximum element count of a List or entry count of a Map.
pub const DEFAULT_MAX_CONTAINER_ITEMS: usize = 1_000_000;
