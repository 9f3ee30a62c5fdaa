//! Property tests: round trips, canonical stability and decoder robustness
//! on arbitrary input.

use proptest::prelude::*;
use std::collections::HashMap;

use tagpack::{decode, encode, encode_canonical, fingerprint, Limits, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<u8>().prop_map(Value::UInt8),
        any::<u16>().prop_map(Value::UInt16),
        any::<u32>().prop_map(Value::UInt32),
        any::<u64>().prop_map(Value::UInt64),
        any::<i8>().prop_map(Value::Int8),
        any::<i16>().prop_map(Value::Int16),
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        // NaN never compares equal, so keep floats in the normal range.
        (-1.0e6f32..1.0e6f32).prop_map(Value::Float32),
        (-1.0e12f64..1.0e12f64).prop_map(Value::Float64),
        ".{0,40}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(Value::Bytes),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 64, 20, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..20).prop_map(Value::List),
            prop::collection::hash_map(".{0,12}", inner, 0..20).prop_map(Value::Map),
        ]
    })
}

/// Nesting level of the deepest container (0 for scalars).
fn depth_of(val: &Value) -> usize {
    match val {
        Value::List(items) if !items.is_empty() => 1 + items.iter().map(depth_of).max().unwrap_or(0),
        Value::Map(entries) if !entries.is_empty() => 1 + entries.values().map(depth_of).max().unwrap_or(0),
        _ => 0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn decode_inverts_encode(val in value()) {
        let limits = Limits::default();
        let wire = encode(&val, &limits).unwrap();
        prop_assert_eq!(decode(&wire, &limits).unwrap(), val);
    }

    #[test]
    fn canonical_bytes_are_stable(val in value()) {
        let limits = Limits::default();
        let first = encode_canonical(&val, &limits).unwrap();
        let decoded = decode(&first, &limits).unwrap();
        let second = encode_canonical(&decoded, &limits).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            fingerprint(&val, &limits).unwrap(),
            fingerprint(&decoded, &limits).unwrap()
        );
    }

    #[test]
    fn depth_limit_agrees_on_both_paths(val in value(), max_depth in 0usize..5) {
        let limits = Limits::new(max_depth, usize::MAX, usize::MAX);
        let fits = depth_of(&val) <= max_depth;
        prop_assert_eq!(encode(&val, &limits).is_ok(), fits);

        let wire = encode(&val, &Limits::wide()).unwrap();
        prop_assert_eq!(decode(&wire, &limits).is_ok(), fits);
    }

    #[test]
    fn arbitrary_bytes_never_panic(buf in prop::collection::vec(any::<u8>(), 0..256)) {
        let limits = Limits::new(16, 1024, 1024);
        let _ = decode(&buf, &limits);
    }

    #[test]
    fn truncation_is_always_an_error(val in value(), cut in any::<prop::sample::Index>()) {
        let limits = Limits::default();
        let wire = encode(&val, &limits).unwrap();
        // Any strict prefix of a non-empty encoding is missing bytes.
        let keep = cut.index(wire.len());
        prop_assume!(keep > 0);
        let err = decode(&wire[..keep], &limits).unwrap_err();
        prop_assert_eq!(err.code(), tagpack::ERR_INSUFFICIENT_DATA);
    }
}

#[test]
fn hash_map_built_in_any_order_fingerprints_equal() {
    let limits = Limits::default();
    let forward: HashMap<String, Value> =
        (0..32u32).map(|i| (i.to_string(), Value::UInt32(i))).collect();
    let backward: HashMap<String, Value> =
        (0..32u32).rev().map(|i| (i.to_string(), Value::UInt32(i))).collect();
    assert_eq!(
        fingerprint(&Value::Map(forward), &limits).unwrap(),
        fingerprint(&Value::Map(backward), &limits).unwrap()
    );
}
