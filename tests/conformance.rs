//! Wire conformance suite.
//!
//! Runs every vector from vectors/wire_vectors.json against
//! vectors/wire_expected.json.  Inputs are base64 so the files stay
//! portable across implementations; successful decodes are compared as
//! JSON, failures by error code.

use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;

use tagpack::json_adapter::value_to_json;
use tagpack::{decode, decode_exact, encode_canonical, CodecError, Limits, Value};

// ── Load conformance data ────────────────────────────────────

#[derive(Deserialize, Debug)]
struct VectorsFile {
    vectors: Vec<Vector>,
}

#[derive(Deserialize, Debug, Clone)]
struct Vector {
    test_id: String,
    input_b64: String,
    mode: String,
    #[serde(default)]
    limits: Limits,
}

#[derive(Deserialize, Debug)]
struct ExpectedFile {
    expected: HashMap<String, Expected>,
}

#[derive(Deserialize, Debug, Clone)]
struct Expected {
    // JSON `null` lands here as `None`; it is read back as `Value::Null`.
    #[serde(default)]
    json: Option<serde_json::Value>,
    #[serde(default)]
    reencode: bool,
    #[serde(default)]
    err: Option<String>,
}

#[derive(Debug, PartialEq)]
enum TestResult {
    Json(serde_json::Value),
    Err(String),
}

fn input_bytes(vec: &Vector) -> Vec<u8> {
    base64::engine::general_purpose::STANDARD
        .decode(&vec.input_b64)
        .expect("base64 decode failed")
}

fn run_decode(vec: &Vector) -> Result<Value, CodecError> {
    let raw = input_bytes(vec);
    match vec.mode.as_str() {
        "decode" => decode(&raw, &vec.limits),
        "decode_exact" => decode_exact(&raw, &vec.limits),
        other => panic!("unknown mode: {}", other),
    }
}

fn run_vector(vec: &Vector) -> TestResult {
    match run_decode(vec) {
        Ok(val) => TestResult::Json(value_to_json(&val).expect("decoded value has a JSON form")),
        Err(e) => TestResult::Err(e.code().to_string()),
    }
}

fn expected_to_result(exp: &Expected) -> TestResult {
    match exp.err {
        Some(ref err) => TestResult::Err(err.clone()),
        None => TestResult::Json(exp.json.clone().unwrap_or(serde_json::Value::Null)),
    }
}

fn load_vectors() -> (Vec<Vector>, HashMap<String, Expected>) {
    let vec_json = include_str!("vectors/wire_vectors.json");
    let exp_json = include_str!("vectors/wire_expected.json");

    let vectors: VectorsFile = serde_json::from_str(vec_json).expect("failed to parse vectors");
    let expected: ExpectedFile =
        serde_json::from_str(exp_json).expect("failed to parse expected");

    (vectors.vectors, expected.expected)
}

// ── Test runner ──────────────────────────────────────────────

#[test]
fn conformance_all_vectors() {
    let (vectors, expected) = load_vectors();

    let mut passed = 0;
    let mut failures: Vec<(String, TestResult, TestResult)> = Vec::new();

    for vec in &vectors {
        let exp = expected
            .get(&vec.test_id)
            .unwrap_or_else(|| panic!("no expected for {}", vec.test_id));
        let got = run_vector(vec);
        let want = expected_to_result(exp);

        if got == want {
            passed += 1;
        } else {
            failures.push((vec.test_id.clone(), got, want));
        }
    }

    eprintln!("CONFORMANCE: {}/{} PASS", passed, vectors.len());
    for (tid, got, want) in &failures {
        eprintln!("  FAIL {}: got={:?} expected={:?}", tid, got, want);
    }

    assert!(failures.is_empty(), "{} conformance tests failed", failures.len());
}

/// Minimal encodings with sorted keys must come back byte for byte.
#[test]
fn conformance_minimal_vectors_reencode_identically() {
    let (vectors, expected) = load_vectors();

    let mut checked = 0;
    for vec in &vectors {
        if !expected[&vec.test_id].reencode {
            continue;
        }
        let val = run_decode(vec).unwrap_or_else(|e| panic!("{}: {}", vec.test_id, e));
        let again = encode_canonical(&val, &vec.limits)
            .unwrap_or_else(|e| panic!("{}: re-encode failed: {}", vec.test_id, e));
        assert_eq!(again, input_bytes(vec), "{}: re-encoded bytes differ", vec.test_id);
        checked += 1;
    }
    assert!(checked > 30);
}

#[test]
fn every_vector_has_an_expectation() {
    let (vectors, expected) = load_vectors();
    assert_eq!(vectors.len(), expected.len());
    for vec in &vectors {
        assert!(expected.contains_key(&vec.test_id), "missing {}", vec.test_id);
    }
}

// ── Individual vector tests (for granular CI reporting) ──────

macro_rules! conformance_test {
    ($name:ident) => {
        #[test]
        fn $name() {
            let (vectors, expected) = load_vectors();
            let test_id = stringify!($name)
                .strip_prefix("test_")
                .unwrap_or(stringify!($name));

            let vec = vectors
                .iter()
                .find(|v| v.test_id == test_id)
                .unwrap_or_else(|| panic!("vector {} not found", test_id));
            let exp = expected
                .get(test_id)
                .unwrap_or_else(|| panic!("expected {} not found", test_id));

            let got = run_vector(vec);
            let want = expected_to_result(exp);
            assert_eq!(got, want, "{}: got={:?} expected={:?}", test_id, got, want);
        }
    };
}

conformance_test!(test_EMPTY_INPUT);
conformance_test!(test_UINT64_MAX);
conformance_test!(test_INT64_MIN);
conformance_test!(test_FLOAT32_1_5);
conformance_test!(test_FIXSTR_MULTIBYTE);
conformance_test!(test_STR16_16);
conformance_test!(test_STR32_NONMINIMAL);
conformance_test!(test_FIXLIST_UINT32);
conformance_test!(test_LIST16_NONMINIMAL);
conformance_test!(test_MAP32_NONMINIMAL);
conformance_test!(test_MAP_DUP_KEY_LAST_WINS);
conformance_test!(test_BYTES16_NONMINIMAL);
conformance_test!(test_NESTED_CONTAINERS);
conformance_test!(test_TRAILING_IGNORED);
conformance_test!(test_TRAILING_STRICT);
conformance_test!(test_UNKNOWN_FF);
conformance_test!(test_UNKNOWN_RESERVED_UINT128);
conformance_test!(test_STR16_SHORT_LENGTH);
conformance_test!(test_FIXLIST_MISSING_ITEM);
conformance_test!(test_LIST32_ABSENT_ITEMS);
conformance_test!(test_MAP_KEY_UINT8);
conformance_test!(test_UTF8_OVERLONG);
conformance_test!(test_UTF8_SURROGATE);
conformance_test!(test_UTF8_BAD_MAP_KEY);
conformance_test!(test_LIST32_HUGE_COUNT);
conformance_test!(test_STR32_HUGE_LENGTH);
conformance_test!(test_DEPTH_AT_LIMIT);
conformance_test!(test_DEPTH_OVER_LIMIT);
conformance_test!(test_DEPTH_EMPTY_LIST_AT_BOUNDARY);
conformance_test!(test_DEPTH_EMPTY_MAP_AT_BOUNDARY);
conformance_test!(test_DEPTH_ZERO_FORBIDS_ITEMS);
conformance_test!(test_DEPTH_ZERO_ALLOWS_EMPTY_LIST);
conformance_test!(test_DEPTH_ONE_ALLOWS_NESTED_EMPTY_LIST);
conformance_test!(test_STRING_OVER_LIMIT);
conformance_test!(test_BYTES_OVER_LIMIT);
conformance_test!(test_MAP_OVER_LIMIT);
