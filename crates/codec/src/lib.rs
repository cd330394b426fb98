//! Bracket-notation query-string codec
//!
//! The wire format of the urlstate driver: a flat `key=value&...` string
//! whose keys carry structure in bracket notation (`a[b]=1` nests,
//! `a[]=1&a[]=2` appends). This crate converts between that string and a
//! nested [`QueryMapping`](urlstate_core::QueryMapping).
//!
//! Decoding is total and yields string leaves; encoding is deterministic
//! (sorted keys) and percent-encodes every segment name and value. For any
//! mapping with string leaves whose arrays hold only scalars,
//! `parse_query(stringify_query(m))` is structurally equal to `m`.
//!
//! Arrays with structured elements are where the notation itself is lossy:
//! `[{a:1,b:2}]` encodes to `k[][a]=1&k[][b]=2`, and each `[]` occurrence
//! appends on re-parse, yielding `[{a:1},{b:2}]`. This matches the
//! bracket-notation convention this codec interoperates with; callers who
//! need faithful structured arrays nest them under object keys instead.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod parse;
pub mod percent;
pub mod stringify;

pub use parse::{parse_query, MAX_PARSE_DEPTH};
pub use stringify::stringify_query;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use urlstate_core::{QueryMapping, Value};

    fn arb_key() -> impl Strategy<Value = String> {
        // Printable text including characters the codec must escape
        proptest::string::string_regex("[a-z&=\\[\\]% .+:/\\-]{1,8}")
            .unwrap()
            .prop_filter("keys are non-empty", |s| !s.is_empty())
    }

    fn arb_leaf() -> impl Strategy<Value = Value> {
        proptest::string::string_regex("[a-zA-Z0-9&=\\[\\]% .+:/\\-]{0,16}")
            .unwrap()
            .prop_map(Value::String)
    }

    /// String-leaf values up to three levels deep. No empty containers (an
    /// empty container encodes to nothing and cannot round-trip) and no
    /// structured array elements (the notation fragments those; see the
    /// crate docs).
    fn arb_value() -> impl Strategy<Value = Value> {
        arb_leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(arb_leaf(), 1..4).prop_map(Value::Array),
                proptest::collection::hash_map(arb_key(), inner, 1..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_mapping() -> impl Strategy<Value = QueryMapping> {
        proptest::collection::hash_map(arb_key(), arb_value(), 0..5)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn round_trip_is_structural_identity(mapping in arb_mapping()) {
            let encoded = stringify_query(&mapping);
            let decoded = parse_query(&encoded);
            prop_assert_eq!(Value::Object(decoded), Value::Object(mapping));
        }

        #[test]
        fn encoding_is_deterministic(mapping in arb_mapping()) {
            prop_assert_eq!(stringify_query(&mapping), stringify_query(&mapping));
        }

        #[test]
        fn parse_never_panics(raw in "[ -~]{0,64}") {
            let _ = parse_query(&raw);
        }
    }
}
