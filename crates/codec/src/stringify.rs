//! Bracket-notation query encoder
//!
//! Renders a nested [`QueryMapping`] back into a query component the parser
//! accepts: nested objects as `parent[child]=v`, arrays as `parent[]=v`,
//! percent-encoding applied to every segment name and value. Object keys
//! are emitted in sorted order so identical mappings always produce
//! byte-identical query strings.
//!
//! An empty mapping (and any empty container inside one) encodes to
//! nothing: the result for an empty mapping is the empty string.

use crate::percent;
use urlstate_core::{QueryMapping, Value};

/// Encode a nested mapping into a query component (no leading `?`).
pub fn stringify_query(mapping: &QueryMapping) -> String {
    let mut pairs = Vec::new();
    let mut keys: Vec<&String> = mapping.keys().collect();
    keys.sort();
    for key in keys {
        write_value(&mut pairs, percent::encode(key), &mapping[key]);
    }
    pairs.join("&")
}

fn write_value(pairs: &mut Vec<String>, key: String, value: &Value) {
    match value {
        Value::Object(map) => {
            let mut names: Vec<&String> = map.keys().collect();
            names.sort();
            for name in names {
                let child_key = format!("{}[{}]", key, percent::encode(name));
                write_value(pairs, child_key, &map[name]);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_value(pairs, format!("{}[]", key), item);
            }
        }
        Value::Null => pairs.push(format!("{}=", key)),
        Value::Bool(b) => pairs.push(format!("{}={}", key, b)),
        Value::Int(i) => pairs.push(format!("{}={}", key, i)),
        Value::Float(f) => pairs.push(format!("{}={}", key, f)),
        Value::String(s) => pairs.push(format!("{}={}", key, percent::encode(s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_query;

    fn mapping(entries: Vec<(&str, Value)>) -> QueryMapping {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_empty_mapping_is_empty_string() {
        assert_eq!(stringify_query(&QueryMapping::new()), "");
    }

    #[test]
    fn test_flat_pairs_sorted() {
        let map = mapping(vec![
            ("foo", Value::String("1".to_string())),
            ("bar", Value::String("2".to_string())),
        ]);
        assert_eq!(stringify_query(&map), "bar=2&foo=1");
    }

    #[test]
    fn test_nested_object_renders_brackets() {
        let map = mapping(vec![(
            "app",
            Value::Object(mapping(vec![("foo", Value::String("1".to_string()))])),
        )]);
        assert_eq!(stringify_query(&map), "app[foo]=1");
    }

    #[test]
    fn test_array_renders_empty_brackets() {
        let map = mapping(vec![(
            "list",
            Value::Array(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string()),
            ]),
        )]);
        assert_eq!(stringify_query(&map), "list[]=a&list[]=b");
    }

    #[test]
    fn test_null_renders_empty_value() {
        let map = mapping(vec![("k", Value::Null)]);
        assert_eq!(stringify_query(&map), "k=");
    }

    #[test]
    fn test_values_percent_encoded() {
        let map = mapping(vec![("q", Value::String("a b&c".to_string()))]);
        assert_eq!(stringify_query(&map), "q=a%20b%26c");
    }

    #[test]
    fn test_segment_names_percent_encoded() {
        // A bracket inside a key name is data, not structure
        let map = mapping(vec![(
            "outer",
            Value::Object(mapping(vec![("a[b]", Value::String("1".to_string()))])),
        )]);
        assert_eq!(stringify_query(&map), "outer[a%5Bb%5D]=1");
    }

    #[test]
    fn test_empty_containers_are_omitted() {
        let map = mapping(vec![
            ("empty_obj", Value::Object(QueryMapping::new())),
            ("empty_arr", Value::Array(Vec::new())),
            ("kept", Value::String("x".to_string())),
        ]);
        assert_eq!(stringify_query(&map), "kept=x");
    }

    #[test]
    fn test_deterministic_output() {
        let map = mapping(vec![
            ("b", Value::String("2".to_string())),
            ("a", Value::String("1".to_string())),
            ("c", Value::String("3".to_string())),
        ]);
        let first = stringify_query(&map);
        for _ in 0..4 {
            assert_eq!(stringify_query(&map), first);
        }
    }

    #[test]
    fn test_round_trip_through_parser() {
        let map = mapping(vec![
            ("plain", Value::String("hello world".to_string())),
            (
                "nested",
                Value::Object(mapping(vec![
                    ("a", Value::String("1".to_string())),
                    (
                        "deep",
                        Value::Object(mapping(vec![("b", Value::String("2".to_string()))])),
                    ),
                ])),
            ),
            (
                "list",
                Value::Array(vec![
                    Value::String("x".to_string()),
                    Value::String("y".to_string()),
                ]),
            ),
        ]);
        let encoded = stringify_query(&map);
        assert_eq!(parse_query(&encoded), map);
    }
}
