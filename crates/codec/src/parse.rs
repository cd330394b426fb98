//! Bracket-notation query parser
//!
//! Turns a raw query component (without the leading `?`) into a nested
//! [`QueryMapping`]. Structure lives in *literal* brackets in the raw key:
//! `a[b]=1` nests, `a[]=1&a[]=2` appends, and percent-decoding applies to
//! each segment's content afterwards, so a percent-encoded bracket inside a
//! segment name stays part of the name.
//!
//! Parsing is total: there is no error case. Malformed pairs degrade to
//! flat string keys, nesting beyond [`MAX_PARSE_DEPTH`] collapses into one
//! literal trailing key, and a duplicate scalar key keeps the last value.
//! Every decoded leaf is a `Value::String`; typing is the engine's concern.

use crate::percent;
use urlstate_core::{QueryMapping, Value};

/// Maximum bracket nesting depth; deeper levels collapse into one literal
/// trailing key rather than failing.
pub const MAX_PARSE_DEPTH: usize = 10;

/// One step of a raw key: descend into a named entry, or append to an array.
#[derive(Debug, PartialEq, Eq)]
enum KeySegment {
    /// `name` or `[name]`
    Entry(String),
    /// `[]`
    Append,
}

/// Parse a raw query component into a nested mapping.
///
/// An empty input yields an empty mapping. Empty pairs (from `&&` or a
/// trailing `&`) are skipped. A pair without `=` maps the key to an empty
/// string.
pub fn parse_query(raw: &str) -> QueryMapping {
    let mut root = Value::Object(QueryMapping::new());

    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let segments = parse_key(raw_key);
        // A nameless pair ("=v") or a bare append ("[]=v") has no slot in
        // the mapping; drop it rather than disturb the root.
        if !matches!(segments.first(), Some(KeySegment::Entry(_))) {
            continue;
        }
        let value = Value::String(percent::decode(raw_value));
        insert(&mut root, &segments, value);
    }

    match root {
        Value::Object(map) => map,
        _ => QueryMapping::new(),
    }
}

/// Split a raw key into its bracket segments.
///
/// The head runs to the first `[`; each following `[...]` group is one
/// segment (`[]` appends). Past [`MAX_PARSE_DEPTH`] groups, or at the first
/// malformed group (unclosed bracket), the remaining raw text becomes one
/// literal segment.
fn parse_key(raw_key: &str) -> Vec<KeySegment> {
    let mut segments = Vec::new();

    let head_end = raw_key.find('[').unwrap_or(raw_key.len());
    let head = &raw_key[..head_end];
    if !head.is_empty() {
        segments.push(KeySegment::Entry(percent::decode(head)));
    }

    let mut rest = &raw_key[head_end..];
    let mut depth = 0;
    while !rest.is_empty() {
        let well_formed = rest.starts_with('[');
        let close = rest.find(']');
        match (well_formed, close) {
            (true, Some(close)) if depth < MAX_PARSE_DEPTH => {
                let inner = &rest[1..close];
                if inner.is_empty() {
                    segments.push(KeySegment::Append);
                } else {
                    segments.push(KeySegment::Entry(percent::decode(inner)));
                }
                rest = &rest[close + 1..];
                depth += 1;
            }
            _ => {
                // Depth exceeded or malformed remainder: one literal segment
                segments.push(KeySegment::Entry(percent::decode(rest)));
                break;
            }
        }
    }

    segments
}

/// Insert a leaf following the segments, creating containers on the way.
/// A container of the wrong shape at an intermediate step is replaced
/// (last write wins, matching the duplicate-key rule).
fn insert(target: &mut Value, segments: &[KeySegment], value: Value) {
    let (segment, rest) = match segments.split_first() {
        Some(split) => split,
        None => {
            *target = value;
            return;
        }
    };

    match segment {
        KeySegment::Entry(name) => {
            if !target.is_object() {
                *target = Value::Object(QueryMapping::new());
            }
            if let Value::Object(map) = target {
                let slot = map.entry(name.clone()).or_insert(Value::Null);
                insert(slot, rest, value);
            }
        }
        KeySegment::Append => {
            if !target.is_array() {
                *target = Value::Array(Vec::new());
            }
            if let Value::Array(items) = target {
                items.push(Value::Null);
                if let Some(slot) = items.last_mut() {
                    insert(slot, rest, value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get<'a>(map: &'a QueryMapping, key: &str) -> &'a Value {
        map.get(key).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_mapping() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_flat_pairs() {
        let map = parse_query("foo=1&bar=2&baz=3");
        assert_eq!(map.len(), 3);
        assert_eq!(get(&map, "foo"), &Value::String("1".to_string()));
        assert_eq!(get(&map, "baz"), &Value::String("3".to_string()));
    }

    #[test]
    fn test_pair_without_equals_maps_to_empty_string() {
        let map = parse_query("flag");
        assert_eq!(get(&map, "flag"), &Value::String(String::new()));
    }

    #[test]
    fn test_empty_pairs_skipped() {
        let map = parse_query("a=1&&b=2&");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_nested_object() {
        let map = parse_query("app[foo]=1&app[baz]=3");
        let app = get(&map, "app").as_object().unwrap();
        assert_eq!(app.get("foo"), Some(&Value::String("1".to_string())));
        assert_eq!(app.get("baz"), Some(&Value::String("3".to_string())));
    }

    #[test]
    fn test_deeply_nested_object() {
        let map = parse_query("a[b][c]=x");
        let c = get(&map, "a")
            .as_object()
            .unwrap()
            .get("b")
            .unwrap()
            .as_object()
            .unwrap()
            .get("c")
            .unwrap();
        assert_eq!(c, &Value::String("x".to_string()));
    }

    #[test]
    fn test_array_append() {
        let map = parse_query("list[]=a&list[]=b");
        assert_eq!(
            get(&map, "list"),
            &Value::Array(vec![
                Value::String("a".to_string()),
                Value::String("b".to_string())
            ])
        );
    }

    #[test]
    fn test_nested_array_of_objects_appends_per_occurrence() {
        let map = parse_query("items[][id]=1&items[][id]=2");
        let items = get(&map, "items").as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[1].as_object().unwrap().get("id"),
            Some(&Value::String("2".to_string()))
        );
    }

    #[test]
    fn test_percent_decoding_in_keys_and_values() {
        let map = parse_query("greeting%20key=hello%20world");
        assert_eq!(
            get(&map, "greeting key"),
            &Value::String("hello world".to_string())
        );
    }

    #[test]
    fn test_plus_decodes_as_space_in_value() {
        let map = parse_query("q=a+b");
        assert_eq!(get(&map, "q"), &Value::String("a b".to_string()));
    }

    #[test]
    fn test_encoded_bracket_stays_in_segment_name() {
        // %5B is data, not structure
        let map = parse_query("a%5Bb%5D=1");
        assert_eq!(get(&map, "a[b]"), &Value::String("1".to_string()));
    }

    #[test]
    fn test_duplicate_scalar_key_keeps_last() {
        let map = parse_query("k=1&k=2");
        assert_eq!(get(&map, "k"), &Value::String("2".to_string()));
    }

    #[test]
    fn test_value_with_equals_sign() {
        // Only the first '=' separates key from value
        let map = parse_query("eq=a=b");
        assert_eq!(get(&map, "eq"), &Value::String("a=b".to_string()));
    }

    #[test]
    fn test_depth_limit_collapses_remainder() {
        // 12 bracket levels; levels beyond MAX_PARSE_DEPTH collapse into one
        // literal trailing key
        let key = format!("a{}", "[b]".repeat(12));
        let map = parse_query(&format!("{}=x", key));

        let mut current = get(&map, "a");
        for _ in 0..MAX_PARSE_DEPTH {
            current = current.as_object().unwrap().get("b").unwrap();
        }
        let obj = current.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        // The two leftover levels survive as raw text
        assert_eq!(obj.get("[b][b]"), Some(&Value::String("x".to_string())));
    }

    #[test]
    fn test_unclosed_bracket_degrades_to_literal() {
        let map = parse_query("a[b=1");
        assert_eq!(get(&map, "a"), &Value::Object(QueryMapping::from([(
            "[b".to_string(),
            Value::String("1".to_string()),
        )])));
    }

    #[test]
    fn test_conflicting_shapes_last_write_wins() {
        let map = parse_query("a[]=1&a[b]=2");
        let a = get(&map, "a").as_object().unwrap();
        assert_eq!(a.get("b"), Some(&Value::String("2".to_string())));
    }

    #[test]
    fn test_nameless_pairs_are_dropped() {
        let map = parse_query("a=1&=ghost&[]=ghost&b=2");
        assert_eq!(map.len(), 2);
        assert_eq!(get(&map, "a"), &Value::String("1".to_string()));
        assert_eq!(get(&map, "b"), &Value::String("2".to_string()));
    }

    #[test]
    fn test_numeric_bracket_segment_is_object_key() {
        let map = parse_query("a[0]=x");
        let a = get(&map, "a").as_object().unwrap();
        assert_eq!(a.get("0"), Some(&Value::String("x".to_string())));
    }
}
