//! Key paths into nested query state
//!
//! Storage keys and the configured namespace are dotted paths
//! (`user.profile.name`, `items[0].id`) addressing a location inside the
//! decoded query mapping. This module defines the path type and the
//! get/set/delete/exists operations the engine builds its key semantics on.
//!
//! All operations are total. Writes create intermediate containers as
//! needed (a `Key` segment creates an object, an `Index` segment an array)
//! and replace a mismatched intermediate outright: the wire format is
//! last-write-wins, and the path layer matches it. Reads and deletes on a
//! missing or type-mismatched location simply report absence.

use crate::value::{QueryMapping, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for key-path parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// Empty key segment in path
    #[error("empty key in path at position {0}")]
    EmptyKey(usize),
    /// Unclosed bracket
    #[error("unclosed bracket starting at position {0}")]
    UnclosedBracket(usize),
    /// Invalid array index
    #[error("invalid array index at position {0}: {1}")]
    InvalidIndex(usize, String),
}

/// A segment in a key path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Object key: `.foo`
    Key(String),
    /// Array index: `[0]`
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, ".{}", k),
            PathSegment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// A path into the decoded query mapping
///
/// Composed of key segments (object property access) and index segments
/// (array element access). The empty path is the root and addresses the
/// whole mapping.
///
/// # Path Syntax
///
/// | Syntax | Meaning | Example |
/// |--------|---------|---------|
/// | `key` | Object property | `user` |
/// | `key1.key2` | Nested property | `user.name` |
/// | `key[n]` | Property then index | `items[0]` |
/// | (empty) | Root | `` |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// Create the root path (empty path)
    pub fn root() -> Self {
        KeyPath {
            segments: Vec::new(),
        }
    }

    /// Create a path from a vector of segments
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        KeyPath { segments }
    }

    /// Get the path segments
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Append a key segment (builder pattern)
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(PathSegment::Key(key.into()));
        self
    }

    /// Append an index segment (builder pattern)
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(PathSegment::Index(idx));
        self
    }

    /// Convert to a string representation
    pub fn to_path_string(&self) -> String {
        let mut result = String::new();
        for seg in &self.segments {
            match seg {
                PathSegment::Key(k) => {
                    if !result.is_empty() {
                        result.push('.');
                    }
                    result.push_str(k);
                }
                PathSegment::Index(i) => {
                    result.push('[');
                    result.push_str(&i.to_string());
                    result.push(']');
                }
            }
        }
        result
    }
}

impl FromStr for KeyPath {
    type Err = PathParseError;

    /// Parse a path from a string
    ///
    /// Supported syntax: `foo`, `foo.bar`, `foo[0]`, `foo[0].bar`.
    /// Key segments may contain any character except `.` and `[`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(KeyPath::root());
        }

        let mut segments = Vec::new();
        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] == '.' {
                i += 1;
                if i >= chars.len() {
                    return Err(PathParseError::EmptyKey(i));
                }
            }

            if chars[i] == '[' {
                let start = i;
                i += 1;
                let idx_start = i;
                while i < chars.len() && chars[i] != ']' {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(PathParseError::UnclosedBracket(start));
                }
                let idx_str: String = chars[idx_start..i].iter().collect();
                let idx = idx_str
                    .parse::<usize>()
                    .map_err(|_| PathParseError::InvalidIndex(idx_start, idx_str))?;
                segments.push(PathSegment::Index(idx));
                i += 1; // closing bracket
            } else {
                let key_start = i;
                while i < chars.len() && chars[i] != '.' && chars[i] != '[' {
                    i += 1;
                }
                if i == key_start {
                    return Err(PathParseError::EmptyKey(key_start));
                }
                let key: String = chars[key_start..i].iter().collect();
                segments.push(PathSegment::Key(key));
            }
        }

        Ok(KeyPath { segments })
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_path_string())
    }
}

// =============================================================================
// Path Operations
// =============================================================================

/// Get the value at a path within a mapping
///
/// Returns `None` if the path doesn't exist or traversal hits a type
/// mismatch (a scalar where a container was expected).
pub fn get_at_path<'a>(root: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(obj)) => obj.get(key)?,
            (PathSegment::Index(idx), Value::Array(arr)) => arr.get(*idx)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Check whether a path exists within a mapping
pub fn path_exists(root: &Value, path: &KeyPath) -> bool {
    get_at_path(root, path).is_some()
}

/// Set the value at a path, creating intermediate containers as needed
///
/// A key segment descends into an object, an index segment into an array;
/// a missing intermediate is created and a mismatched one is replaced.
/// Writing past an array's end pads the gap with `Null` (which encodes to
/// an empty value on the wire). Setting at the root replaces the whole
/// value.
pub fn set_at_path(root: &mut Value, path: &KeyPath, value: Value) {
    let (segment, rest) = match path.segments().split_first() {
        Some(split) => split,
        None => {
            *root = value;
            return;
        }
    };
    let rest = KeyPath::from_segments(rest.to_vec());

    match segment {
        PathSegment::Key(key) => {
            if !root.is_object() {
                *root = Value::Object(QueryMapping::new());
            }
            if let Value::Object(obj) = root {
                let slot = obj.entry(key.clone()).or_insert(Value::Null);
                set_at_path(slot, &rest, value);
            }
        }
        PathSegment::Index(idx) => {
            if !root.is_array() {
                *root = Value::Array(Vec::new());
            }
            if let Value::Array(arr) = root {
                if *idx >= arr.len() {
                    arr.resize(*idx + 1, Value::Null);
                }
                set_at_path(&mut arr[*idx], &rest, value);
            }
        }
    }
}

/// Delete the value at a path
///
/// Returns `true` if something was removed. A missing path or a traversal
/// mismatch is reported as `false`, never an error. Array deletion shifts
/// subsequent elements left. The root is not deletable.
pub fn delete_at_path(root: &mut Value, path: &KeyPath) -> bool {
    if path.is_root() {
        return false;
    }

    let segments = path.segments();
    let (parent_segments, last_segment) = segments.split_at(segments.len() - 1);
    let last_segment = &last_segment[0];

    let mut current = root;
    for segment in parent_segments {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(obj)) => match obj.get_mut(key) {
                Some(v) => v,
                None => return false,
            },
            (PathSegment::Index(idx), Value::Array(arr)) => match arr.get_mut(*idx) {
                Some(v) => v,
                None => return false,
            },
            _ => return false,
        };
    }

    match (last_segment, current) {
        (PathSegment::Key(key), Value::Object(obj)) => obj.remove(key).is_some(),
        (PathSegment::Index(idx), Value::Array(arr)) => {
            if *idx < arr.len() {
                arr.remove(*idx);
                true
            } else {
                false
            }
        }
        _ => false,
    }
}
