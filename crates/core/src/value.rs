//! Value types for query-string state
//!
//! This module defines:
//! - Value: tagged variant for everything a query string can carry
//! - QueryMapping: the decoded form of a full query component
//!
//! ## Value Model
//!
//! The enum has exactly 7 variants: Null, Bool, Int, Float, String, Array,
//! Object. The wire format is strings all the way down, so the model carries
//! an explicit coercion pair instead of ad hoc type guessing:
//!
//! - [`Value::from_literal`] revives a decoded wire string into a typed value
//! - [`Value::to_wire`] lowers a typed value into its wire shape before encoding
//!
//! The revival is lossy by design: the string `"42"` is indistinguishable
//! from the number `42` after a round trip. That ambiguity is a documented
//! property of the medium, not a defect.
//!
//! ## Type Equality
//!
//! Different types are never equal: `Int(1) != Float(1.0)`.
//! Float equality follows IEEE-754: `NaN != NaN`, `-0.0 == 0.0`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The decoded form of a query component: top-level keys to values.
pub type QueryMapping = HashMap<String, Value>;

/// Canonical value type for query-string state
///
/// Everything the driver stores or reads back is one of these variants.
/// JSON is a strict superset minus binary data (the wire format cannot
/// carry bytes, so there is no `Bytes` variant here).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point (IEEE-754)
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object with string keys
    Object(QueryMapping),
}

// Custom PartialEq for IEEE-754 float semantics and key-order-independent
// object comparison.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            // IEEE-754: NaN != NaN, -0.0 == 0.0
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            _ => false,
        }
    }
}

impl Value {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this is a string value
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if this is an array value
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if this is an object value
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Get as bool if this is a Bool value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as i64 if this is an Int value
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64 if this is a Float value
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as &str if this is a String value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as &[Value] if this is an Array value
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Get as &QueryMapping if this is an Object value
    pub fn as_object(&self) -> Option<&QueryMapping> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Consume as QueryMapping if this is an Object value
    pub fn into_object(self) -> Option<QueryMapping> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    // ========== Wire coercion pair ==========

    /// Revive a decoded wire string into a typed value.
    ///
    /// Applied in order: full integer parse, full finite float parse, the
    /// literal tokens `true`/`false`, a JSON parse attempt, then the raw
    /// string. An empty string stays an empty string (setting `""` is a
    /// genuine store, not a removal).
    pub fn from_literal(s: &str) -> Value {
        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        match s {
            "true" => return Value::Bool(true),
            "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(s) {
            return Value::from(json);
        }
        Value::String(s.to_string())
    }

    /// Recursively revive string leaves of a decoded mapping.
    ///
    /// The codec yields strings at every leaf; this walks the structure and
    /// applies [`Value::from_literal`] to each one.
    pub fn revive(self) -> Value {
        match self {
            Value::String(s) => Value::from_literal(&s),
            Value::Array(items) => Value::Array(items.into_iter().map(Value::revive).collect()),
            Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, v.revive())).collect())
            }
            other => other,
        }
    }

    /// Lower a typed value into its wire shape.
    ///
    /// Scalars become their literal string form; structure is preserved so
    /// the encoder renders nesting as brackets. `Null` stays `Null` and
    /// encodes as an empty value (`key=`).
    pub fn to_wire(self) -> Value {
        match self {
            Value::Bool(b) => Value::String(b.to_string()),
            Value::Int(i) => Value::String(i.to_string()),
            Value::Float(f) => Value::String(format_float(f)),
            Value::Array(items) => Value::Array(items.into_iter().map(Value::to_wire).collect()),
            Value::Object(map) => {
                Value::Object(map.into_iter().map(|(k, v)| (k, v.to_wire())).collect())
            }
            other => other,
        }
    }

    /// Coerce to the literal string form used by raw reads.
    ///
    /// `Null` has no literal (`None`); scalars stringify; structured values
    /// render as their JSON text.
    pub fn to_literal(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Bool(b) => Some(b.to_string()),
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(format_float(*f)),
            Value::String(s) => Some(s.clone()),
            Value::Array(_) | Value::Object(_) => {
                let json: serde_json::Value = self.clone().into();
                Some(json.to_string())
            }
        }
    }
}

/// Literal float form: integral floats keep a trailing `.0` so they revive
/// as floats, not integers.
fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.is_finite() {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

// ============================================================================
// From implementations for ergonomic API usage
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Vec<Value>> for Value {
    fn from(a: Vec<Value>) -> Self {
        Value::Array(a)
    }
}

impl From<QueryMapping> for Value {
    fn from(o: QueryMapping) -> Self {
        Value::Object(o)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

// ============================================================================
// serde_json interop
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(i) => serde_json::Value::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(arr) => {
                serde_json::Value::Array(arr.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Object(obj) => serde_json::Value::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}
