//! Per-call key/value tags
//!
//! `Tags` carries arbitrary caller-supplied pairs from the call site to the
//! formatter inside a [`LogRecord`](super::LogRecord). Only the l2met layout
//! renders them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Tag key that is meaningless as a tag and dropped by the logger
pub const PROGNAME_KEY: &str = "progname";

/// Scalar value for tags and mapping payloads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            // Debug keeps the fractional part: `1.0`, not `1`
            FieldValue::Float(fl) => write!(f, "{:?}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        // Values past i64::MAX keep their digits as text
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Null,
            serde_json::Value::Bool(b) => FieldValue::Bool(b),
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(FieldValue::Int)
                .or_else(|| n.as_f64().map(FieldValue::Float))
                .unwrap_or_else(|| FieldValue::String(n.to_string())),
            serde_json::Value::String(s) => FieldValue::String(s),
            other => FieldValue::String(other.to_string()),
        }
    }
}

/// Tag mapping attached to a single log call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tags {
    fields: HashMap<String, FieldValue>,
}

impl Tags {
    /// Create an empty tag mapping
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Add a tag
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a tag (mutable version)
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.fields.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Tags
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Tags {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_display_is_bare() {
        assert_eq!(FieldValue::from("with space").to_string(), "with space");
        assert_eq!(FieldValue::from(9001).to_string(), "9001");
        assert_eq!(FieldValue::from(true).to_string(), "true");
        assert_eq!(FieldValue::Null.to_string(), "");
    }

    #[test]
    fn test_float_keeps_fractional_form() {
        assert_eq!(FieldValue::from(1.0).to_string(), "1.0");
        assert_eq!(FieldValue::from(0.25).to_string(), "0.25");
        assert_eq!(FieldValue::from(-3.0).to_string(), "-3.0");
    }

    #[test]
    fn test_u64_overflow_keeps_digits() {
        assert_eq!(
            FieldValue::from(u64::MAX),
            FieldValue::String(u64::MAX.to_string())
        );
        assert_eq!(FieldValue::from(7u64), FieldValue::Int(7));
    }

    #[test]
    fn test_from_json_value() {
        assert_eq!(FieldValue::from(serde_json::json!(3)), FieldValue::Int(3));
        assert_eq!(FieldValue::from(serde_json::json!(1.5)), FieldValue::Float(1.5));
        assert_eq!(
            FieldValue::from(serde_json::json!([1, 2])),
            FieldValue::String("[1,2]".to_string())
        );
    }

    #[test]
    fn test_tags_builder_overwrites() {
        let tags = Tags::new().with("foo", "bar").with("foo", "baz");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("foo"), Some(&FieldValue::from("baz")));
    }

    #[test]
    fn test_tags_from_iter() {
        let tags: Tags = vec![("energy", 9001), ("count", 2)].into_iter().collect();
        assert_eq!(tags.get("energy"), Some(&FieldValue::Int(9001)));
        assert!(!tags.is_empty());
    }
}
