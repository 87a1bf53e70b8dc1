#![deny(missing_docs)]

//! # Document Value
//!
//! A format-neutral tree of mappings, sequences and scalars. Both the compiler
//! and the encoders work against this type instead of a concrete JSON or YAML
//! library value, so either encoder can be swapped in at the call site.
//!
//! Mappings preserve insertion order.

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

/// Ordered string-keyed mapping.
pub type Mapping = IndexMap<String, DocValue>;

/// A JSON-model number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Non-negative integer.
    PosInt(u64),
    /// Negative integer.
    NegInt(i64),
    /// Floating point value.
    Float(f64),
}

/// A node in a generated document.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DocValue {
    /// `null`
    #[default]
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Any numeric scalar.
    Number(Number),
    /// A string scalar.
    String(String),
    /// An ordered sequence.
    Sequence(Vec<DocValue>),
    /// An insertion-ordered mapping.
    Mapping(Mapping),
}

impl DocValue {
    /// Looks up `key` when this node is a mapping.
    pub fn get(&self, key: &str) -> Option<&DocValue> {
        match self {
            DocValue::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    /// Returns the string slice of a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DocValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean of a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DocValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the inner mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            DocValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the inner sequence.
    pub fn as_sequence(&self) -> Option<&[DocValue]> {
        match self {
            DocValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// True for `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    /// True for mappings and sequences.
    pub fn is_container(&self) -> bool {
        matches!(self, DocValue::Mapping(_) | DocValue::Sequence(_))
    }

    /// True for a mapping or sequence with no children.
    pub fn is_empty_container(&self) -> bool {
        match self {
            DocValue::Mapping(map) => map.is_empty(),
            DocValue::Sequence(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::PosInt(n) => serializer.serialize_u64(n),
            Number::NegInt(n) => serializer.serialize_i64(n),
            Number::Float(f) => serializer.serialize_f64(f),
        }
    }
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocValue::Null => serializer.serialize_unit(),
            DocValue::Bool(b) => serializer.serialize_bool(*b),
            DocValue::Number(n) => n.serialize(serializer),
            DocValue::String(s) => serializer.serialize_str(s),
            DocValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            DocValue::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

struct DocValueVisitor;

impl<'de> Visitor<'de> for DocValueVisitor {
    type Value = DocValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping, sequence, string, number, boolean or null")
    }

    fn visit_bool<E>(self, v: bool) -> Result<DocValue, E> {
        Ok(DocValue::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<DocValue, E> {
        Ok(DocValue::from(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<DocValue, E> {
        Ok(DocValue::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<DocValue, E> {
        Ok(DocValue::from(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<DocValue, E> {
        Ok(DocValue::String(v.to_string()))
    }

    fn visit_string<E>(self, v: String) -> Result<DocValue, E> {
        Ok(DocValue::String(v))
    }

    fn visit_unit<E>(self) -> Result<DocValue, E> {
        Ok(DocValue::Null)
    }

    fn visit_none<E>(self) -> Result<DocValue, E> {
        Ok(DocValue::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<DocValue, D::Error> {
        DocValue::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<DocValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(DocValue::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<DocValue, A::Error> {
        let mut map = Mapping::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, DocValue>()? {
            map.insert(key, value);
        }
        Ok(DocValue::Mapping(map))
    }
}

impl<'de> Deserialize<'de> for DocValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocValueVisitor)
    }
}

impl From<serde_json::Value> for DocValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => DocValue::Null,
            Json::Bool(b) => DocValue::Bool(b),
            Json::Number(n) => {
                if let Some(u) = n.as_u64() {
                    DocValue::from(u)
                } else if let Some(i) = n.as_i64() {
                    DocValue::from(i)
                } else {
                    n.as_f64().map_or(DocValue::Null, DocValue::from)
                }
            }
            Json::String(s) => DocValue::String(s),
            Json::Array(items) => DocValue::Sequence(items.into_iter().map(Into::into).collect()),
            Json::Object(map) => {
                DocValue::Mapping(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<bool> for DocValue {
    fn from(v: bool) -> Self {
        DocValue::Bool(v)
    }
}

impl From<u64> for DocValue {
    fn from(v: u64) -> Self {
        DocValue::Number(Number::PosInt(v))
    }
}

impl From<usize> for DocValue {
    fn from(v: usize) -> Self {
        DocValue::Number(Number::PosInt(v as u64))
    }
}

impl From<i64> for DocValue {
    fn from(v: i64) -> Self {
        if v < 0 {
            DocValue::Number(Number::NegInt(v))
        } else {
            DocValue::Number(Number::PosInt(v as u64))
        }
    }
}

impl From<f64> for DocValue {
    fn from(v: f64) -> Self {
        DocValue::Number(Number::Float(v))
    }
}

impl From<&str> for DocValue {
    fn from(v: &str) -> Self {
        DocValue::String(v.to_string())
    }
}

impl From<String> for DocValue {
    fn from(v: String) -> Self {
        DocValue::String(v)
    }
}

impl From<Vec<DocValue>> for DocValue {
    fn from(v: Vec<DocValue>) -> Self {
        DocValue::Sequence(v)
    }
}

impl From<Mapping> for DocValue {
    fn from(v: Mapping) -> Self {
        DocValue::Mapping(v)
    }
}

impl<T: Into<DocValue>> From<Option<T>> for DocValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(DocValue::Null, Into::into)
    }
}
