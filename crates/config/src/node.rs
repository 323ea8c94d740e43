//! In-memory representation of configuration data.
//!
//! Responsibilities:
//! - Define the `Node` sum type shared by sections and codecs.
//! - Define `Mapping`, the insertion-ordered, key-unique container that backs
//!   every configuration section.
//! - Provide typed extraction through the `FromNode` trait.
//!
//! Does NOT handle:
//! - Path resolution (see `section.rs`).
//! - Textual encoding (see `codec/`).
//!
//! Invariants:
//! - Keys within a `Mapping` are unique; inserting an existing key replaces
//!   the value in place and keeps its position.
//! - `Mapping` equality ignores key order.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single unit of configuration data.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Mapping),
}

impl Node {
    /// Human-readable name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Node::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            Node::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Node::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Node::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the mapping held by this node, replacing any other value with
    /// an empty mapping first.
    pub fn make_mapping(&mut self) -> &mut Mapping {
        if !self.is_mapping() {
            *self = Node::Mapping(Mapping::new());
        }
        match self {
            Node::Mapping(m) => m,
            _ => unreachable!("node was just replaced with a mapping"),
        }
    }

    /// Converts this node into `T`, if the conversion rules of `T` allow it.
    pub fn get_as<T: FromNode>(&self) -> Option<T> {
        T::from_node(self)
    }
}

impl fmt::Display for Node {
    /// Scalars render as plain text; containers render as flow-style JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => f.write_str("null"),
            Node::Bool(b) => write!(f, "{b}"),
            Node::Integer(i) => write!(f, "{i}"),
            Node::Float(x) => write!(f, "{x}"),
            Node::String(s) => f.write_str(s),
            Node::Sequence(_) | Node::Mapping(_) => {
                let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

macro_rules! node_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Integer(i64::from(value))
                }
            }
        )*
    };
}

node_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(f64::from(value))
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Node::Mapping(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(values: Vec<T>) -> Self {
        Node::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

// =============================================================================
// Mapping
// =============================================================================

/// Insertion-ordered map from string keys to nodes.
///
/// Configuration documents are small, so entries live in a vector and lookups
/// scan linearly. This keeps file order stable across load and save.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(String, Node)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Inserts `value` under `key`, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Returns the node under `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with(&mut self, key: &str, default: impl FnOnce() -> Node) -> &mut Node {
        let index = match self.position(key) {
            Some(index) => index,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Mapping::new();
        for (key, value) in iter {
            mapping.insert(key, value);
        }
        mapping
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// =============================================================================
// Serde
// =============================================================================

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::String(s) => serializer.serialize_str(s),
            Node::Sequence(items) => items.serialize(serializer),
            Node::Mapping(mapping) => mapping.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a configuration value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Node, E> {
        Ok(Node::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Node, E> {
        Ok(Node::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Node, E> {
        // Values beyond i64 keep their magnitude as a float.
        Ok(i64::try_from(v).map_or(Node::Float(v as f64), Node::Integer))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Node, E> {
        Ok(Node::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Node, E> {
        Ok(Node::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Node, E> {
        Ok(Node::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Node, E> {
        Ok(Node::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Node, D::Error> {
        Node::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Node, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Node::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Node, A::Error> {
        let mut mapping = Mapping::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Node>()? {
            mapping.insert(key, value);
        }
        Ok(Node::Mapping(mapping))
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

impl<'de> Deserialize<'de> for Mapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Node::deserialize(deserializer)? {
            Node::Mapping(mapping) => Ok(mapping),
            other => Err(de::Error::invalid_type(
                de::Unexpected::Other(other.type_name()),
                &"a mapping",
            )),
        }
    }
}

// =============================================================================
// Typed extraction
// =============================================================================

/// Conversion from a stored node into a Rust value.
///
/// Conversions are lenient: integers widen to floats, integral floats narrow
/// to integers, and strings parse into numbers or booleans when they do so
/// unambiguously. A failed conversion yields `None`, never a panic.
pub trait FromNode: Sized {
    fn from_node(node: &Node) -> Option<Self>;
}

impl FromNode for Node {
    fn from_node(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}

impl FromNode for Mapping {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_mapping().cloned()
    }
}

impl FromNode for bool {
    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::Bool(b) => Some(*b),
            Node::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            Node::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            _ => None,
        }
    }
}

fn integral_float(f: f64) -> Option<i64> {
    // i64::MAX is not representable as f64; the upper bound is exclusive.
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.is_finite() && f.fract() == 0.0 && in_range).then_some(f as i64)
}

macro_rules! from_node_int {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Option<Self> {
                    match node {
                        Node::Integer(i) => <$ty>::try_from(*i).ok(),
                        Node::Float(f) => integral_float(*f).and_then(|i| <$ty>::try_from(i).ok()),
                        Node::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_node_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

macro_rules! from_node_float {
    ($($ty:ty),*) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Option<Self> {
                    match node {
                        Node::Float(f) => Some(*f as $ty),
                        Node::Integer(i) => Some(*i as $ty),
                        Node::String(s) => s.trim().parse::<$ty>().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

from_node_float!(f32, f64);

impl FromNode for String {
    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::String(s) => Some(s.clone()),
            Node::Bool(_) | Node::Integer(_) | Node::Float(_) => Some(node.to_string()),
            _ => None,
        }
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &Node) -> Option<Self> {
        node.as_sequence()?.iter().map(T::from_node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_insert_replaces_in_place() {
        let mut mapping = Mapping::new();
        mapping.insert("a", 1);
        mapping.insert("b", 2);
        let previous = mapping.insert("a", 3);

        assert_eq!(previous, Some(Node::Integer(1)));
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(mapping.get("a"), Some(&Node::Integer(3)));
    }

    #[test]
    fn test_mapping_remove_preserves_order() {
        let mut mapping: Mapping = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();
        assert_eq!(mapping.remove("y"), Some(Node::Integer(2)));
        assert_eq!(mapping.remove("y"), None);
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["x", "z"]);
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let left: Mapping = [("a", 1), ("b", 2)].into_iter().collect();
        let right: Mapping = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(left, right);

        let different: Mapping = [("a", 1), ("b", 3)].into_iter().collect();
        assert_ne!(left, different);
    }

    #[test]
    fn test_make_mapping_replaces_scalar() {
        let mut node = Node::from("scalar");
        node.make_mapping().insert("b", 1);
        assert_eq!(node, Node::Mapping([("b", 1)].into_iter().collect()));
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(Node::Integer(42).get_as::<i32>(), Some(42));
        assert_eq!(Node::Integer(-1).get_as::<u32>(), None);
        assert_eq!(Node::Integer(300).get_as::<u8>(), None);
        assert_eq!(Node::Float(7.0).get_as::<i64>(), Some(7));
        assert_eq!(Node::Float(7.5).get_as::<i64>(), None);
        assert_eq!(Node::from(" 12 ").get_as::<u16>(), Some(12));
        assert_eq!(Node::from("twelve").get_as::<u16>(), None);
        assert_eq!(Node::Bool(true).get_as::<i64>(), None);
    }

    #[test]
    fn test_float_conversions() {
        assert_eq!(Node::Integer(3).get_as::<f64>(), Some(3.0));
        assert_eq!(Node::Float(2.5).get_as::<f64>(), Some(2.5));
        assert_eq!(Node::from("0.25").get_as::<f64>(), Some(0.25));
        assert_eq!(Node::Null.get_as::<f64>(), None);
    }

    #[test]
    fn test_bool_and_string_conversions() {
        assert_eq!(Node::from("TRUE").get_as::<bool>(), Some(true));
        assert_eq!(Node::from("no").get_as::<bool>(), None);
        assert_eq!(Node::Integer(5).get_as::<String>(), Some("5".to_string()));
        assert_eq!(Node::Bool(false).get_as::<String>(), Some("false".to_string()));
        assert_eq!(Node::Null.get_as::<String>(), None);
    }

    #[test]
    fn test_vec_conversion_requires_every_element() {
        let node = Node::from(vec!["a", "b"]);
        assert_eq!(
            node.get_as::<Vec<String>>(),
            Some(vec!["a".to_string(), "b".to_string()])
        );

        let mixed = Node::Sequence(vec![Node::Integer(1), Node::from("x")]);
        assert_eq!(mixed.get_as::<Vec<i64>>(), None);
        assert_eq!(
            mixed.get_as::<Vec<String>>(),
            Some(vec!["1".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn test_option_into_node() {
        assert_eq!(Node::from(None::<i32>), Node::Null);
        assert_eq!(Node::from(Some(4)), Node::Integer(4));
    }

    #[test]
    fn test_deserialize_preserves_key_order() {
        let node: Node = serde_json::from_str(r#"{"zeta": 1, "alpha": {"b": [true, null]}}"#)
            .unwrap();
        let mapping = node.as_mapping().unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
        assert_eq!(
            mapping.get("alpha").and_then(|n| n.as_mapping()).and_then(|m| m.get("b")),
            Some(&Node::Sequence(vec![Node::Bool(true), Node::Null]))
        );
    }

    #[test]
    fn test_deserialize_large_unsigned_becomes_float() {
        let node: Node = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(node, Node::Float(_)));
    }

    #[test]
    fn test_display_containers_as_flow() {
        let node = Node::Mapping([("a", vec![1, 2])].into_iter().collect());
        assert_eq!(node.to_string(), r#"{"a":[1,2]}"#);
    }
}
