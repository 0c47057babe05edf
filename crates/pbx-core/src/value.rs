//! The tagged value tree stored inside a descriptor.
//!
//! Values are strings, integers (booleans are the integers 0/1), weak
//! object references, ordered sequences, or ordered mappings. Mappings
//! preserve insertion order because the on-disk format is order-sensitive
//! for human diffing, so structural equality includes key order.

use std::fmt;

use crate::id::ObjectId;

/// A single value in the descriptor tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A text scalar.
    String(String),
    /// An integer scalar; booleans are 0/1.
    Integer(i64),
    /// A weak link to another entry in the document's object table.
    Reference(ObjectId),
    /// An ordered sequence.
    Array(Vec<Value>),
    /// An ordered mapping with unique keys.
    Dict(Dict),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&ObjectId> {
        match self {
            Value::Reference(id) => Some(id),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }
}

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

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Integer(n.into())
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Reference(id)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Dict> for Value {
    fn from(dict: Dict) -> Self {
        Value::Dict(dict)
    }
}

/// An insertion-ordered mapping from string keys to [`Value`]s.
///
/// Keys are unique: inserting an existing key replaces the value in place
/// and keeps the key's original position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dict {
    entries: Vec<(String, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Dict::default()
    }

    /// Insert a key/value pair, returning the previous value if the key
    /// was already present. Replacement keeps the original key position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        for (existing, slot) in &mut self.entries {
            if *existing == key {
                return Some(std::mem::replace(slot, value));
            }
        }
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl IntoIterator for Dict {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, Value)> for Dict {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut dict = Dict::new();
        for (key, value) in iter {
            dict.insert(key, value);
        }
        dict
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Reference(id) => write!(f, "{id}"),
            Value::Array(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
            Value::Dict(dict) => {
                write!(f, "{{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order() {
        let mut dict = Dict::new();
        dict.insert("zebra", 1);
        dict.insert("apple", 2);
        dict.insert("mango", 3);
        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, ["zebra", "apple", "mango"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut dict = Dict::new();
        dict.insert("a", 1);
        dict.insert("b", 2);
        let old = dict.insert("a", 10);
        assert_eq!(old, Some(Value::Integer(1)));
        let keys: Vec<_> = dict.keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(dict.get("a"), Some(&Value::Integer(10)));
    }

    #[test]
    fn equality_includes_key_order() {
        let mut ab = Dict::new();
        ab.insert("a", 1);
        ab.insert("b", 2);
        let mut ba = Dict::new();
        ba.insert("b", 2);
        ba.insert("a", 1);
        assert_ne!(ab, ba);
    }

    #[test]
    fn accessors_match_variants() {
        assert_eq!(Value::from("hi").as_str(), Some("hi"));
        assert_eq!(Value::from(7).as_integer(), Some(7));
        assert_eq!(Value::from("hi").as_integer(), None);
        let id = ObjectId::generate();
        assert_eq!(Value::from(id.clone()).as_reference(), Some(&id));
        assert!(Value::Array(vec![]).as_array().unwrap().is_empty());
        assert!(Value::Dict(Dict::new()).as_dict().unwrap().is_empty());
    }
}
