//! `serde` support for the JSON export view.
//!
//! Impls are written by hand because mappings must serialize in insertion
//! order, which derive over a map type would not guarantee. Only
//! serialization is provided: documents are decoded from the plist text
//! form, never from JSON.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::document::Document;
use crate::id::ObjectId;
use crate::value::{Dict, Value};

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Reference(id) => id.serialize(serializer),
            Value::Array(items) => items.serialize(serializer),
            Value::Dict(dict) => dict.serialize(serializer),
        }
    }
}

impl Serialize for Dict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct ObjectTable<'a>(&'a Document);

        impl Serialize for ObjectTable<'_> {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(self.0.object_count()))?;
                for (id, body) in self.0.objects() {
                    map.serialize_entry(id.as_str(), body)?;
                }
                map.end()
            }
        }

        let mut map = serializer.serialize_map(Some(5))?;
        map.serialize_entry("archiveVersion", &self.archive_version)?;
        map.serialize_entry("classes", &self.classes)?;
        map.serialize_entry("objectVersion", &self.object_version)?;
        map.serialize_entry("objects", &ObjectTable(self))?;
        map.serialize_entry("rootObject", &self.root_object)?;
        map.end()
    }
}
