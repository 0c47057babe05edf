//! The top-level descriptor unit.

use crate::error::DocumentError;
use crate::id::ObjectId;
use crate::value::{Dict, Value};

/// A whole project descriptor: version fields, an insertion-ordered object
/// table, and the root object reference.
///
/// Documents are built once and then treated as immutable: objects are
/// inserted during construction and only read afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Archive format version; 1 for every descriptor in the wild.
    pub archive_version: i64,
    /// The (historically always empty) class table.
    pub classes: Dict,
    /// Object-model version, e.g. 56 for Xcode 14/15 projects.
    pub object_version: i64,
    objects: Vec<(ObjectId, Dict)>,
    /// Reference to the document's root object.
    pub root_object: ObjectId,
}

impl Document {
    /// Create an empty document with archive version 1.
    pub fn new(object_version: i64, root_object: ObjectId) -> Self {
        Document {
            archive_version: 1,
            classes: Dict::new(),
            object_version,
            objects: Vec::new(),
            root_object,
        }
    }

    /// Insert an object body under `id`, returning the previous body if
    /// the identifier was already present (position is kept).
    pub fn insert_object(&mut self, id: ObjectId, body: Dict) -> Option<Dict> {
        for (existing, slot) in &mut self.objects {
            if *existing == id {
                return Some(std::mem::replace(slot, body));
            }
        }
        self.objects.push((id, body));
        None
    }

    /// Look up an object body by identifier.
    pub fn object(&self, id: &ObjectId) -> Option<&Dict> {
        self.objects
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, body)| body)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|(existing, _)| existing == id)
    }

    /// Iterate the object table in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = (&ObjectId, &Dict)> {
        self.objects.iter().map(|(id, body)| (id, body))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Check referential integrity: every [`Value::Reference`] reachable
    /// from the document (including `root_object`) must resolve to an
    /// entry in the object table.
    pub fn validate_references(&self) -> Result<(), DocumentError> {
        if !self.contains(&self.root_object) {
            return Err(DocumentError::DanglingReference {
                id: self.root_object.clone(),
            });
        }
        for (_, body) in &self.objects {
            self.check_dict(body)?;
        }
        Ok(())
    }

    fn check_dict(&self, dict: &Dict) -> Result<(), DocumentError> {
        for (_, value) in dict.iter() {
            self.check_value(value)?;
        }
        Ok(())
    }

    fn check_value(&self, value: &Value) -> Result<(), DocumentError> {
        match value {
            Value::Reference(id) => {
                if self.contains(id) {
                    Ok(())
                } else {
                    Err(DocumentError::DanglingReference { id: id.clone() })
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.check_value(item)?;
                }
                Ok(())
            }
            Value::Dict(dict) => self.check_dict(dict),
            Value::String(_) | Value::Integer(_) => Ok(()),
        }
    }
}
