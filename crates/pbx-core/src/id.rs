//! Object identifiers.
//!
//! Every object in a descriptor is keyed by a 24-character uppercase
//! hexadecimal token. The shape is fixed but the content is opaque: the
//! rest of the system treats identifiers as text and never inspects them.

use std::fmt;

use uuid::Uuid;

use crate::error::IdError;

/// Length of an identifier in characters.
pub const OBJECT_ID_LEN: usize = 24;

/// An opaque 24-character uppercase-hex object identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(String);

impl ObjectId {
    /// Generate a fresh random identifier (UUIDv4, hyphens stripped,
    /// uppercased, truncated to 24 characters).
    pub fn generate() -> Self {
        let hex = format!("{}", Uuid::new_v4().simple()).to_uppercase();
        ObjectId(hex[..OBJECT_ID_LEN].to_string())
    }

    /// Parse an identifier, rejecting anything that is not exactly 24
    /// uppercase hex characters.
    pub fn parse(text: &str) -> Result<Self, IdError> {
        if Self::matches(text) {
            Ok(ObjectId(text.to_string()))
        } else {
            Err(IdError::InvalidShape {
                text: text.to_string(),
            })
        }
    }

    /// Lexical-shape test: 24 characters of `0-9A-F`.
    pub fn matches(text: &str) -> bool {
        text.len() == OBJECT_ID_LEN
            && text
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
