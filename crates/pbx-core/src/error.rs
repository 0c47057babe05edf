//! Error types for the document model.

use crate::id::ObjectId;

/// Errors from parsing object identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The text is not 24 uppercase hexadecimal characters.
    #[error("invalid object identifier {text:?}: expected 24 uppercase hex characters")]
    InvalidShape {
        /// The offending text.
        text: String,
    },
}

/// Errors from document-level validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A reference is used somewhere in the document but has no entry in
    /// the object table.
    #[error("dangling reference {id}: no such entry in the object table")]
    DanglingReference {
        /// The unresolvable identifier.
        id: ObjectId,
    },
}
