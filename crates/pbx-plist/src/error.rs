//! Error types for encoding and decoding.

use std::fmt;

use pbx_core::{DocumentError, ObjectId};

/// A position in the input text.
///
/// `offset` and `column` are byte-based; `line` and `column` are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Errors that can occur while decoding descriptor text.
///
/// Every variant except [`CodecError::Document`] is a malformed-input
/// failure; `Document` wraps the reference-integrity check run in strict
/// mode. Decoding never returns a partially populated document alongside
/// an error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unterminated quoted string starting at {0}")]
    UnterminatedString(Pos),

    #[error("unterminated block comment starting at {0}")]
    UnterminatedComment(Pos),

    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { pos: Pos, ch: char },

    #[error("expected {expected} at {pos}, found {found}")]
    Unexpected {
        pos: Pos,
        expected: &'static str,
        found: String,
    },

    #[error("unexpected end of input: expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("duplicate key {key:?} at {pos}")]
    DuplicateKey { pos: Pos, key: String },

    #[error("document is missing required key {key:?}")]
    MissingDocumentKey { key: &'static str },

    #[error("document key {key:?} must be {expected}")]
    DocumentKeyType {
        key: &'static str,
        expected: &'static str,
    },

    #[error("unexpected top-level key {key:?}")]
    UnexpectedDocumentKey { key: String },

    #[error("object table key {key:?} is not a valid object identifier")]
    InvalidObjectKey { key: String },

    #[error("object table entry {id} must be a mapping")]
    ObjectBodyType { id: ObjectId },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl CodecError {
    /// True for lexical/structural violations of the grammar; false for
    /// the strict-mode referential-integrity failure.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, CodecError::Document(_))
    }

    /// The input position this error points at, when one exists.
    pub fn position(&self) -> Option<Pos> {
        match self {
            CodecError::UnterminatedString(pos)
            | CodecError::UnterminatedComment(pos)
            | CodecError::UnexpectedChar { pos, .. }
            | CodecError::Unexpected { pos, .. }
            | CodecError::DuplicateKey { pos, .. } => Some(*pos),
            _ => None,
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
