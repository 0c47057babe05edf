//! Codec for the legacy OpenStep structured-text plist grammar used by
//! `project.pbxproj` descriptors.
//!
//! [`encode`] and [`decode`] are pure functions between a
//! [`Document`](pbx_core::Document) and its text form. Encoding is
//! deterministic (the same document always yields byte-identical text) and
//! decoding is lossless for anything the encoder can produce, key order
//! included. The codec performs no I/O and never logs; reading and writing
//! storage is the caller's concern.

mod error;
mod lexer;
mod parser;
mod writer;

pub use error::{CodecError, Pos, Result};

use pbx_core::Document;

/// Encode a document as structured text.
pub fn encode(document: &Document) -> String {
    writer::write_document(document)
}

/// Decode structured text into a document.
///
/// Fails on any lexical or structural violation; no partial document is
/// ever returned. Reference integrity is not checked, see
/// [`decode_strict`].
pub fn decode(text: &str) -> Result<Document> {
    parser::parse_document(text)
}

/// Decode structured text and verify that every reference resolves to an
/// entry in the object table.
pub fn decode_strict(text: &str) -> Result<Document> {
    let document = parser::parse_document(text)?;
    document.validate_references()?;
    Ok(document)
}
