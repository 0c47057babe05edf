//! In-memory model for Xcode project descriptors (`project.pbxproj`).
//!
//! A descriptor is a [`Document`]: a handful of version fields plus a table
//! of objects keyed by [`ObjectId`], each object an order-preserving
//! [`Dict`] of [`Value`]s. Cross-object links are weak [`ObjectId`]
//! references resolved by table lookup, never ownership.
//!
//! This crate knows nothing about the on-disk text grammar (see the
//! `pbx-plist` crate) and nothing about Xcode build semantics; it models
//! the value tree and enforces referential integrity.

pub mod document;
pub mod error;
pub mod id;
mod json;
pub mod value;

pub use document::Document;
pub use error::{DocumentError, IdError};
pub use id::ObjectId;
pub use value::{Dict, Value};
