//! CLI command implementations.

pub mod fmt;
pub mod init;
pub mod inspect;
pub mod validate;
