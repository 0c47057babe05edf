//! `pbxgen validate` — parse a descriptor and report on it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pbx_core::Value;

pub fn run(path: &Path, strict: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    let document = if strict {
        pbx_plist::decode_strict(&text)
    } else {
        pbx_plist::decode(&text)
    }
    .with_context(|| format!("validating {}", path.display()))?;

    let root_isa = document
        .object(&document.root_object)
        .and_then(|body| body.get("isa"))
        .and_then(Value::as_str)
        .unwrap_or("unknown");

    println!(
        "ok: {} objects, objectVersion {}, root {}",
        document.object_count(),
        document.object_version,
        root_isa
    );
    Ok(())
}
