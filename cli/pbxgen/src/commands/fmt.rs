//! `pbxgen fmt` — rewrite a descriptor in canonical form.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

pub fn run(path: &Path, check: bool) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document = pbx_plist::decode(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    let canonical = pbx_plist::encode(&document);

    if text == canonical {
        println!("{} is already canonical", path.display());
        return Ok(());
    }

    if check {
        bail!("{} is not in canonical form", path.display());
    }

    fs::write(path, canonical).with_context(|| format!("writing {}", path.display()))?;
    println!("Rewrote {}", path.display());
    Ok(())
}
