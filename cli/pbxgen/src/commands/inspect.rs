//! `pbxgen inspect` — summarize a descriptor or export it as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use pbx_core::{Document, Value};

pub fn run(path: &Path, format: &str) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let document = pbx_plist::decode(&text)
        .with_context(|| format!("parsing {}", path.display()))?;

    match format {
        "human" => {
            print!("{}", summarize(&document));
            Ok(())
        }
        "json" => {
            let json = serde_json::to_string_pretty(&document)
                .context("serializing document to JSON")?;
            println!("{json}");
            Ok(())
        }
        other => bail!("unknown format '{other}' (expected human or json)"),
    }
}

fn summarize(document: &Document) -> String {
    let mut by_isa: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, body) in document.objects() {
        let isa = body.get("isa").and_then(Value::as_str).unwrap_or("(no isa)");
        *by_isa.entry(isa).or_default() += 1;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "archiveVersion {}, objectVersion {}\n",
        document.archive_version, document.object_version
    ));
    out.push_str(&format!("rootObject {}\n", document.root_object));
    out.push_str(&format!("{} objects:\n", document.object_count()));
    for (isa, count) in by_isa {
        out.push_str(&format!("  {count:>3}  {isa}\n"));
    }
    out
}
