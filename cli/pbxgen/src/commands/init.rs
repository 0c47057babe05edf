//! `pbxgen init` — project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::scaffold;

/// Create `<name>.xcodeproj/project.pbxproj` under `directory`.
pub fn run(
    directory: &Path,
    name: &str,
    bundle_id: Option<&str>,
    deployment_target: &str,
) -> Result<()> {
    let default_bundle = format!("com.example.{}", name.to_lowercase());
    let bundle_id = bundle_id.unwrap_or(&default_bundle);

    let project_dir = directory.join(format!("{name}.xcodeproj"));
    if project_dir.exists() {
        bail!("directory '{}' already exists", project_dir.display());
    }

    let document = scaffold::skeletal_project(name, bundle_id, deployment_target);
    let text = pbx_plist::encode(&document);

    fs::create_dir_all(&project_dir).context("creating .xcodeproj directory")?;
    let descriptor_path = project_dir.join("project.pbxproj");
    fs::write(&descriptor_path, text).context("writing project.pbxproj")?;

    println!("Created project '{name}'");
    println!("  {}", descriptor_path.display());
    println!("  bundle identifier: {bundle_id}");
    println!("  deployment target: iOS {deployment_target}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_a_valid_descriptor() {
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), "Demo", None, "17.0").unwrap();

        let path = dir.path().join("Demo.xcodeproj/project.pbxproj");
        assert!(path.is_file());

        let text = fs::read_to_string(&path).unwrap();
        let document = pbx_plist::decode_strict(&text).unwrap();
        assert!(document.object_count() > 0);
    }

    #[test]
    fn init_uses_the_default_bundle_identifier() {
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), "Demo", None, "17.0").unwrap();

        let text =
            fs::read_to_string(dir.path().join("Demo.xcodeproj/project.pbxproj")).unwrap();
        assert!(text.contains("com.example.demo"));
    }

    #[test]
    fn init_honors_an_explicit_bundle_identifier() {
        let dir = tempfile::tempdir().unwrap();

        run(dir.path(), "Demo", Some("org.acme.demo"), "16.4").unwrap();

        let text =
            fs::read_to_string(dir.path().join("Demo.xcodeproj/project.pbxproj")).unwrap();
        assert!(text.contains("org.acme.demo"));
        assert!(text.contains("16.4"));
    }

    #[test]
    fn init_refuses_an_existing_project() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("Demo.xcodeproj")).unwrap();

        let result = run(dir.path(), "Demo", None, "17.0");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
