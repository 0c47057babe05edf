//! Skeletal Xcode project construction.
//!
//! All pbxproj schema knowledge (isa kinds, build phases, configuration
//! lists) lives here; the model and codec crates treat the document as an
//! opaque value tree. The generated project is referentially closed: every
//! identifier the project object mentions has a real entry in the object
//! table, so strict validation passes on the output.

use pbx_core::{Dict, Document, ObjectId, Value};

/// Object-model version written by Xcode 14/15.
const OBJECT_VERSION: i64 = 56;

const LAST_UPGRADE_CHECK: i64 = 1500;
const CREATED_ON_TOOLS_VERSION: &str = "15.0";
const COMPATIBILITY_VERSION: &str = "Xcode 14.0";
const SWIFT_VERSION: &str = "5.0";

/// `buildActionMask` value Xcode writes for every build phase.
const BUILD_ACTION_MASK: i64 = 2147483647;

/// Build a complete skeletal single-target iOS app project.
pub fn skeletal_project(name: &str, bundle_id: &str, deployment_target: &str) -> Document {
    let project_id = ObjectId::generate();
    let target_id = ObjectId::generate();
    let main_group_id = ObjectId::generate();
    let sources_group_id = ObjectId::generate();
    let frameworks_group_id = ObjectId::generate();
    let products_group_id = ObjectId::generate();
    let product_ref_id = ObjectId::generate();
    let sources_phase_id = ObjectId::generate();
    let frameworks_phase_id = ObjectId::generate();
    let resources_phase_id = ObjectId::generate();
    let project_cfg_list_id = ObjectId::generate();
    let project_debug_id = ObjectId::generate();
    let project_release_id = ObjectId::generate();
    let target_cfg_list_id = ObjectId::generate();
    let target_debug_id = ObjectId::generate();
    let target_release_id = ObjectId::generate();

    let mut doc = Document::new(OBJECT_VERSION, project_id.clone());

    doc.insert_object(product_ref_id.clone(), product_reference(name));
    doc.insert_object(
        main_group_id.clone(),
        group(
            None,
            None,
            refs(&[&sources_group_id, &frameworks_group_id, &products_group_id]),
        ),
    );
    doc.insert_object(
        sources_group_id,
        group(None, Some(name), Value::Array(vec![])),
    );
    doc.insert_object(
        frameworks_group_id,
        group(Some("Frameworks"), None, Value::Array(vec![])),
    );
    doc.insert_object(
        products_group_id.clone(),
        group(Some("Products"), None, refs(&[&product_ref_id])),
    );

    doc.insert_object(sources_phase_id.clone(), build_phase("PBXSourcesBuildPhase"));
    doc.insert_object(
        frameworks_phase_id.clone(),
        build_phase("PBXFrameworksBuildPhase"),
    );
    doc.insert_object(
        resources_phase_id.clone(),
        build_phase("PBXResourcesBuildPhase"),
    );

    doc.insert_object(
        project_debug_id.clone(),
        project_configuration("Debug", deployment_target),
    );
    doc.insert_object(
        project_release_id.clone(),
        project_configuration("Release", deployment_target),
    );
    doc.insert_object(
        project_cfg_list_id.clone(),
        configuration_list(&project_debug_id, &project_release_id),
    );

    doc.insert_object(
        target_debug_id.clone(),
        target_configuration("Debug", bundle_id, deployment_target),
    );
    doc.insert_object(
        target_release_id.clone(),
        target_configuration("Release", bundle_id, deployment_target),
    );
    doc.insert_object(
        target_cfg_list_id.clone(),
        configuration_list(&target_debug_id, &target_release_id),
    );

    doc.insert_object(
        target_id.clone(),
        native_target(
            name,
            &target_cfg_list_id,
            &[&sources_phase_id, &frameworks_phase_id, &resources_phase_id],
            &product_ref_id,
        ),
    );
    doc.insert_object(
        project_id,
        project(
            &target_id,
            &project_cfg_list_id,
            &main_group_id,
            &products_group_id,
        ),
    );

    doc
}

fn refs(ids: &[&ObjectId]) -> Value {
    Value::Array(ids.iter().map(|id| Value::Reference((*id).clone())).collect())
}

fn product_reference(name: &str) -> Dict {
    let mut body = Dict::new();
    body.insert("isa", "PBXFileReference");
    body.insert("explicitFileType", "wrapper.application");
    body.insert("includeInIndex", 0);
    body.insert("path", format!("{name}.app"));
    body.insert("sourceTree", "BUILT_PRODUCTS_DIR");
    body
}

fn group(name: Option<&str>, path: Option<&str>, children: Value) -> Dict {
    let mut body = Dict::new();
    body.insert("isa", "PBXGroup");
    body.insert("children", children);
    if let Some(name) = name {
        body.insert("name", name);
    }
    if let Some(path) = path {
        body.insert("path", path);
    }
    body.insert("sourceTree", "<group>");
    body
}

fn build_phase(isa: &str) -> Dict {
    let mut body = Dict::new();
    body.insert("isa", isa);
    body.insert("buildActionMask", BUILD_ACTION_MASK);
    body.insert("files", Value::Array(vec![]));
    body.insert("runOnlyForDeploymentPostprocessing", 0);
    body
}

fn project_configuration(name: &str, deployment_target: &str) -> Dict {
    let mut settings = Dict::new();
    settings.insert("IPHONEOS_DEPLOYMENT_TARGET", deployment_target);
    settings.insert("SDKROOT", "iphoneos");
    settings.insert("SWIFT_VERSION", SWIFT_VERSION);
    if name == "Debug" {
        settings.insert("DEBUG_INFORMATION_FORMAT", "dwarf");
        settings.insert("ONLY_ACTIVE_ARCH", "YES");
        settings.insert("SWIFT_OPTIMIZATION_LEVEL", "-Onone");
    } else {
        settings.insert("DEBUG_INFORMATION_FORMAT", "dwarf-with-dsym");
        settings.insert("SWIFT_COMPILATION_MODE", "wholemodule");
        settings.insert("VALIDATE_PRODUCT", "YES");
    }

    let mut body = Dict::new();
    body.insert("isa", "XCBuildConfiguration");
    body.insert("buildSettings", settings);
    body.insert("name", name);
    body
}

fn target_configuration(name: &str, bundle_id: &str, deployment_target: &str) -> Dict {
    let mut settings = Dict::new();
    settings.insert("CODE_SIGN_STYLE", "Automatic");
    settings.insert("CURRENT_PROJECT_VERSION", 1);
    settings.insert("GENERATE_INFOPLIST_FILE", "YES");
    settings.insert("IPHONEOS_DEPLOYMENT_TARGET", deployment_target);
    settings.insert("MARKETING_VERSION", "1.0");
    settings.insert("PRODUCT_BUNDLE_IDENTIFIER", bundle_id);
    settings.insert("PRODUCT_NAME", "$(TARGET_NAME)");
    settings.insert("SWIFT_EMIT_LOC_STRINGS", "YES");
    settings.insert("TARGETED_DEVICE_FAMILY", "1,2");

    let mut body = Dict::new();
    body.insert("isa", "XCBuildConfiguration");
    body.insert("buildSettings", settings);
    body.insert("name", name);
    body
}

fn configuration_list(debug: &ObjectId, release: &ObjectId) -> Dict {
    let mut body = Dict::new();
    body.insert("isa", "XCConfigurationList");
    body.insert("buildConfigurations", refs(&[debug, release]));
    body.insert("defaultConfigurationIsVisible", 0);
    body.insert("defaultConfigurationName", "Release");
    body
}

fn native_target(
    name: &str,
    cfg_list: &ObjectId,
    phases: &[&ObjectId],
    product_ref: &ObjectId,
) -> Dict {
    let mut body = Dict::new();
    body.insert("isa", "PBXNativeTarget");
    body.insert("buildConfigurationList", cfg_list.clone());
    body.insert("buildPhases", refs(phases));
    body.insert("buildRules", Value::Array(vec![]));
    body.insert("dependencies", Value::Array(vec![]));
    body.insert("name", name);
    body.insert("productName", name);
    body.insert("productReference", product_ref.clone());
    body.insert("productType", "com.apple.product-type.application");
    body
}

fn project(
    target: &ObjectId,
    cfg_list: &ObjectId,
    main_group: &ObjectId,
    products_group: &ObjectId,
) -> Dict {
    let mut target_attributes = Dict::new();
    let mut per_target = Dict::new();
    per_target.insert("CreatedOnToolsVersion", CREATED_ON_TOOLS_VERSION);
    per_target.insert("LastSwiftMigration", LAST_UPGRADE_CHECK);
    target_attributes.insert(target.as_str(), per_target);

    let mut attributes = Dict::new();
    attributes.insert("BuildIndependentTargetsInParallel", 1);
    attributes.insert("LastUpgradeCheck", LAST_UPGRADE_CHECK);
    attributes.insert("TargetAttributes", target_attributes);

    let mut body = Dict::new();
    body.insert("isa", "PBXProject");
    body.insert("attributes", attributes);
    body.insert("buildConfigurationList", cfg_list.clone());
    body.insert("compatibilityVersion", COMPATIBILITY_VERSION);
    body.insert("developmentRegion", "en");
    body.insert("hasScannedForEncodings", 0);
    body.insert("knownRegions", vec![Value::from("en"), Value::from("Base")]);
    body.insert("mainGroup", main_group.clone());
    body.insert("productRefGroup", products_group.clone());
    body.insert("projectDirPath", "");
    body.insert("projectRoot", "");
    body.insert("targets", refs(&[target]));
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        skeletal_project("LanguageGame", "com.example.languagegame", "17.0")
    }

    #[test]
    fn skeleton_is_referentially_closed() {
        assert!(sample().validate_references().is_ok());
    }

    #[test]
    fn root_object_is_the_project() {
        let doc = sample();
        let root = doc.object(&doc.root_object).unwrap();
        assert_eq!(root.get("isa").and_then(Value::as_str), Some("PBXProject"));
        assert_eq!(doc.object_version, 56);
        assert_eq!(doc.archive_version, 1);
    }

    #[test]
    fn project_has_one_target_with_three_phases() {
        let doc = sample();
        let root = doc.object(&doc.root_object).unwrap();
        let targets = root.get("targets").and_then(Value::as_array).unwrap();
        assert_eq!(targets.len(), 1);

        let target_id = targets[0].as_reference().unwrap();
        let target = doc.object(target_id).unwrap();
        assert_eq!(
            target.get("isa").and_then(Value::as_str),
            Some("PBXNativeTarget")
        );
        let phases = target.get("buildPhases").and_then(Value::as_array).unwrap();
        assert_eq!(phases.len(), 3);
    }

    #[test]
    fn target_attributes_are_keyed_by_target_id() {
        let doc = sample();
        let root = doc.object(&doc.root_object).unwrap();
        let targets = root.get("targets").and_then(Value::as_array).unwrap();
        let target_id = targets[0].as_reference().unwrap();

        let attributes = root.get("attributes").and_then(Value::as_dict).unwrap();
        let per_target = attributes
            .get("TargetAttributes")
            .and_then(Value::as_dict)
            .unwrap();
        assert!(per_target.contains_key(target_id.as_str()));
    }

    #[test]
    fn bundle_identifier_lands_in_target_settings() {
        let doc = sample();
        let found = doc.objects().any(|(_, body)| {
            body.get("buildSettings")
                .and_then(Value::as_dict)
                .and_then(|settings| settings.get("PRODUCT_BUNDLE_IDENTIFIER"))
                .and_then(Value::as_str)
                == Some("com.example.languagegame")
        });
        assert!(found);
    }

    #[test]
    fn skeleton_survives_an_encode_decode_round_trip() {
        let doc = sample();
        let text = pbx_plist::encode(&doc);
        let decoded = pbx_plist::decode_strict(&text).unwrap();
        assert_eq!(decoded, doc);
    }
}
