use std::fs;

use magegen_codegen::generators::GeneratorConfig;
use magegen_codegen::{generate_module, generate_module_from_manifest, Error, Manifest};

const MANIFEST: &str = r#"
module:
  package: Vendor
  name: Catalog
attributes:
  - attribute_label: Color
    frontend_input: select
    options: Red, Blue
    source_model: true
    extra:
      transport_to_quote_item: true
  - attribute_label: Is Featured
    frontend_input: boolean
"#;

#[test]
fn attributes_share_module_files() {
    let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
    let output = generate_module(&manifest, &GeneratorConfig::default()).unwrap();
    let files = output.files().unwrap();

    let paths: Vec<_> = files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "Vendor/Catalog/Model/Product/Attribute/Source/Color.php",
            "Vendor/Catalog/README.md",
            "Vendor/Catalog/Setup/Patch/Data/AddColorProductAttribute.php",
            "Vendor/Catalog/Setup/Patch/Data/AddIsFeaturedProductAttribute.php",
            "Vendor/Catalog/etc/catalog_attributes.xml",
            "Vendor/Catalog/etc/module.xml",
        ]
    );

    let module_xml = &files["Vendor/Catalog/etc/module.xml"];
    assert_eq!(module_xml.matches("<module name=\"Vendor_Catalog\"").count(), 1);
    assert_eq!(module_xml.matches("<module name=\"Magento_Catalog\"/>").count(), 1);

    let readme = &files["Vendor/Catalog/README.md"];
    assert!(readme.contains(" - Product - Color (color)\n - Product - Is Featured (is_featured)\n"));

    let catalog = &files["Vendor/Catalog/etc/catalog_attributes.xml"];
    assert!(catalog.contains("<attribute name=\"color\"/>"));
    assert!(!catalog.contains("is_featured"));

    let installer = &files["Vendor/Catalog/Setup/Patch/Data/AddColorProductAttribute.php"];
    assert!(installer.starts_with("<?php\n"));
    assert!(installer.contains("namespace Vendor\\Catalog\\Setup\\Patch\\Data;"));
    assert!(installer.contains(
        "class AddColorProductAttribute implements DataPatchInterface, PatchRevertableInterface"
    ));
}

#[test]
fn invalid_attribute_produces_nothing() {
    let yaml = r#"
module: {package: Vendor, name: Catalog}
attributes:
  - attribute_label: Color
  - attribute_label: "Bad!Label"
"#;
    let manifest = Manifest::from_yaml_str(yaml).unwrap();
    match generate_module(&manifest, &GeneratorConfig::default()) {
        Err(Error::Validation(err)) => assert_eq!(err.field, "attributes[1].attribute_label"),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn writes_manifest_output_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("attributes.yaml");
    fs::write(&manifest_path, MANIFEST).unwrap();
    let out = dir.path().join("app/code");

    let written =
        generate_module_from_manifest(&manifest_path, &out, &GeneratorConfig::default()).unwrap();
    assert_eq!(written, 6);

    let source = fs::read_to_string(out.join("Vendor/Catalog/Model/Product/Attribute/Source/Color.php"))
        .unwrap();
    assert!(source.contains("namespace Vendor\\Catalog\\Model\\Product\\Attribute\\Source;"));
    assert!(source.contains("['value' => 'red', 'label' => __('Red')]"));
}

#[test]
fn custom_template_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let template_path = dir.path().join("attribute.tmpl");
    fs::write(&template_path, "// {attribute_code} as {value_type}\n").unwrap();

    let manifest = Manifest::from_yaml_str(MANIFEST).unwrap();
    let config = GeneratorConfig {
        template_path: Some(template_path),
    };
    let output = generate_module(&manifest, &config).unwrap();
    let installer = output
        .class("Setup\\Patch\\Data\\AddIsFeaturedProductAttribute")
        .unwrap();
    assert!(installer
        .method("apply")
        .unwrap()
        .body
        .contains("// is_featured as int"));
}

#[test]
fn missing_manifest_reports_context() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_module_from_manifest(
        &dir.path().join("missing.yaml"),
        dir.path(),
        &GeneratorConfig::default(),
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("reading manifest"));
}

#[test]
fn colliding_class_names_produce_nothing() {
    let yaml = r#"
module: {package: Vendor, name: Catalog}
attributes:
  - attribute_label: Color
  - attribute_label: Color_
    frontend_input: boolean
"#;
    let manifest = Manifest::from_yaml_str(yaml).unwrap();
    match generate_module(&manifest, &GeneratorConfig::default()) {
        Err(Error::Manifest(message)) => assert!(message.contains("'color_'")),
        other => panic!("unexpected result: {other:?}"),
    }
}
