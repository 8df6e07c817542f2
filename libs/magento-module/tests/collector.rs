use magegen_module::{
    GeneratedArtifact, ModuleIdentity, ModuleOutput, PhpClass, PhpMethod, Readme,
    StaticFileArtifact, XmlArtifact, XmlNode,
};
use std::fs;

fn module_xml(identity: &ModuleIdentity) -> XmlNode {
    XmlNode::new("config")
        .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
        .attr(
            "xsi:noNamespaceSchemaLocation",
            "urn:magento:framework:Module/etc/module.xsd",
        )
        .child(
            XmlNode::new("module")
                .attr("name", identity.module_name())
                .child(
                    XmlNode::new("sequence")
                        .child(XmlNode::new("module").attr("name", "Magento_Catalog")),
                ),
        )
}

fn output_with_two_features() -> ModuleOutput {
    let identity = ModuleIdentity::new("Vendor", "Catalog");
    let mut output = ModuleOutput::new(identity.clone());

    for code in ["color", "size"] {
        let mut class = PhpClass::new(format!("Model\\{}", code));
        class.add_method(PhpMethod::new("getCode").body(format!("return '{}';", code)));

        output.add(GeneratedArtifact::Class(class));
        output.add(XmlArtifact::new("etc/module.xml", module_xml(&identity)).into());
        output.add(
            StaticFileArtifact::readme(Readme::with_attribute(format!(
                " - Product - {} ({})",
                code, code
            )))
            .into(),
        );
    }

    output
}

#[test]
fn merges_shared_documents() {
    let output = output_with_two_features();

    let module = output.xml("etc/module.xml").unwrap();
    assert_eq!(module.nodes.len(), 1);
    let sequence = module.nodes[0].children("sequence").next().unwrap();
    assert_eq!(sequence.nodes.len(), 1);

    let files = output.files().unwrap();
    let readme = &files["Vendor/Catalog/README.md"];
    assert!(readme.contains(" - Product - color (color)\n - Product - size (size)\n"));
}

#[test]
fn renders_paths_below_module_directory() {
    let files = output_with_two_features().files().unwrap();
    let paths: Vec<_> = files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "Vendor/Catalog/Model/color.php",
            "Vendor/Catalog/Model/size.php",
            "Vendor/Catalog/README.md",
            "Vendor/Catalog/etc/module.xml",
        ]
    );
    assert!(files["Vendor/Catalog/Model/color.php"].contains("namespace Vendor\\Catalog\\Model;"));
}

#[test]
fn writes_files_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let written = output_with_two_features().write_to(dir.path()).unwrap();
    assert_eq!(written, 4);

    let xml = fs::read_to_string(dir.path().join("Vendor/Catalog/etc/module.xml")).unwrap();
    assert!(xml.contains("<module name=\"Vendor_Catalog\">"));
    assert!(xml.contains("<module name=\"Magento_Catalog\"/>"));
}

#[test]
fn empty_output() {
    let output = ModuleOutput::new(ModuleIdentity::new("Vendor", "Empty"));
    assert!(output.is_empty());
    assert!(output.files().unwrap().is_empty());
}
