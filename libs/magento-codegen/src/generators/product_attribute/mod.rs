//! Product attribute generator
//!
//! Compiles one [`AttributeDefinition`] into a data patch that installs the
//! attribute, an optional source model, XML configuration and a README line.

pub mod fields;
pub mod source_model;

use magegen_module::{
    GeneratedArtifact, ModuleIdentity, ModuleOutput, PhpClass, PhpMethod, Readme,
    StaticFileArtifact, XmlArtifact, XmlNode,
};

use crate::error::Result;
use crate::generators::{Generator, GeneratorConfig};
use crate::ir::AttributeDefinition;
use crate::template::Template;
use fields::InstallerFields;

const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SETUP_START: &str = "$this->moduleDataSetup->getConnection()->startSetup();";
const SETUP_END: &str = "$this->moduleDataSetup->getConnection()->endSetup();";
const CREATE_EAV_SETUP: &str = "/** @var EavSetup $eavSetup */
$eavSetup = $this->eavSetupFactory->create(['setup' => $this->moduleDataSetup]);";

/// Everything generated for one attribute
#[derive(Debug, Clone)]
pub struct CompiledAttribute {
    pub attribute_code: String,
    pub fields: InstallerFields,
    pub installer: PhpClass,
    pub source_model: Option<PhpClass>,
    pub xml: Vec<XmlArtifact>,
    pub readme: StaticFileArtifact,
}

impl CompiledAttribute {
    pub fn artifacts(self) -> Vec<GeneratedArtifact> {
        let mut artifacts = vec![GeneratedArtifact::Class(self.installer)];
        if let Some(source_model) = self.source_model {
            artifacts.push(GeneratedArtifact::Class(source_model));
        }
        artifacts.extend(self.xml.into_iter().map(GeneratedArtifact::Xml));
        artifacts.push(GeneratedArtifact::StaticFile(self.readme));
        artifacts
    }

    /// Hand every artifact over to the collector.
    pub fn emit(self, output: &mut ModuleOutput) {
        for artifact in self.artifacts() {
            output.add(artifact);
        }
    }
}

/// Generator for product attribute data patches
#[derive(Debug, Clone)]
pub struct ProductAttributeGenerator {
    identity: ModuleIdentity,
    template: Template,
}

impl ProductAttributeGenerator {
    pub fn new(identity: ModuleIdentity, config: &GeneratorConfig) -> Result<Self> {
        let template = config.load_template()?;
        Ok(Self::with_template(identity, template))
    }

    pub fn with_template(identity: ModuleIdentity, template: Template) -> Self {
        Self { identity, template }
    }

    pub fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    /// Compile a definition into its artifacts.
    pub fn compile(&self, definition: &AttributeDefinition) -> Result<CompiledAttribute> {
        let attribute_code = definition.attribute_code();
        let class_suffix = definition.class_suffix();

        let source_model = definition.wants_source_model().then(|| {
            source_model::build(
                &class_suffix,
                &definition.options,
                definition.extra.used_in_product_listing,
            )
        });
        let source_model_class = source_model
            .as_ref()
            .map(|class| format!("{}\\{}", self.identity.namespace(), class.class_name));

        let fields = InstallerFields::from_definition(definition, source_model_class);
        let method_body = self.template.render(&fields.substitutions())?;
        let installer = installer_class(&class_suffix, &attribute_code, &method_body);

        let mut xml = Vec::new();
        if definition.extra.transport_to_quote_item {
            xml.push(catalog_attributes_xml(&attribute_code));
        }
        xml.push(module_xml(&self.identity));

        let readme = StaticFileArtifact::readme(Readme::with_attribute(format!(
            " - Product - {} ({})",
            definition.label, attribute_code
        )));

        tracing::debug!(
            attribute = %attribute_code,
            input = definition.input_kind.code(),
            storage = fields.value_type.code(),
            source_model = source_model.is_some(),
            "Compiled product attribute"
        );

        Ok(CompiledAttribute {
            attribute_code,
            fields,
            installer,
            source_model,
            xml,
            readme,
        })
    }
}

impl Generator for ProductAttributeGenerator {
    type Output = CompiledAttribute;

    fn generate(&self, definition: &AttributeDefinition) -> Result<Self::Output> {
        self.compile(definition)
    }
}

/// Class name of the installer patch relative to the module namespace
pub fn installer_class_name(class_suffix: &str) -> String {
    format!("Setup\\Patch\\Data\\Add{}ProductAttribute", class_suffix)
}

fn installer_class(class_suffix: &str, attribute_code: &str, method_body: &str) -> PhpClass {
    let mut class = PhpClass::new(installer_class_name(class_suffix))
        .implements(["DataPatchInterface", "PatchRevertableInterface"])
        .dependencies([
            "Magento\\Framework\\Setup\\Patch\\DataPatchInterface",
            "Magento\\Framework\\Setup\\Patch\\PatchRevertableInterface",
            "Magento\\Framework\\Setup\\ModuleDataSetupInterface",
            "Magento\\Eav\\Setup\\EavSetupFactory",
            "Magento\\Eav\\Setup\\EavSetup",
            "Magento\\Eav\\Model\\Entity\\Attribute\\ScopedAttributeInterface",
        ])
        .attributes([
            "/**\n * @var ModuleDataSetupInterface\n */\nprivate $moduleDataSetup;",
            "/**\n * @var EavSetupFactory\n */\nprivate $eavSetupFactory;",
        ]);

    class.add_method(
        PhpMethod::new("__construct")
            .params([
                "ModuleDataSetupInterface $moduleDataSetup",
                "EavSetupFactory $eavSetupFactory",
            ])
            .body(
                "$this->moduleDataSetup = $moduleDataSetup;\n$this->eavSetupFactory = $eavSetupFactory;",
            )
            .docstring([
                "Constructor",
                "",
                "@param ModuleDataSetupInterface $moduleDataSetup",
                "@param EavSetupFactory $eavSetupFactory",
            ]),
    );

    class.add_method(
        PhpMethod::new("apply")
            .bracket(SETUP_START, SETUP_END)
            .body(format!("{}\n\n{}", CREATE_EAV_SETUP, method_body.trim_end()))
            .docstring(["{@inheritdoc}"]),
    );

    class.add_method(
        PhpMethod::new("revert")
            .bracket(SETUP_START, SETUP_END)
            .body(format!(
                "{}\n$eavSetup->removeAttribute(\\Magento\\Catalog\\Model\\Product::ENTITY, '{}');",
                CREATE_EAV_SETUP, attribute_code
            )),
    );

    class.add_method(
        PhpMethod::new("getAliases")
            .body("return [];")
            .docstring(["{@inheritdoc}"]),
    );

    class.add_method(
        PhpMethod::new("getDependencies")
            .access("public static")
            .body("return [];")
            .docstring(["{@inheritdoc}"]),
    );

    class
}

fn catalog_attributes_xml(attribute_code: &str) -> XmlArtifact {
    let root = XmlNode::new("config")
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr(
            "xsi:noNamespaceSchemaLocation",
            "urn:magento:module:Magento_Catalog:etc/catalog_attributes.xsd",
        )
        .child(
            XmlNode::new("group")
                .attr("name", "quote_item")
                .child(XmlNode::new("attribute").attr("name", attribute_code)),
        );
    XmlArtifact::new("etc/catalog_attributes.xml", root)
}

fn module_xml(identity: &ModuleIdentity) -> XmlArtifact {
    let root = XmlNode::new("config")
        .attr("xmlns:xsi", XSI_NAMESPACE)
        .attr(
            "xsi:noNamespaceSchemaLocation",
            "urn:magento:framework:Module/etc/module.xsd",
        )
        .child(
            XmlNode::new("module").attr("name", identity.module_name()).child(
                XmlNode::new("sequence")
                    .child(XmlNode::new("module").attr("name", "Magento_Catalog")),
            ),
        );
    XmlArtifact::new("etc/module.xml", root)
}
