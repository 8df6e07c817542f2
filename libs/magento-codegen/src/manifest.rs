//! Module manifest files
//!
//! A manifest names the target module and lists the attributes to generate.
//! YAML and JSON are both accepted; the format is picked by file extension.

use magegen_module::ModuleIdentity;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{Constraint, Error, Result, ValidationError};
use crate::ir::AttributeDefinition;
use crate::parser::{self, RawAttribute};

const MODULE_PART_PATTERN: &str = r"^[A-Z][a-zA-Z0-9]*$";

static MODULE_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(MODULE_PART_PATTERN).expect("invalid module name pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub module: ModuleIdentity,
    #[serde(default)]
    pub attributes: Vec<RawAttribute>,
}

impl Manifest {
    pub fn new(module: ModuleIdentity) -> Self {
        Self {
            module,
            attributes: Vec::new(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            _ => Self::from_yaml_str(&text),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate the module identity and every attribute.
    ///
    /// Field names in errors are prefixed with the attribute position,
    /// e.g. `attributes[1].options`.
    pub fn validate(&self) -> Result<Vec<AttributeDefinition>> {
        for (field, value) in [
            ("module.package", &self.module.package),
            ("module.name", &self.module.name),
        ] {
            if !MODULE_PART.is_match(value) {
                return Err(ValidationError::new(
                    field,
                    Constraint::Pattern {
                        pattern: MODULE_PART_PATTERN.to_string(),
                        message: "Must start with an uppercase letter and be alphanumeric".to_string(),
                    },
                )
                .into());
            }
        }

        let mut codes = HashSet::new();
        let mut class_suffixes = HashSet::new();
        let mut definitions = Vec::with_capacity(self.attributes.len());

        for (index, raw) in self.attributes.iter().enumerate() {
            let definition = parser::validate(raw).map_err(|err| ValidationError {
                field: format!("attributes[{}].{}", index, err.field),
                constraint: err.constraint,
            })?;

            let code = definition.attribute_code();
            if !codes.insert(code.clone()) {
                return Err(Error::Manifest(format!(
                    "duplicate attribute code '{}' at attributes[{}]",
                    code, index
                )));
            }

            // Codes such as `color` and `color_` share generated class names.
            let suffix = definition.class_suffix();
            if !class_suffixes.insert(suffix.clone()) {
                return Err(Error::Manifest(format!(
                    "attribute code '{}' at attributes[{}] generates the class name '{}' of another attribute",
                    code, index, suffix
                )));
            }
            definitions.push(definition);
        }

        Ok(definitions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
module:
  package: Vendor
  name: Catalog
attributes:
  - attribute_label: Color
    frontend_input: select
    options: Red, Blue
    source_model: true
    extra:
      used_in_product_listing: true
  - attribute_label: Is Featured
    frontend_input: boolean
"#;

    #[test]
    fn test_parse_yaml() {
        let manifest = Manifest::from_yaml_str(YAML).unwrap();
        assert_eq!(manifest.module, ModuleIdentity::new("Vendor", "Catalog"));
        let definitions = manifest.validate().unwrap();
        assert_eq!(definitions.len(), 2);
        assert!(definitions[0].wants_source_model());
        assert!(definitions[0].extra.used_in_product_listing);
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"module": {"package": "Vendor", "name": "Catalog"},
            "attributes": [{"attribute_label": "Color"}]}"#;
        let manifest = Manifest::from_json_str(json).unwrap();
        assert_eq!(manifest.attributes.len(), 1);
    }

    #[test]
    fn test_unknown_top_level_key() {
        let yaml = "module: {package: Vendor, name: Catalog}\nsnippets: []\n";
        assert!(matches!(Manifest::from_yaml_str(yaml), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_error_field_is_prefixed() {
        let yaml = "module: {package: Vendor, name: Catalog}\nattributes:\n  - attribute_label: Ok\n  - attribute_label: Size\n    frontend_input: select\n";
        let err = Manifest::from_yaml_str(yaml).unwrap().validate().unwrap_err();
        match err {
            Error::Validation(err) => assert_eq!(err.field, "attributes[1].options"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_module_name() {
        let mut manifest = Manifest::new(ModuleIdentity::new("vendor", "Catalog"));
        let err = manifest.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ref e) if e.field == "module.package"));

        manifest.module = ModuleIdentity::new("Vendor", "My-Module");
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_duplicate_codes() {
        let mut manifest = Manifest::new(ModuleIdentity::new("Vendor", "Catalog"));
        manifest.attributes.push(RawAttribute::with_label("Color"));
        manifest.attributes.push(RawAttribute::with_label("color"));
        assert!(matches!(manifest.validate(), Err(Error::Manifest(_))));
    }

    #[test]
    fn test_class_name_collisions() {
        let mut manifest = Manifest::new(ModuleIdentity::new("Vendor", "Catalog"));
        manifest.attributes.push(RawAttribute::with_label("Color"));
        manifest.attributes.push(RawAttribute {
            frontend_input: Some("boolean".to_string()),
            ..RawAttribute::with_label("Color_")
        });

        match manifest.validate() {
            Err(Error::Manifest(message)) => {
                assert!(message.contains("'color_'"));
                assert!(message.contains("'Color'"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
