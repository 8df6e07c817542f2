//! Output collector for a single generated module

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path};

use crate::artifact::{GeneratedArtifact, StaticFileArtifact, XmlArtifact};
use crate::error::{Error, Result};
use crate::php::PhpClass;
use crate::xml::XmlNode;

/// Vendor and module name of a Magento module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleIdentity {
    pub package: String,
    pub name: String,
}

impl ModuleIdentity {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Magento module name, e.g. `Vendor_Catalog`
    pub fn module_name(&self) -> String {
        format!("{}_{}", self.package, self.name)
    }

    /// PHP namespace root, e.g. `Vendor\Catalog`
    pub fn namespace(&self) -> String {
        format!("{}\\{}", self.package, self.name)
    }

    /// Directory of the module below `app/code`
    pub fn base_path(&self) -> String {
        format!("{}/{}", self.package, self.name)
    }
}

/// Accumulates the artifacts of one module until they are serialized.
#[derive(Debug, Clone)]
pub struct ModuleOutput {
    identity: ModuleIdentity,
    classes: BTreeMap<String, PhpClass>,
    xml: BTreeMap<String, XmlNode>,
    static_files: BTreeMap<String, StaticFileArtifact>,
}

impl ModuleOutput {
    pub fn new(identity: ModuleIdentity) -> Self {
        Self {
            identity,
            classes: BTreeMap::new(),
            xml: BTreeMap::new(),
            static_files: BTreeMap::new(),
        }
    }

    pub fn identity(&self) -> &ModuleIdentity {
        &self.identity
    }

    /// Add a class; a class with the same name is replaced.
    pub fn add_class(&mut self, class: PhpClass) {
        tracing::debug!(class = %class.class_name, "Adding class");
        self.classes.insert(class.file_path(), class);
    }

    /// Add an XML document, merging with any document already at `path`.
    pub fn add_xml(&mut self, path: impl Into<String>, root: XmlNode) {
        let path = path.into();
        tracing::debug!(path = %path, "Adding XML");
        match self.xml.get_mut(&path) {
            Some(existing) => existing.merge(root),
            None => {
                self.xml.insert(path, root);
            }
        }
    }

    /// Add a static file, merging README fragments at the same path.
    pub fn add_static_file(&mut self, file: StaticFileArtifact) {
        let path = file.path();
        tracing::debug!(path = %path, "Adding static file");
        match self.static_files.get_mut(&path) {
            Some(existing) => existing.merge(file),
            None => {
                self.static_files.insert(path, file);
            }
        }
    }

    pub fn add(&mut self, artifact: GeneratedArtifact) {
        match artifact {
            GeneratedArtifact::Class(class) => self.add_class(class),
            GeneratedArtifact::Xml(XmlArtifact { path, root }) => self.add_xml(path, root),
            GeneratedArtifact::StaticFile(file) => self.add_static_file(file),
        }
    }

    /// Look up a class by its module-relative class name.
    pub fn class(&self, class_name: &str) -> Option<&PhpClass> {
        self.classes.values().find(|c| c.class_name == class_name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &PhpClass> {
        self.classes.values()
    }

    pub fn xml(&self, path: &str) -> Option<&XmlNode> {
        self.xml.get(path)
    }

    pub fn static_file(&self, path: &str) -> Option<&StaticFileArtifact> {
        self.static_files.get(path)
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.xml.is_empty() && self.static_files.is_empty()
    }

    /// Render every artifact, keyed by path relative to `app/code`.
    pub fn files(&self) -> Result<BTreeMap<String, String>> {
        let base = self.identity.base_path();
        let namespace = self.identity.namespace();
        let mut files = BTreeMap::new();

        for (path, class) in &self.classes {
            files.insert(format!("{}/{}", base, path), class.render(&namespace));
        }
        for (path, root) in &self.xml {
            files.insert(format!("{}/{}", base, path), root.render_document()?);
        }
        for (path, file) in &self.static_files {
            files.insert(format!("{}/{}", base, path), file.render(&self.identity));
        }

        Ok(files)
    }

    /// Write all files below `output_dir`, creating directories as needed.
    ///
    /// Returns the number of files written.
    pub fn write_to(&self, output_dir: &Path) -> Result<usize> {
        let files = self.files()?;

        for (relative, contents) in &files {
            if !is_contained(Path::new(relative)) {
                return Err(Error::InvalidPath(relative.clone()));
            }
            let path = output_dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, contents)?;
            tracing::debug!(path = %path.display(), "Wrote file");
        }

        tracing::info!(
            module = %self.identity.module_name(),
            files = files.len(),
            output = %output_dir.display(),
            "Module written"
        );

        Ok(files.len())
    }
}

fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_names() {
        let identity = ModuleIdentity::new("Vendor", "Catalog");
        assert_eq!(identity.module_name(), "Vendor_Catalog");
        assert_eq!(identity.namespace(), "Vendor\\Catalog");
        assert_eq!(identity.base_path(), "Vendor/Catalog");
    }

    #[test]
    fn test_add_class_replaces_same_name() {
        let mut output = ModuleOutput::new(ModuleIdentity::new("Vendor", "Catalog"));
        output.add_class(PhpClass::new("Model\\Foo"));
        output.add_class(PhpClass::new("Model\\Foo").extends("Bar"));

        assert_eq!(output.classes().count(), 1);
        assert_eq!(
            output.class("Model\\Foo").unwrap().extends.as_deref(),
            Some("Bar")
        );
    }

    #[test]
    fn test_contained_paths() {
        assert!(is_contained(Path::new("Vendor/Catalog/etc/module.xml")));
        assert!(!is_contained(Path::new("../etc/passwd")));
        assert!(!is_contained(Path::new("/etc/passwd")));
    }
}
