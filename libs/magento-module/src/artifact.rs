//! Generated artifacts handed from generators to the collector

use crate::collector::ModuleIdentity;
use crate::php::PhpClass;
use crate::xml::XmlNode;

/// An XML document contribution at a module-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlArtifact {
    pub path: String,
    pub root: XmlNode,
}

impl XmlArtifact {
    pub fn new(path: impl Into<String>, root: XmlNode) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }
}

/// Module README, built from one line per generated feature
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Readme {
    pub attributes: Vec<String>,
}

impl Readme {
    pub fn with_attribute(line: impl Into<String>) -> Self {
        Self {
            attributes: vec![line.into()],
        }
    }

    fn merge(&mut self, other: Readme) {
        for line in other.attributes {
            if !self.attributes.contains(&line) {
                self.attributes.push(line);
            }
        }
    }

    pub fn render(&self, identity: &ModuleIdentity) -> String {
        let mut text = String::new();
        text.push_str(&format!(
            "# Mage2 Module {} {}\n\n",
            identity.package, identity.name
        ));
        text.push_str(&format!(
            "    ``{}/module-{}``\n\n",
            identity.package.to_lowercase(),
            identity.name.to_lowercase()
        ));
        text.push_str("## Main Functionalities\n\n");
        text.push_str("## Installation\n\n");
        text.push_str(&format!(
            " - Copy the module to `app/code/{}`\n",
            identity.base_path()
        ));
        text.push_str(&format!(
            " - Enable the module by running `php bin/magento module:enable {}`\n",
            identity.module_name()
        ));
        text.push_str(" - Apply database updates by running `php bin/magento setup:upgrade`\n\n");
        text.push_str("## Specifications\n\n");
        text.push_str("## Attributes\n\n");
        for line in &self.attributes {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticContent {
    Readme(Readme),
    Text(String),
}

/// A non-code file placed in a module-relative directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFileArtifact {
    /// Directory relative to the module root; `.` is the root itself
    pub directory: String,
    pub file_name: String,
    pub content: StaticContent,
}

impl StaticFileArtifact {
    pub fn readme(readme: Readme) -> Self {
        Self {
            directory: ".".to_string(),
            file_name: "README.md".to_string(),
            content: StaticContent::Readme(readme),
        }
    }

    pub fn text(
        directory: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            file_name: file_name.into(),
            content: StaticContent::Text(content.into()),
        }
    }

    /// Path relative to the module root
    pub fn path(&self) -> String {
        match self.directory.trim_matches('/') {
            "" | "." => self.file_name.clone(),
            dir => format!("{}/{}", dir, self.file_name),
        }
    }

    /// Readme fragments accumulate; any other content is replaced.
    pub(crate) fn merge(&mut self, other: StaticFileArtifact) {
        match (&mut self.content, other.content) {
            (StaticContent::Readme(existing), StaticContent::Readme(incoming)) => {
                existing.merge(incoming)
            }
            (content, incoming) => *content = incoming,
        }
    }

    pub fn render(&self, identity: &ModuleIdentity) -> String {
        match &self.content {
            StaticContent::Readme(readme) => readme.render(identity),
            StaticContent::Text(text) => text.clone(),
        }
    }
}

/// Anything a generator can emit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedArtifact {
    Class(PhpClass),
    Xml(XmlArtifact),
    StaticFile(StaticFileArtifact),
}

impl GeneratedArtifact {
    /// Path of the artifact relative to the module root
    pub fn path(&self) -> String {
        match self {
            GeneratedArtifact::Class(class) => class.file_path(),
            GeneratedArtifact::Xml(xml) => xml.path.clone(),
            GeneratedArtifact::StaticFile(file) => file.path(),
        }
    }
}

impl From<PhpClass> for GeneratedArtifact {
    fn from(class: PhpClass) -> Self {
        GeneratedArtifact::Class(class)
    }
}

impl From<XmlArtifact> for GeneratedArtifact {
    fn from(xml: XmlArtifact) -> Self {
        GeneratedArtifact::Xml(xml)
    }
}

impl From<StaticFileArtifact> for GeneratedArtifact {
    fn from(file: StaticFileArtifact) -> Self {
        GeneratedArtifact::StaticFile(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_file_path() {
        let readme = StaticFileArtifact::readme(Readme::default());
        assert_eq!(readme.path(), "README.md");

        let text = StaticFileArtifact::text("etc/", "notes.txt", "hi");
        assert_eq!(text.path(), "etc/notes.txt");
    }

    #[test]
    fn test_readme_merge_deduplicates() {
        let mut readme = StaticFileArtifact::readme(Readme::with_attribute(" - Product - Color (color)"));
        readme.merge(StaticFileArtifact::readme(Readme::with_attribute(" - Product - Size (size)")));
        readme.merge(StaticFileArtifact::readme(Readme::with_attribute(" - Product - Color (color)")));

        let StaticContent::Readme(merged) = &readme.content else {
            panic!("expected readme content");
        };
        assert_eq!(
            merged.attributes,
            vec![" - Product - Color (color)", " - Product - Size (size)"]
        );
    }
}
