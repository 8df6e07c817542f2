//! Artifact generators
//!
//! Each generator turns one validated definition into module artifacts.

pub mod product_attribute;

use std::path::PathBuf;

use crate::error::Result;
use crate::ir::AttributeDefinition;
use crate::template::Template;

/// Trait that all artifact generators must implement
pub trait Generator {
    /// The output type of this generator
    type Output;

    /// Generate artifacts for a single definition
    fn generate(&self, definition: &AttributeDefinition) -> Result<Self::Output>;
}

/// Configuration options for code generation
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Replacement for the built-in installer template
    pub template_path: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load the configured template, falling back to the built-in one.
    pub fn load_template(&self) -> Result<Template> {
        match &self.template_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading installer template");
                Template::from_file(path)
            }
            None => Ok(Template::product_attribute()?),
        }
    }
}
