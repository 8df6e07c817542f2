//! Magento 2 Product Attribute Generator
//!
//! This library generates the source files that install product attributes in
//! a Magento 2 module: data patches, source models and XML configuration.
//!
//! ## Architecture
//!
//! The generator uses a three-stage pipeline:
//! 1. **Parser**: Validates raw parameters against the declared parameter schema
//! 2. **IR (Intermediate Representation)**: Immutable attribute definitions
//! 3. **Generators**: Artifact compilation from IR, backed by the static
//!    [`mapping`] tables and the [`template`] renderer
//!
//! Artifacts are collected in a [`magegen_module::ModuleOutput`], which is the
//! only component that touches the filesystem.

pub mod error;
pub mod generators;
pub mod ir;
pub mod manifest;
pub mod mapping;
pub mod parser;
pub mod template;

use std::path::Path;

use anyhow::Context;
use generators::product_attribute::ProductAttributeGenerator;
use generators::GeneratorConfig;
use magegen_module::ModuleOutput;

pub use error::{Constraint, Error, Result, TemplateRenderError, ValidationError};
pub use ir::{AttributeDefinition, ExtraParams, InputKind, Scope, StorageKind};
pub use manifest::Manifest;
pub use parser::{validate, RawAttribute};

/// Validate and compile every attribute of a manifest into a module.
///
/// Nothing is collected unless all attributes validate and compile.
pub fn generate_module(manifest: &Manifest, config: &GeneratorConfig) -> Result<ModuleOutput> {
    let definitions = manifest.validate()?;
    let generator = ProductAttributeGenerator::new(manifest.module.clone(), config)?;

    let compiled = definitions
        .iter()
        .map(|definition| generator.compile(definition))
        .collect::<Result<Vec<_>>>()?;

    let mut output = ModuleOutput::new(manifest.module.clone());
    for attribute in compiled {
        tracing::info!(
            module = %manifest.module.module_name(),
            attribute = %attribute.attribute_code,
            "Generated product attribute"
        );
        attribute.emit(&mut output);
    }

    Ok(output)
}

/// Convenience helper to generate a module from a manifest file.
///
/// Returns the number of written files.
pub fn generate_module_from_manifest(
    manifest_path: &Path,
    output_dir: &Path,
    config: &GeneratorConfig,
) -> anyhow::Result<usize> {
    let manifest = Manifest::from_path(manifest_path)
        .with_context(|| format!("reading manifest {}", manifest_path.display()))?;

    let output = generate_module(&manifest, config).context("generating module")?;

    let written = output
        .write_to(output_dir)
        .with_context(|| format!("writing module to {}", output_dir.display()))?;

    Ok(written)
}
