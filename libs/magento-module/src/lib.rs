//! Magento 2 module artifacts
//!
//! In-memory representation of the files that make up a generated Magento 2
//! module: PHP classes, XML configuration documents and static files.
//!
//! ## Architecture
//!
//! - [`php`]: PHP class and method model, rendered to source text
//! - [`xml`]: XML node trees with name-keyed merging
//! - [`artifact`]: the [`GeneratedArtifact`] union handed over by generators
//! - [`collector`]: [`ModuleOutput`], which accumulates artifacts for one
//!   module and serializes them to disk
//!
//! Generators only ever produce artifacts; nothing touches the filesystem
//! until [`ModuleOutput::write_to`] is called.

pub mod artifact;
pub mod collector;
pub mod error;
pub mod php;
pub mod xml;

pub use artifact::{GeneratedArtifact, Readme, StaticContent, StaticFileArtifact, XmlArtifact};
pub use collector::{ModuleIdentity, ModuleOutput};
pub use error::{Error, Result};
pub use php::{PhpClass, PhpMethod};
pub use xml::XmlNode;
